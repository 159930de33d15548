//! Recompute stored map dimensions from the image files on disk.
//!
//! Reads `DATABASE_URL` and `MEDIA_ROOT` like the API server. Prints one line
//! per map and a summary, or the full report as JSON with `--json`.

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mapboard_api::config::DEFAULT_MAX_UPLOAD_BYTES;
use mapboard_api::maintenance::run_resync;
use mapboard_core::resync::{ResyncOutcome, ResyncReport};
use mapboard_core::storage::LocalAssetStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mapboard_api=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let json = std::env::args().skip(1).any(|arg| arg == "--json");

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let media_root = std::env::var("MEDIA_ROOT").unwrap_or_else(|_| "media".into());

    let pool = mapboard_db::create_pool(&database_url)
        .await
        .context("Failed to connect to database")?;
    let store = LocalAssetStore::new(&media_root, DEFAULT_MAX_UPLOAD_BYTES)
        .await
        .with_context(|| format!("Failed to open media directory {media_root}"))?;

    let report = run_resync(&pool, &store)
        .await
        .context("Failed to list maps")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    eprintln!("Restart the API server so it picks up the corrected dimensions.");
    Ok(())
}

fn print_report(report: &ResyncReport) {
    for entry in &report.entries {
        let detail = match &entry.outcome {
            ResyncOutcome::Updated { from, to } => format!("updated {from} -> {to}"),
            ResyncOutcome::Unchanged { dimensions } => format!("ok {dimensions}"),
            ResyncOutcome::Skipped { reason } => format!("skipped ({reason})"),
            ResyncOutcome::Errored { error } => format!("error ({error})"),
        };
        println!("[{}] {}: {detail}", entry.map_id, entry.name);
    }
    println!(
        "scanned {}, updated {}, unchanged {}, skipped {}, errored {}",
        report.scanned, report.updated, report.unchanged, report.skipped, report.errored
    );
}
