//! Offline maintenance tasks.
//!
//! [`run_resync`] re-reads every stored map image and corrects persisted
//! dimensions that disagree with the file. It is driven by the
//! `mapboard-resync` binary and is safe to run repeatedly: a second run over
//! unchanged data updates nothing.

use mapboard_core::dimensions::read_dimensions;
use mapboard_core::resync::{needs_update, ResyncOutcome, ResyncReport};
use mapboard_core::storage::{AssetStore, StorageError};
use mapboard_db::models::game_map::GameMap;
use mapboard_db::repositories::GameMapRepo;
use mapboard_db::DbPool;

/// Resync the stored dimensions of every map.
///
/// Only listing the maps can fail the run. Per-map problems (missing file,
/// undecodable image, failed update) are recorded in the report and the
/// batch continues.
pub async fn run_resync(
    pool: &DbPool,
    store: &dyn AssetStore,
) -> Result<ResyncReport, sqlx::Error> {
    let maps = GameMapRepo::list_all(pool).await?;
    tracing::info!(count = maps.len(), "Starting map dimension resync");

    let mut report = ResyncReport::default();
    for map in maps {
        let outcome = resync_map(pool, store, &map).await;
        match &outcome {
            ResyncOutcome::Updated { from, to } => {
                tracing::info!(map_id = map.id, name = %map.name, %from, %to, "Dimensions updated");
            }
            ResyncOutcome::Unchanged { dimensions } => {
                tracing::debug!(map_id = map.id, %dimensions, "Dimensions already correct");
            }
            ResyncOutcome::Skipped { reason } => {
                tracing::info!(map_id = map.id, name = %map.name, reason = %reason, "Skipped map");
            }
            ResyncOutcome::Errored { error } => {
                tracing::warn!(map_id = map.id, name = %map.name, error = %error, "Failed to resync map");
            }
        }
        report.record(map.id, map.name, outcome);
    }

    tracing::info!(
        scanned = report.scanned,
        updated = report.updated,
        unchanged = report.unchanged,
        skipped = report.skipped,
        errored = report.errored,
        "Map dimension resync finished",
    );
    Ok(report)
}

async fn resync_map(pool: &DbPool, store: &dyn AssetStore, map: &GameMap) -> ResyncOutcome {
    if !map.has_image() {
        return ResyncOutcome::Skipped {
            reason: "map has no image".into(),
        };
    }

    let data = match store.get(&map.image_path).await {
        Ok(data) => data,
        Err(StorageError::NotFound(path)) => {
            return ResyncOutcome::Skipped {
                reason: format!("image file missing: {path}"),
            };
        }
        Err(e) => {
            return ResyncOutcome::Errored {
                error: e.to_string(),
            };
        }
    };

    let actual = match read_dimensions(&data) {
        Ok(dims) => dims,
        Err(e) => {
            return ResyncOutcome::Errored {
                error: e.to_string(),
            };
        }
    };

    let stored = map.dimensions();
    let Some(new_dims) = needs_update(stored, actual) else {
        return ResyncOutcome::Unchanged { dimensions: stored };
    };

    match GameMapRepo::update_dimensions(pool, map.id, new_dims).await {
        Ok(true) => ResyncOutcome::Updated {
            from: stored,
            to: new_dims,
        },
        // Another writer fixed the row between our read and update.
        Ok(false) => ResyncOutcome::Unchanged {
            dimensions: new_dims,
        },
        Err(e) => ResyncOutcome::Errored {
            error: e.to_string(),
        },
    }
}
