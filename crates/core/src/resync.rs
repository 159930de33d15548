//! Bookkeeping for the offline map dimension resync.
//!
//! The resync walks every map, re-reads the stored image, and corrects the
//! persisted width/height when they disagree. Failures are recorded per map
//! and never abort the batch.

use serde::Serialize;

use crate::dimensions::ImageDimensions;
use crate::types::DbId;

/// What happened to a single map during a resync.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ResyncOutcome {
    /// Stored dimensions were wrong and have been rewritten.
    Updated {
        from: ImageDimensions,
        to: ImageDimensions,
    },
    /// Stored dimensions already matched the image.
    Unchanged { dimensions: ImageDimensions },
    /// The map has no image reference, or the file is gone.
    Skipped { reason: String },
    /// The image exists but could not be read or the update failed.
    Errored { error: String },
}

/// Per-map line of a [`ResyncReport`].
#[derive(Debug, Clone, Serialize)]
pub struct ResyncEntry {
    pub map_id: DbId,
    pub name: String,
    #[serde(flatten)]
    pub outcome: ResyncOutcome,
}

/// Summary of one resync run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ResyncReport {
    pub scanned: usize,
    pub updated: usize,
    pub unchanged: usize,
    pub skipped: usize,
    pub errored: usize,
    pub entries: Vec<ResyncEntry>,
}

impl ResyncReport {
    /// Record the outcome for one map and bump the matching counter.
    pub fn record(&mut self, map_id: DbId, name: impl Into<String>, outcome: ResyncOutcome) {
        self.scanned += 1;
        match &outcome {
            ResyncOutcome::Updated { .. } => self.updated += 1,
            ResyncOutcome::Unchanged { .. } => self.unchanged += 1,
            ResyncOutcome::Skipped { .. } => self.skipped += 1,
            ResyncOutcome::Errored { .. } => self.errored += 1,
        }
        self.entries.push(ResyncEntry {
            map_id,
            name: name.into(),
            outcome,
        });
    }
}

/// Decide whether stored dimensions need rewriting.
///
/// Returns the new dimensions when they differ from what is stored.
pub fn needs_update(stored: ImageDimensions, actual: ImageDimensions) -> Option<ImageDimensions> {
    (stored != actual).then_some(actual)
}
