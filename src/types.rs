//! Core types and events for taxa-dl

use serde::{Deserialize, Serialize};

/// Unique identifier for a taxon
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TaxonId(pub i64);

impl TaxonId {
    /// Get the inner i64 value
    pub fn get(&self) -> i64 {
        self.0
    }
}

impl From<i64> for TaxonId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for TaxonId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for an observation photo
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PhotoId(pub i64);

impl PhotoId {
    /// Get the inner i64 value
    pub fn get(&self) -> i64 {
        self.0
    }
}

impl From<i64> for PhotoId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for PhotoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A taxon name successfully resolved to its remote identifier
#[derive(Clone, Debug, Serialize)]
pub struct ResolvedTaxon {
    /// Scientific name as supplied by the caller (e.g., "Chromis chromis")
    pub name: String,
    /// Filesystem-safe name used for the output folder (e.g., "chromis_chromis")
    pub normalized: String,
    /// Remote taxon identifier
    pub id: TaxonId,
}

/// One photo to download, paired with the license bucket it belongs to
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PhotoRecord {
    /// Remote photo identifier
    pub id: PhotoId,
    /// License code of the observation this photo belongs to ("unknown" when absent)
    pub license: String,
}

/// Outcome of a single photo download attempt
///
/// Expected failures (no candidate extension yields the photo) are encoded here
/// rather than raised, so a batch keeps running when individual photos are
/// missing. `url` is the locator that succeeded, or the last one attempted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DownloadOutcome {
    /// Whether the photo was fetched and written to disk
    pub success: bool,
    /// The URL the attempt resolved to (successful or last-attempted)
    pub url: String,
}

/// Per-taxon download report
#[derive(Clone, Debug, Serialize)]
pub struct TaxonReport {
    /// Scientific name of the taxon
    pub taxon: String,
    /// Remote taxon identifier
    pub taxon_id: TaxonId,
    /// Total number of photos attempted
    pub total: usize,
    /// Number of photos downloaded successfully
    pub succeeded: usize,
    /// Number of photos that failed under every candidate extension
    pub failed: usize,
}

impl TaxonReport {
    /// Percentage of photos downloaded successfully (0.0 when nothing was attempted)
    pub fn success_percent(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            100.0 * self.succeeded as f64 / self.total as f64
        }
    }

    /// Percentage of photos that failed (0.0 when nothing was attempted)
    pub fn failure_percent(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            100.0 * self.failed as f64 / self.total as f64
        }
    }
}

/// Events emitted by [`crate::TaxaDownloader`]
///
/// Consumers subscribe via [`crate::TaxaDownloader::subscribe`]. Events are
/// broadcast; a slow consumer may observe lagged receives but never blocks the
/// pipeline.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// A taxon name was resolved to its remote identifier
    TaxonResolved {
        /// Scientific name as supplied by the caller
        name: String,
        /// Remote taxon identifier
        id: TaxonId,
    },

    /// A taxon name had no exact match and was skipped
    TaxonNotFound {
        /// Scientific name as supplied by the caller
        name: String,
    },

    /// All downloads for a taxon finished
    TaxonComplete {
        /// Scientific name of the taxon
        name: String,
        /// Total number of photos attempted
        total: usize,
        /// Number of photos downloaded successfully
        succeeded: usize,
        /// Number of photos that failed
        failed: usize,
    },
}
