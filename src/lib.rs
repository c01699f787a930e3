//! # taxa-dl
//!
//! Library for downloading taxonomic observation photos from a paginated
//! observations API (MINKA by default), organized on disk by taxon and
//! license.
//!
//! ## Design Philosophy
//!
//! - **Executor-first** - every network operation runs through one reusable
//!   bounded-concurrency, ordered-result task executor
//! - **Library-first** - no CLI or UI, purely a Rust crate for embedding
//! - **Event-driven** - consumers subscribe to events and progress, no polling
//! - **Sensible defaults** - works against the public MINKA instance out of
//!   the box
//!
//! ## Quick Start
//!
//! ```no_run
//! use taxa_dl::{Config, TaxaDownloader};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let downloader = TaxaDownloader::new(Config::default())?;
//!     let reports = downloader
//!         .download_all(&["Chromis chromis".to_string()])
//!         .await?;
//!     for report in reports {
//!         println!(
//!             "{}: {:.2}% ok / {:.2}% failed",
//!             report.taxon,
//!             report.success_percent(),
//!             report.failure_percent()
//!         );
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## The executor
//!
//! The core primitive is [`executor::TaskExecutor`]: it fans a list of
//! argument tuples across at most `concurrency` simultaneous worker
//! invocations and returns outputs in input order, whatever order workers
//! finish in. The worker strategy is pluggable — shared-memory async tasks
//! ([`executor::FnWorker`]) or freshly spawned child processes
//! ([`executor::ProcessWorker`]) — behind one identical contract.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// HTTP client for the observations API
pub mod api;
/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// Bounded-concurrency task executor with ordered results
pub mod executor;
/// Fetch pipeline (taxon resolution, photo enumeration, downloads)
pub mod fetcher;
/// Core types and events
pub mod types;
/// Utility functions
pub mod utils;

// Re-export commonly used types
pub use api::ApiClient;
pub use config::Config;
pub use error::{Error, Result};
pub use executor::{
    FnWorker, LogProgress, NoOpProgress, ProcessWorker, ProgressObserver, TaskExecutor, Worker,
};
pub use fetcher::{PhotoDownloader, TaxaDownloader};
pub use types::{
    DownloadOutcome, Event, PhotoId, PhotoRecord, ResolvedTaxon, TaxonId, TaxonReport,
};
