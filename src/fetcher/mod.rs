//! Fetch pipeline — resolves taxon names, enumerates photos, drives downloads
//!
//! Data flows one way: name list → resolved IDs → per-taxon photo and license
//! list → per-photo download task → executor → ordered outcomes → per-taxon
//! report plus a `failed.txt` sidecar for out-of-band retries.

mod photo;

pub use photo::PhotoDownloader;

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::broadcast;

use crate::api::ApiClient;
use crate::config::Config;
use crate::error::Result;
use crate::executor::{LogProgress, ProgressObserver, TaskExecutor};
use crate::types::{Event, PhotoId, ResolvedTaxon, TaxonReport};
use crate::utils::normalize_taxon_name;

/// Capacity of the broadcast event channel
const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Downloads all observation photos for a set of taxa, organized on disk by
/// taxon and license
///
/// # Examples
///
/// ```no_run
/// use taxa_dl::{Config, TaxaDownloader};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let downloader = TaxaDownloader::new(Config::default())?;
///
/// let mut events = downloader.subscribe();
/// tokio::spawn(async move {
///     while let Ok(event) = events.recv().await {
///         println!("{event:?}");
///     }
/// });
///
/// let reports = downloader
///     .download_all(&["Chromis chromis".to_string()])
///     .await?;
/// for report in reports {
///     println!("{}: {:.2}% ok", report.taxon, report.success_percent());
/// }
/// # Ok(())
/// # }
/// ```
pub struct TaxaDownloader {
    config: Arc<Config>,
    api: ApiClient,
    event_tx: broadcast::Sender<Event>,
    observer: Arc<dyn ProgressObserver>,
}

impl TaxaDownloader {
    /// Create a downloader, validating the configuration
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let api = ApiClient::new(&config)?;
        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Ok(Self {
            config: Arc::new(config),
            api,
            event_tx,
            observer: Arc::new(LogProgress),
        })
    }

    /// Replace the progress observer used for download batches
    pub fn with_observer(mut self, observer: Arc<dyn ProgressObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Subscribe to pipeline events
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.event_tx.subscribe()
    }

    /// Resolve taxon names to identifiers, skipping names with no exact match
    ///
    /// A miss is logged and broadcast as [`Event::TaxonNotFound`]; it never
    /// fails the run.
    pub async fn resolve_taxa(&self, names: &[String]) -> Result<Vec<ResolvedTaxon>> {
        let mut resolved = Vec::with_capacity(names.len());
        for name in names {
            match self.api.resolve_taxon(name).await? {
                Some(id) => {
                    tracing::info!(taxon = %name, %id, "resolved taxon");
                    let _ = self.event_tx.send(Event::TaxonResolved {
                        name: name.clone(),
                        id,
                    });
                    resolved.push(ResolvedTaxon {
                        name: name.clone(),
                        normalized: normalize_taxon_name(name),
                        id,
                    });
                }
                None => {
                    tracing::warn!(taxon = %name, "no exact match, skipping");
                    let _ = self
                        .event_tx
                        .send(Event::TaxonNotFound { name: name.clone() });
                }
            }
        }
        Ok(resolved)
    }

    /// Download every photo for one resolved taxon
    ///
    /// Photos land at `<output>/<taxon>/<license>/<photo_id>.jpeg`; locators
    /// that failed under every candidate extension are listed in
    /// `<output>/<taxon>/failed.txt`, one per line.
    pub async fn download_taxon(&self, taxon: &ResolvedTaxon) -> Result<TaxonReport> {
        tracing::info!(taxon = %taxon.name, "enumerating observation photos");
        let photos = self.api.taxon_photos(taxon.id).await?;

        let taxon_dir = self.config.output_dir.join(&taxon.normalized);
        tokio::fs::create_dir_all(&taxon_dir).await?;

        let mut tasks: Vec<(PhotoId, PathBuf)> = Vec::with_capacity(photos.len());
        for photo in &photos {
            let license_dir = taxon_dir.join(&photo.license);
            tokio::fs::create_dir_all(&license_dir).await?;
            tasks.push((photo.id, license_dir.join(format!("{}.jpeg", photo.id))));
        }

        let total = tasks.len();
        let label = format!("Downloading {total} {} photos", taxon.name);
        let executor = TaskExecutor::new(
            PhotoDownloader::new(&self.config)?,
            self.config.download_concurrency,
        )?
        .with_observer(Arc::clone(&self.observer));
        let outcomes = executor.run(&label, tasks).await?;

        let succeeded = outcomes.iter().filter(|o| o.success).count();
        let failed = total - succeeded;

        let mut failed_log = String::new();
        for outcome in outcomes.iter().filter(|o| !o.success) {
            failed_log.push_str(&outcome.url);
            failed_log.push('\n');
        }
        tokio::fs::write(taxon_dir.join("failed.txt"), failed_log).await?;

        let report = TaxonReport {
            taxon: taxon.name.clone(),
            taxon_id: taxon.id,
            total,
            succeeded,
            failed,
        };
        tracing::info!(
            taxon = %taxon.name,
            total,
            succeeded,
            failed,
            "taxon complete: {:.2}% ok, {:.2}% failed",
            report.success_percent(),
            report.failure_percent(),
        );
        let _ = self.event_tx.send(Event::TaxonComplete {
            name: taxon.name.clone(),
            total,
            succeeded,
            failed,
        });
        Ok(report)
    }

    /// Resolve every name and download all photos for the resolved taxa
    ///
    /// Names without an exact match are skipped (with a warning and an event),
    /// so the returned reports cover resolved taxa only.
    pub async fn download_all(&self, names: &[String]) -> Result<Vec<TaxonReport>> {
        let resolved = self.resolve_taxa(names).await?;
        let mut reports = Vec::with_capacity(resolved.len());
        for taxon in &resolved {
            reports.push(self.download_taxon(taxon).await?);
        }
        Ok(reports)
    }
}
