//! Photo download handler
//!
//! One [`Worker`] invocation fetches one photo. The remote serves original
//! files under an opaque extension, so the handler walks the configured
//! candidate list in order and takes the first hit. A photo missing under
//! every extension is an expected failure and is encoded in the outcome, not
//! raised; transport and filesystem errors are unexpected and abort the batch
//! through the executor's fail-fast path.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::config::Config;
use crate::error::Result;
use crate::executor::Worker;
use crate::types::{DownloadOutcome, PhotoId};

/// Downloads original photo files, trying candidate extensions in order
pub struct PhotoDownloader {
    http: reqwest::Client,
    attachments_base: String,
    extensions: Vec<String>,
}

impl PhotoDownloader {
    /// Build a downloader from the crate configuration
    pub fn new(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self {
            http,
            attachments_base: config
                .attachments_base_url
                .trim_end_matches('/')
                .to_string(),
            extensions: config.photo_extensions.clone(),
        })
    }

    fn photo_url(&self, photo_id: PhotoId, extension: &str) -> String {
        format!("{}/{photo_id}/original.{extension}", self.attachments_base)
    }
}

#[async_trait]
impl Worker for PhotoDownloader {
    type Args = (PhotoId, PathBuf);
    type Output = DownloadOutcome;

    async fn run(&self, args: Self::Args) -> Result<DownloadOutcome> {
        let (photo_id, dest) = args;
        let mut url = String::new();
        for extension in &self.extensions {
            url = self.photo_url(photo_id, extension);
            let response = self.http.get(&url).send().await?;
            // Anything below 300 counts as a hit (redirects are already
            // followed by the client)
            if response.status().as_u16() >= 300 {
                // Not available under this extension, try the next candidate
                continue;
            }
            let bytes = response.bytes().await?;
            tokio::fs::write(&dest, &bytes).await?;
            return Ok(DownloadOutcome { success: true, url });
        }

        tracing::debug!(photo = %photo_id, "photo not found under any candidate extension");
        Ok(DownloadOutcome {
            success: false,
            url,
        })
    }
}
