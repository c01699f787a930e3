//! Configuration types for taxa-dl

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{Error, Result};

/// Configuration for [`crate::TaxaDownloader`]
///
/// Every field has a sensible default, so `Config::default()` works against the
/// public MINKA instance out of the box. Fields deserialize individually, so a
/// partial config file only needs to name the settings it overrides.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the observations API (must end with a trailing slash so
    /// endpoint paths join underneath it)
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Base URL under which original photo files are served
    #[serde(default = "default_attachments_base_url")]
    pub attachments_base_url: String,

    /// Root directory for downloaded photos (default: "./downloads")
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Maximum simultaneous photo downloads (default: 10)
    #[serde(default = "default_download_concurrency")]
    pub download_concurrency: usize,

    /// Page size for paginated API queries (default: 200)
    #[serde(default = "default_per_page")]
    pub per_page: usize,

    /// Candidate file extensions tried in order when fetching a photo
    #[serde(default = "default_photo_extensions")]
    pub photo_extensions: Vec<String>,

    /// Timeout applied to every HTTP request (default: 30s)
    #[serde(default = "default_request_timeout")]
    pub request_timeout: Duration,
}

fn default_api_base_url() -> String {
    "https://minka-sdg.org:4000/v1/".to_string()
}

fn default_attachments_base_url() -> String {
    "https://minka-sdg.org/attachments/local_photos/files".to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./downloads")
}

fn default_download_concurrency() -> usize {
    10
}

fn default_per_page() -> usize {
    200
}

fn default_photo_extensions() -> Vec<String> {
    vec!["jpeg".to_string(), "jpg".to_string(), "png".to_string()]
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(30)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            attachments_base_url: default_attachments_base_url(),
            output_dir: default_output_dir(),
            download_concurrency: default_download_concurrency(),
            per_page: default_per_page(),
            photo_extensions: default_photo_extensions(),
            request_timeout: default_request_timeout(),
        }
    }
}

impl Config {
    /// Validate the configuration, returning a [`Error::Config`] naming the
    /// offending key on failure
    pub fn validate(&self) -> Result<()> {
        if self.download_concurrency == 0 {
            return Err(Error::config(
                "concurrency must be at least 1",
                "download_concurrency",
            ));
        }
        if self.per_page == 0 {
            return Err(Error::config("page size must be at least 1", "per_page"));
        }
        if self.photo_extensions.is_empty() {
            return Err(Error::config(
                "at least one candidate extension is required",
                "photo_extensions",
            ));
        }
        if !self.api_base_url.ends_with('/') {
            return Err(Error::config(
                "API base URL must end with a trailing slash",
                "api_base_url",
            ));
        }
        Ok(())
    }
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        config.validate().unwrap();
        assert_eq!(config.download_concurrency, 10);
        assert_eq!(config.per_page, 200);
        assert_eq!(config.photo_extensions, vec!["jpeg", "jpg", "png"]);
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let config = Config {
            download_concurrency: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        match err {
            Error::Config { key, .. } => {
                assert_eq!(key.as_deref(), Some("download_concurrency"));
            }
            other => panic!("expected config error, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_extensions_rejected() {
        let config = Config {
            photo_extensions: vec![],
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_base_url_without_slash_rejected() {
        let config = Config {
            api_base_url: "https://minka-sdg.org:4000/v1".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_config_deserializes_with_defaults() {
        let config: Config = serde_json::from_str(r#"{"download_concurrency": 4}"#).unwrap();
        assert_eq!(config.download_concurrency, 4);
        assert_eq!(config.per_page, 200);
    }
}
