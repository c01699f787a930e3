//! HTTP client for the observations API
//!
//! Thin typed wrapper over `reqwest` covering the two queries the pipeline
//! needs: exact taxon name resolution and exhaustive observation enumeration.
//! Pagination accumulates every page and validates the final count against the
//! server-reported total; a divergence is fatal for the run.

pub mod types;

use std::collections::HashSet;

use serde::de::DeserializeOwned;
use url::Url;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::types::{PhotoRecord, TaxonId};
use types::{Observation, Paged, TaxonRecord};

/// License bucket used when an observation carries no license code
const UNKNOWN_LICENSE: &str = "unknown";

/// Client for a paginated observations API
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    per_page: usize,
}

impl ApiClient {
    /// Build a client from the crate configuration
    pub fn new(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self {
            http,
            base_url: Url::parse(&config.api_base_url)?,
            per_page: config.per_page,
        })
    }

    /// GET an endpoint and deserialize the JSON body
    ///
    /// Any non-success status is an [`Error::Api`] carrying the status code
    /// and response body.
    async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<T> {
        let url = self.base_url.join(endpoint)?;
        let response = self.http.get(url).query(params).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json::<T>().await?)
    }

    /// GET an endpoint across all pages, accumulating `results`
    ///
    /// The first request carries only the page size; subsequent requests add
    /// an explicit 1-based `page` index until `ceil(total / per_page)` pages
    /// have been fetched. Fails with [`Error::PaginationMismatch`] when the
    /// accumulated count diverges from the server-reported total.
    async fn get_paginated<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<Vec<T>> {
        let mut query: Vec<(&str, String)> = params.to_vec();
        query.push(("per_page", self.per_page.to_string()));

        let first: Paged<T> = self.get(endpoint, &query).await?;
        let total = first.total_results;
        let mut results = first.results;

        let pages = total.div_ceil(self.per_page);
        for page in 2..=pages {
            let mut page_query = query.clone();
            page_query.push(("page", page.to_string()));
            let next: Paged<T> = self.get(endpoint, &page_query).await?;
            results.extend(next.results);
        }

        if results.len() != total {
            return Err(Error::PaginationMismatch {
                expected: total,
                received: results.len(),
            });
        }
        Ok(results)
    }

    /// Resolve a taxon name to its identifier
    ///
    /// Queries the taxa endpoint and accepts only an exact case-insensitive
    /// name match among the returned records. Returns `Ok(None)` when nothing
    /// matches; fuzzy hits from the server's search are ignored.
    pub async fn resolve_taxon(&self, name: &str) -> Result<Option<TaxonId>> {
        let page: Paged<TaxonRecord> = self.get("taxa", &[("q", name.to_string())]).await?;
        let wanted = name.to_lowercase();
        Ok(page
            .results
            .into_iter()
            .find(|record| record.name.to_lowercase() == wanted)
            .map(|record| record.id))
    }

    /// Enumerate every photo for a taxon, bucketed by license
    ///
    /// Walks all observation pages for `taxon_id`, flattening each
    /// observation's photos and tagging them with the observation's license
    /// code (or `"unknown"`). Duplicate photo IDs are dropped, keeping the
    /// first occurrence, so a photo shared by several observations is only
    /// downloaded once. Photos come back in first-appearance order across the
    /// observation pages, not sorted by ID, and the first-seen license wins
    /// for a shared photo — both deterministic for a given page sequence.
    pub async fn taxon_photos(&self, taxon_id: TaxonId) -> Result<Vec<PhotoRecord>> {
        let observations: Vec<Observation> = self
            .get_paginated("observations", &[("taxon_id", taxon_id.to_string())])
            .await?;

        let mut seen = HashSet::new();
        let mut photos = Vec::new();
        for observation in observations {
            let license = observation
                .license_code
                .unwrap_or_else(|| UNKNOWN_LICENSE.to_string());
            for photo in observation.photos {
                if seen.insert(photo.id) {
                    photos.push(PhotoRecord {
                        id: photo.id,
                        license: license.clone(),
                    });
                }
            }
        }
        Ok(photos)
    }
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PhotoId;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param, query_param_is_missing};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(server: &MockServer, per_page: usize) -> ApiClient {
        let config = Config {
            api_base_url: format!("{}/", server.uri()),
            per_page,
            ..Default::default()
        };
        ApiClient::new(&config).unwrap()
    }

    #[tokio::test]
    async fn test_resolve_taxon_exact_case_insensitive_match() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/taxa"))
            .and(query_param("q", "chromis CHROMIS"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "total_results": 2,
                "results": [
                    {"id": 10, "name": "Chromis"},
                    {"id": 42, "name": "Chromis chromis"}
                ]
            })))
            .mount(&server)
            .await;

        let client = test_client(&server, 200);
        let id = client.resolve_taxon("chromis CHROMIS").await.unwrap();
        assert_eq!(id, Some(TaxonId(42)));
    }

    #[tokio::test]
    async fn test_resolve_taxon_ignores_fuzzy_hits() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/taxa"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "total_results": 1,
                "results": [{"id": 10, "name": "Chromis limbata"}]
            })))
            .mount(&server)
            .await;

        let client = test_client(&server, 200);
        let id = client.resolve_taxon("Chromis chromis").await.unwrap();
        assert_eq!(id, None);
    }

    #[tokio::test]
    async fn test_non_success_status_is_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/taxa"))
            .respond_with(ResponseTemplate::new(500).set_body_string("server on fire"))
            .mount(&server)
            .await;

        let client = test_client(&server, 200);
        let err = client.resolve_taxon("Chromis chromis").await.unwrap_err();
        match err {
            Error::Api { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "server on fire");
            }
            other => panic!("expected API error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_pagination_accumulates_all_pages() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/observations"))
            .and(query_param_is_missing("page"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "total_results": 3,
                "results": [
                    {"license_code": "cc-by", "photos": [{"id": 1}]},
                    {"license_code": "cc-by", "photos": [{"id": 2}]}
                ]
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/observations"))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "total_results": 3,
                "results": [
                    {"license_code": null, "photos": [{"id": 3}]}
                ]
            })))
            .mount(&server)
            .await;

        let client = test_client(&server, 2);
        let photos = client.taxon_photos(TaxonId(42)).await.unwrap();
        assert_eq!(
            photos,
            vec![
                PhotoRecord {
                    id: PhotoId(1),
                    license: "cc-by".to_string()
                },
                PhotoRecord {
                    id: PhotoId(2),
                    license: "cc-by".to_string()
                },
                PhotoRecord {
                    id: PhotoId(3),
                    license: "unknown".to_string()
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_pagination_mismatch_is_fatal() {
        let server = MockServer::start().await;
        // Server claims 5 records but only ever returns 1.
        Mock::given(method("GET"))
            .and(path("/observations"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "total_results": 5,
                "results": [{"license_code": "cc-by", "photos": [{"id": 1}]}]
            })))
            .mount(&server)
            .await;

        let client = test_client(&server, 200);
        let err = client.taxon_photos(TaxonId(42)).await.unwrap_err();
        match err {
            Error::PaginationMismatch { expected, received } => {
                assert_eq!(expected, 5);
                assert_eq!(received, 1);
            }
            other => panic!("expected pagination mismatch, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_duplicate_photos_kept_once_first_seen_license_wins() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/observations"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "total_results": 2,
                "results": [
                    {"license_code": "cc-by", "photos": [{"id": 7}]},
                    {"license_code": "cc0", "photos": [{"id": 7}, {"id": 8}]}
                ]
            })))
            .mount(&server)
            .await;

        let client = test_client(&server, 200);
        let photos = client.taxon_photos(TaxonId(42)).await.unwrap();
        assert_eq!(photos.len(), 2);
        assert_eq!(photos[0].id, PhotoId(7));
        assert_eq!(photos[0].license, "cc-by");
        assert_eq!(photos[1].id, PhotoId(8));
    }
}
