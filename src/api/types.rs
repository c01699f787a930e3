//! Response body types for the observations API
//!
//! Only the fields the pipeline reads are modeled; unknown fields are ignored.

use serde::Deserialize;

use crate::types::{PhotoId, TaxonId};

/// One page of a paginated response
#[derive(Clone, Debug, Deserialize)]
pub struct Paged<T> {
    /// Total record count across all pages, as reported by the server
    pub total_results: usize,
    /// Records in this page
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

/// A taxon record as returned by the taxa endpoint
#[derive(Clone, Debug, Deserialize)]
pub struct TaxonRecord {
    /// Remote taxon identifier
    pub id: TaxonId,
    /// Scientific name
    pub name: String,
}

/// An observation record as returned by the observations endpoint
#[derive(Clone, Debug, Deserialize)]
pub struct Observation {
    /// License code the observation was published under, if any
    #[serde(default)]
    pub license_code: Option<String>,
    /// Photos attached to the observation
    #[serde(default)]
    pub photos: Vec<ObservationPhoto>,
}

/// One photo attached to an observation
#[derive(Clone, Debug, Deserialize)]
pub struct ObservationPhoto {
    /// Remote photo identifier
    pub id: PhotoId,
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_observation_tolerates_null_license_and_extra_fields() {
        let json = r#"{
            "id": 555,
            "license_code": null,
            "quality_grade": "research",
            "photos": [{"id": 1, "url": "ignored"}, {"id": 2}]
        }"#;
        let obs: Observation = serde_json::from_str(json).unwrap();
        assert!(obs.license_code.is_none());
        assert_eq!(obs.photos.len(), 2);
        assert_eq!(obs.photos[0].id, PhotoId(1));
    }

    #[test]
    fn test_paged_defaults_empty_results() {
        let page: Paged<TaxonRecord> =
            serde_json::from_str(r#"{"total_results": 0}"#).unwrap();
        assert_eq!(page.total_results, 0);
        assert!(page.results.is_empty());
    }
}
