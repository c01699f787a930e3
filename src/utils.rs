//! Utility functions for name normalization

/// Normalize a taxon name into a filesystem-safe folder name
///
/// Lowercases the name, replaces spaces with underscores, and strips dots, so
/// "Chromis chromis" becomes "chromis_chromis" and "Clavelina cf. lepadiformis"
/// becomes "clavelina_cf_lepadiformis".
///
/// # Examples
///
/// ```
/// use taxa_dl::utils::normalize_taxon_name;
///
/// assert_eq!(normalize_taxon_name("Chromis chromis"), "chromis_chromis");
/// ```
pub fn normalize_taxon_name(name: &str) -> String {
    name.to_lowercase().replace(' ', "_").replace('.', "")
}
