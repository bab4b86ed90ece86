//! Immutable reference data for structural materials.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

/// A structural material the analyzer can validate a design against.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Material {
    /// Display name, also the catalog lookup key.
    pub name: String,
    /// Density in kilograms per cubic metre.
    pub density_kg_m3: f64,
    /// Yield strength in megapascals.
    pub yield_strength_mpa: f64,
}

/// Embedded catalog source; parsed once per process.
const CATALOG_JSON: &str = include_str!("materials.json");

/// Parsed catalog, initialized on first access and read-only thereafter.
static CATALOG: OnceLock<Vec<Material>> = OnceLock::new();

/// The full material catalog.
///
/// # Panics
///
/// Panics if the embedded catalog fails to parse, which indicates a build-time
/// defect rather than a runtime condition.
#[must_use]
pub fn catalog() -> &'static [Material] {
    CATALOG
        .get_or_init(|| {
            serde_json::from_str(CATALOG_JSON).expect("embedded material catalog is well-formed")
        })
        .as_slice()
}

/// Look up a material by name, case-insensitively.
#[must_use]
pub fn find(name: &str) -> Option<&'static Material> {
    catalog()
        .iter()
        .find(|material| material.name.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_parses_and_is_non_empty() {
        assert!(!catalog().is_empty());
    }

    #[test]
    fn aluminum_7075_matches_reference_data() {
        let material = find("Aluminum 7075-T6").expect("Al 7075 present");
        assert!((material.yield_strength_mpa - 503.0).abs() < f64::EPSILON);
        assert!((material.density_kg_m3 - 2810.0).abs() < f64::EPSILON);
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert!(find("aluminum 7075-t6").is_some());
        assert!(find("unobtainium").is_none());
    }

    #[test]
    fn all_entries_have_physical_properties() {
        for material in catalog() {
            assert!(material.density_kg_m3 > 0.0, "{}", material.name);
            assert!(material.yield_strength_mpa > 0.0, "{}", material.name);
        }
    }
}
