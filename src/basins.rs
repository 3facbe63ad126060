/// Basin registry for the Assam flood-risk dashboard.
///
/// A basin here is an administrative flood-risk zone used to group alerts
/// and reports, not a hydrological basin in the strict sense. This is the
/// single source of truth for basin ids; the simulation fan-out and the
/// CLI reference basins from here rather than hardcoding them.

use crate::model::{FloodRiskError, Result};

// ---------------------------------------------------------------------------
// Basin metadata
// ---------------------------------------------------------------------------

/// Metadata for a single flood-risk zone.
#[derive(Debug)]
pub struct Basin {
    /// Short stable identifier, lowercase ASCII.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Administrative district the zone belongs to.
    pub district: &'static str,
    /// River the zone drains into.
    pub river: &'static str,
    /// WGS84 latitude of the zone centroid.
    pub latitude: f64,
    /// WGS84 longitude of the zone centroid.
    pub longitude: f64,
}

/// Flood-risk zones shown on the dashboard, ordered roughly west to east
/// along the Brahmaputra, then the Barak valley.
pub static BASIN_REGISTRY: &[Basin] = &[
    Basin {
        id: "dhubri",
        name: "Dhubri Riverine",
        district: "Dhubri",
        river: "Brahmaputra",
        latitude: 26.0207,
        longitude: 89.9743,
    },
    Basin {
        id: "manas",
        name: "Manas-Beki",
        district: "Barpeta",
        river: "Beki",
        latitude: 26.3230,
        longitude: 91.0060,
    },
    Basin {
        id: "puthimari",
        name: "Puthimari",
        district: "Kamrup",
        river: "Puthimari",
        latitude: 26.2420,
        longitude: 91.5560,
    },
    Basin {
        id: "guwahati",
        name: "Guwahati Urban",
        district: "Kamrup Metro",
        river: "Brahmaputra",
        latitude: 26.1445,
        longitude: 91.7362,
    },
    Basin {
        id: "kopili",
        name: "Kopili",
        district: "Nagaon",
        river: "Kopili",
        latitude: 26.3480,
        longitude: 92.6840,
    },
    Basin {
        id: "jiabharali",
        name: "Jia Bharali",
        district: "Sonitpur",
        river: "Jia Bharali",
        latitude: 26.6338,
        longitude: 92.8000,
    },
    Basin {
        id: "dhansiri",
        name: "Dhansiri",
        district: "Golaghat",
        river: "Dhansiri",
        latitude: 26.5239,
        longitude: 93.9623,
    },
    Basin {
        id: "subansiri",
        name: "Subansiri",
        district: "Lakhimpur",
        river: "Subansiri",
        latitude: 27.2361,
        longitude: 94.1050,
    },
    Basin {
        id: "majuli",
        name: "Majuli Island",
        district: "Majuli",
        river: "Brahmaputra",
        latitude: 26.9500,
        longitude: 94.1667,
    },
    Basin {
        id: "dikhow",
        name: "Dikhow",
        district: "Sivasagar",
        river: "Dikhow",
        latitude: 26.9826,
        longitude: 94.6425,
    },
    Basin {
        id: "dibrugarh",
        name: "Dibrugarh Riverfront",
        district: "Dibrugarh",
        river: "Brahmaputra",
        latitude: 27.4728,
        longitude: 94.9120,
    },
    Basin {
        id: "barak",
        name: "Barak Valley",
        district: "Cachar",
        river: "Barak",
        latitude: 24.8333,
        longitude: 92.7789,
    },
];

/// Returns every basin id in registry order.
pub fn all_basin_ids() -> Vec<&'static str> {
    BASIN_REGISTRY.iter().map(|b| b.id).collect()
}

/// Looks up a basin by id. Returns `None` if not found.
pub fn find_basin(id: &str) -> Option<&'static Basin> {
    BASIN_REGISTRY.iter().find(|b| b.id == id)
}

/// Resolves a list of basin ids to registry entries, in the order given.
/// An empty list selects every basin; an unknown id is a config error.
pub fn select_basins<S: AsRef<str>>(ids: &[S]) -> Result<Vec<&'static Basin>> {
    if ids.is_empty() {
        return Ok(BASIN_REGISTRY.iter().collect());
    }
    ids.iter()
        .map(|id| {
            let id = id.as_ref();
            find_basin(id)
                .ok_or_else(|| FloodRiskError::Config(format!("unknown basin id '{}'", id)))
        })
        .collect()
}

/// Returns the basins in a district (case-insensitive match).
pub fn basins_in_district(district: &str) -> Vec<&'static Basin> {
    BASIN_REGISTRY
        .iter()
        .filter(|b| b.district.eq_ignore_ascii_case(district))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basin_ids_are_lowercase_ascii() {
        for basin in BASIN_REGISTRY {
            assert!(
                !basin.id.is_empty()
                    && basin.id.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()),
                "basin id for '{}' should be lowercase ascii, got '{}'",
                basin.name,
                basin.id
            );
        }
    }

    #[test]
    fn test_no_duplicate_basin_ids() {
        let mut seen = std::collections::HashSet::new();
        for basin in BASIN_REGISTRY {
            assert!(
                seen.insert(basin.id),
                "duplicate basin id '{}' found in BASIN_REGISTRY",
                basin.id
            );
        }
    }

    #[test]
    fn test_coordinates_fall_inside_assam() {
        // Rough bounding box for the state.
        for basin in BASIN_REGISTRY {
            assert!(
                (24.0..=28.5).contains(&basin.latitude),
                "latitude out of range for '{}'",
                basin.name
            );
            assert!(
                (89.5..=96.5).contains(&basin.longitude),
                "longitude out of range for '{}'",
                basin.name
            );
        }
    }

    #[test]
    fn test_find_basin_returns_correct_entry() {
        let basin = find_basin("guwahati").expect("Guwahati should be in registry");
        assert_eq!(basin.district, "Kamrup Metro");
    }

    #[test]
    fn test_find_basin_returns_none_for_unknown_id() {
        assert!(find_basin("atlantis").is_none());
    }

    #[test]
    fn test_all_basin_ids_matches_registry_length() {
        assert_eq!(all_basin_ids().len(), BASIN_REGISTRY.len());
    }

    #[test]
    fn test_select_basins_empty_selects_whole_registry() {
        let all = select_basins::<&str>(&[]).unwrap();
        assert_eq!(all.len(), BASIN_REGISTRY.len());
        assert_eq!(all[0].id, BASIN_REGISTRY[0].id);
    }

    #[test]
    fn test_select_basins_keeps_requested_order() {
        let picked = select_basins(&["barak", "guwahati"]).unwrap();
        let ids: Vec<&str> = picked.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec!["barak", "guwahati"]);
    }

    #[test]
    fn test_select_basins_rejects_unknown_id() {
        let ids = vec!["guwahati".to_string(), "atlantis".to_string()];
        assert_eq!(
            select_basins(&ids).unwrap_err(),
            FloodRiskError::Config("unknown basin id 'atlantis'".to_string())
        );
    }

    #[test]
    fn test_basins_in_district_ignores_case() {
        let cachar = basins_in_district("cachar");
        assert_eq!(cachar.len(), 1);
        assert_eq!(cachar[0].id, "barak");
        assert!(basins_in_district("Nowhere").is_empty());
    }
}
