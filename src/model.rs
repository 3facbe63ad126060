/// Core data types for the Assam flood-risk service.
///
/// This module defines the shared domain model imported by all other modules.
/// It contains no logic beyond formatting and error conversions, and no I/O.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Risk tiers
// ---------------------------------------------------------------------------

/// Discrete risk tiers, in ascending order of severity.
///
/// Serialized as `"Low"`, `"Medium"`, `"High"` to match the mock API
/// consumed by the citizen app and the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "Low"),
            RiskLevel::Medium => write!(f, "Medium"),
            RiskLevel::High => write!(f, "High"),
        }
    }
}

// ---------------------------------------------------------------------------
// Station records
// ---------------------------------------------------------------------------

/// One river/water-level gauge station, normalized from a row of the
/// government gauge table.
///
/// Numeric fields are `None` when the source cell was empty or not a
/// finite number. `None` and `Some(0.0)` mean different things: zero is a
/// legitimate flow level, missing is not.
///
/// Records are built once per normalization run and never updated;
/// fresh data means normalizing a new table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationRecord {
    pub id: String,            // "wl_<sequence>"
    pub station_code: String,  // not unique across districts
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub district: String,
    pub river_name: String,
    pub basin_name: String,
    pub rc_name: String,       // regional-center label
    pub division_name: String,
    pub sub_division_name: String,
    pub station_type: String,
    pub high_flow_level: Option<f64>,
    pub high_flow_level_date: String,
    pub danger_flow_level: Option<f64>,
    pub warning_flow_level: Option<f64>,
    pub current_flow_level: Option<f64>,
    pub observed_at: String,
    pub risk_level: RiskLevel,
}

// ---------------------------------------------------------------------------
// Simulation types
// ---------------------------------------------------------------------------

/// The three slider values driving the interactive risk model.
///
/// UI convention keeps rainfall in [0, 200] mm/h and both percentages in
/// [0, 100], but nothing here enforces those ranges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationParameters {
    /// Rainfall intensity, mm/h.
    pub rainfall: f64,
    /// Share of drainage capacity obstructed, percent.
    pub blockage: f64,
    /// Ambient ground saturation, percent.
    pub soil_saturation: f64,
}

impl SimulationParameters {
    pub fn new(rainfall: f64, blockage: f64, soil_saturation: f64) -> Self {
        Self {
            rainfall,
            blockage,
            soil_saturation,
        }
    }
}

/// Result of classifying one parameter set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    pub risk_level: RiskLevel,
    /// Metres, rounded to two decimals.
    pub estimated_water_level: f64,
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can arise when loading configuration or reading gauge tables.
///
/// The pure classification functions never produce these; degradation
/// there is value-level (`None`, `RiskLevel::Low`).
#[derive(Debug, PartialEq)]
pub enum FloodRiskError {
    /// A file could not be read or written.
    Io(String),
    /// The delimited table could not be read.
    Csv(String),
    /// The configuration file is malformed.
    Config(String),
    /// JSON output could not be produced.
    Json(String),
    /// A data row had fewer columns than the column map requires
    /// (only raised under the `error` short-row policy).
    ShortRow { line: u64, expected: usize, found: usize },
}

impl fmt::Display for FloodRiskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FloodRiskError::Io(msg) => write!(f, "I/O error: {}", msg),
            FloodRiskError::Csv(msg) => write!(f, "CSV error: {}", msg),
            FloodRiskError::Config(msg) => write!(f, "Config error: {}", msg),
            FloodRiskError::Json(msg) => write!(f, "JSON error: {}", msg),
            FloodRiskError::ShortRow { line, expected, found } => write!(
                f,
                "Short row at line {}: expected at least {} fields, found {}",
                line, expected, found
            ),
        }
    }
}

impl std::error::Error for FloodRiskError {}

impl From<std::io::Error> for FloodRiskError {
    fn from(err: std::io::Error) -> Self {
        FloodRiskError::Io(err.to_string())
    }
}

impl From<csv::Error> for FloodRiskError {
    fn from(err: csv::Error) -> Self {
        FloodRiskError::Csv(err.to_string())
    }
}

impl From<toml::de::Error> for FloodRiskError {
    fn from(err: toml::de::Error) -> Self {
        FloodRiskError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for FloodRiskError {
    fn from(err: serde_json::Error) -> Self {
        FloodRiskError::Json(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, FloodRiskError>;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_levels_are_ordered_by_severity() {
        assert!(RiskLevel::Low < RiskLevel::Medium);
        assert!(RiskLevel::Medium < RiskLevel::High);
    }

    #[test]
    fn test_risk_level_serializes_as_plain_name() {
        assert_eq!(serde_json::to_string(&RiskLevel::High).unwrap(), "\"High\"");
        assert_eq!(RiskLevel::Medium.to_string(), "Medium");
    }

    #[test]
    fn test_station_record_uses_camel_case_and_null_for_missing() {
        let record = StationRecord {
            id: "wl_1".to_string(),
            station_code: "NH-001".to_string(),
            lat: Some(26.18),
            lon: Some(91.73),
            district: "Kamrup Metro".to_string(),
            river_name: "Brahmaputra".to_string(),
            basin_name: "Brahmaputra".to_string(),
            rc_name: "Guwahati".to_string(),
            division_name: String::new(),
            sub_division_name: String::new(),
            station_type: String::new(),
            high_flow_level: Some(51.46),
            high_flow_level_date: String::new(),
            danger_flow_level: None,
            warning_flow_level: Some(48.68),
            current_flow_level: Some(47.1),
            observed_at: String::new(),
            risk_level: RiskLevel::Low,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["stationCode"], "NH-001");
        assert_eq!(json["riverName"], "Brahmaputra");
        assert!(json["dangerFlowLevel"].is_null());
        assert_eq!(json["riskLevel"], "Low");
    }

    #[test]
    fn test_short_row_error_message() {
        let err = FloodRiskError::ShortRow {
            line: 7,
            expected: 19,
            found: 4,
        };
        assert_eq!(
            err.to_string(),
            "Short row at line 7: expected at least 19 fields, found 4"
        );
    }
}
