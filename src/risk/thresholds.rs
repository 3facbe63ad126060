//! Station risk tier from gauge thresholds.
//!
//! A station's tier depends only on how close its current flow level is
//! to the government danger level. Warning and high flow levels are
//! carried on the record for display but do not feed the tier.

use crate::model::RiskLevel;
use crate::numeric::flow_ratio;

/// `current / danger` at or above this is `High`.
pub const HIGH_RATIO: f64 = 0.95;

/// `current / danger` at or above this (and below `HIGH_RATIO`) is `Medium`.
pub const MEDIUM_RATIO: f64 = 0.80;

/// Classifies a station from its current and danger flow levels.
///
/// Returns `Low` when either level is missing or the danger level is zero.
/// Absent danger data must never raise the tier.
pub fn classify_flow_level(current: Option<f64>, danger: Option<f64>) -> RiskLevel {
    match flow_ratio(current, danger) {
        Some(ratio) if ratio >= HIGH_RATIO => RiskLevel::High,
        Some(ratio) if ratio >= MEDIUM_RATIO => RiskLevel::Medium,
        _ => RiskLevel::Low,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // --- Ratio boundaries ---------------------------------------------------

    #[test]
    fn test_exactly_95_percent_of_danger_is_high() {
        assert_eq!(classify_flow_level(Some(9.5), Some(10.0)), RiskLevel::High);
    }

    #[test]
    fn test_just_below_95_percent_is_medium() {
        assert_eq!(classify_flow_level(Some(9.4999), Some(10.0)), RiskLevel::Medium);
    }

    #[test]
    fn test_exactly_80_percent_of_danger_is_medium() {
        assert_eq!(classify_flow_level(Some(8.0), Some(10.0)), RiskLevel::Medium);
    }

    #[test]
    fn test_just_below_80_percent_is_low() {
        assert_eq!(classify_flow_level(Some(7.9999), Some(10.0)), RiskLevel::Low);
    }

    #[test]
    fn test_above_danger_is_high() {
        assert_eq!(classify_flow_level(Some(52.3), Some(49.68)), RiskLevel::High);
    }

    #[test]
    fn test_zero_current_level_is_low() {
        assert_eq!(classify_flow_level(Some(0.0), Some(10.0)), RiskLevel::Low);
    }

    // --- Fail-safe ----------------------------------------------------------

    #[test]
    fn test_missing_danger_level_is_low() {
        assert_eq!(classify_flow_level(Some(100.0), None), RiskLevel::Low);
        assert_eq!(classify_flow_level(None, None), RiskLevel::Low);
    }

    #[test]
    fn test_missing_current_level_is_low() {
        assert_eq!(classify_flow_level(None, Some(10.0)), RiskLevel::Low);
    }

    #[test]
    fn test_zero_danger_level_is_low_not_infinite() {
        assert_eq!(classify_flow_level(Some(5.0), Some(0.0)), RiskLevel::Low);
        assert_eq!(classify_flow_level(Some(0.0), Some(0.0)), RiskLevel::Low);
    }
}
