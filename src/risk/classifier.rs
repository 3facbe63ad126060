//! Risk tier and water level from the three simulation sliders.
//!
//! Tier and water level are computed independently; neither is derived
//! from the other. Inputs outside the slider ranges are evaluated as-is.

use crate::model::{RiskAssessment, RiskLevel, SimulationParameters};
use crate::numeric::round2;

// ---------------------------------------------------------------------------
// Rule constants
// ---------------------------------------------------------------------------

/// Extra mm/h of effective rainfall at 100% soil saturation.
pub const SATURATION_RAINFALL_BONUS: f64 = 20.0;

/// Effective rainfall above this is `High` regardless of blockage.
pub const EXTREME_RAINFALL: f64 = 150.0;

/// Effective rainfall above this is `High` when blockage exceeds `BLOCKAGE_HIGH`.
pub const HEAVY_RAINFALL: f64 = 100.0;

/// Effective rainfall above this is `High` when blockage exceeds `BLOCKAGE_EXTREME`.
pub const MODERATE_RAINFALL: f64 = 60.0;

/// Raw rainfall below this (with blockage below `BLOCKAGE_LOW`) is `Low`.
pub const LOW_RAINFALL: f64 = 30.0;

pub const BLOCKAGE_HIGH: f64 = 50.0;
pub const BLOCKAGE_EXTREME: f64 = 80.0;
pub const BLOCKAGE_LOW: f64 = 40.0;

/// Water-level multiplier on rainfall converted to m/h.
const LEVEL_PER_METRE_RAINFALL: f64 = 3.0;

/// Water-level amplification at 100% soil saturation.
const SATURATION_LEVEL_GAIN: f64 = 0.5;

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Rainfall adjusted upward for reduced absorption in saturated soil.
pub fn effective_rainfall(params: &SimulationParameters) -> f64 {
    params.rainfall + (params.soil_saturation / 100.0) * SATURATION_RAINFALL_BONUS
}

/// Maps slider values to a risk tier. First matching rule wins:
///
/// 1. effective rainfall > 100 and blockage > 50 → `High`
/// 2. effective rainfall > 150 → `High`
/// 3. blockage > 80 and effective rainfall > 60 → `High`
/// 4. raw rainfall < 30 and blockage < 40 → `Low`
/// 5. otherwise `Medium`
///
/// Rule 4 deliberately reads raw rainfall, not effective rainfall, so
/// saturation alone cannot lift a dry, well-drained basin out of `Low`.
pub fn classify_risk(params: &SimulationParameters) -> RiskLevel {
    let effective = effective_rainfall(params);
    let blockage = params.blockage;

    if effective > HEAVY_RAINFALL && blockage > BLOCKAGE_HIGH {
        RiskLevel::High
    } else if effective > EXTREME_RAINFALL {
        RiskLevel::High
    } else if blockage > BLOCKAGE_EXTREME && effective > MODERATE_RAINFALL {
        RiskLevel::High
    } else if params.rainfall < LOW_RAINFALL && blockage < BLOCKAGE_LOW {
        RiskLevel::Low
    } else {
        RiskLevel::Medium
    }
}

/// Estimated water level in metres, rounded to two decimals and never
/// negative.
///
/// `(rainfall / 1000) * 3`, scaled by `1 + blockage/100` and by
/// `1 + 0.5 * saturation/100`.
pub fn estimate_water_level(params: &SimulationParameters) -> f64 {
    let mut level = (params.rainfall / 1000.0) * LEVEL_PER_METRE_RAINFALL;
    level *= 1.0 + params.blockage / 100.0;
    level *= 1.0 + (params.soil_saturation / 100.0) * SATURATION_LEVEL_GAIN;
    // A zero product can carry a negative sign; report it as plain 0.0.
    if level > 0.0 { round2(level) } else { 0.0 }
}

/// Tier and water level for one parameter set.
pub fn assess(params: &SimulationParameters) -> RiskAssessment {
    RiskAssessment {
        risk_level: classify_risk(params),
        estimated_water_level: estimate_water_level(params),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
