//! Per-basin "what-if" fan-out.
//!
//! When simulation mode is toggled on the dashboard, one slider set is
//! spread across every basin with a bounded random perturbation so the
//! basins do not all show identical figures.
//!
//! # Randomness injection
//! The random source is a parameter, never `thread_rng()` inside the
//! module. Pass a seeded `ChaCha8Rng` for reproducible output; the result
//! is otherwise non-deterministic by design.

use std::ops::RangeInclusive;

use rand::Rng;
use serde::Serialize;

use crate::basins::Basin;
use crate::model::{RiskAssessment, SimulationParameters};
use crate::risk::classifier::assess;

// ---------------------------------------------------------------------------
// Jitter bounds
// ---------------------------------------------------------------------------

/// Multiplicative ranges applied to each slider per basin. Both ends are
/// inclusive, so `1.0..=1.0` turns a slider's jitter off.
#[derive(Debug, Clone, PartialEq)]
pub struct JitterBounds {
    pub rainfall: RangeInclusive<f64>,
    pub blockage: RangeInclusive<f64>,
    pub soil_saturation: RangeInclusive<f64>,
}

impl Default for JitterBounds {
    fn default() -> Self {
        Self {
            rainfall: 0.8..=1.2,
            blockage: 0.7..=1.3,
            soil_saturation: 0.9..=1.1,
        }
    }
}

/// Scales each parameter by an independent uniform factor from `bounds`.
pub fn jitter_parameters<R: Rng>(
    params: &SimulationParameters,
    bounds: &JitterBounds,
    rng: &mut R,
) -> SimulationParameters {
    SimulationParameters {
        rainfall: params.rainfall * rng.gen_range(bounds.rainfall.clone()),
        blockage: params.blockage * rng.gen_range(bounds.blockage.clone()),
        soil_saturation: params.soil_saturation * rng.gen_range(bounds.soil_saturation.clone()),
    }
}

// ---------------------------------------------------------------------------
// Fan-out
// ---------------------------------------------------------------------------

/// One basin's share of a simulation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulatedBasin {
    pub basin_id: String,
    pub basin_name: String,
    pub district: String,
    pub lat: f64,
    pub lon: f64,
    /// The jittered slider values this basin was classified with.
    pub parameters: SimulationParameters,
    #[serde(flatten)]
    pub assessment: RiskAssessment,
}

/// Classifies every basin against an independently jittered copy of
/// `params`, using the default jitter bounds.
///
/// Output order follows `basins`, which may be the whole registry or any
/// selection of `&Basin`s from it.
pub fn simulate_basins<'a, R: Rng>(
    basins: impl IntoIterator<Item = &'a Basin>,
    params: &SimulationParameters,
    rng: &mut R,
) -> Vec<SimulatedBasin> {
    simulate_basins_with(basins, params, &JitterBounds::default(), rng)
}

/// `simulate_basins` with explicit jitter bounds.
pub fn simulate_basins_with<'a, R: Rng>(
    basins: impl IntoIterator<Item = &'a Basin>,
    params: &SimulationParameters,
    bounds: &JitterBounds,
    rng: &mut R,
) -> Vec<SimulatedBasin> {
    basins
        .into_iter()
        .map(|basin| {
            let jittered = jitter_parameters(params, bounds, &mut *rng);
            SimulatedBasin {
                basin_id: basin.id.to_string(),
                basin_name: basin.name.to_string(),
                district: basin.district.to_string(),
                lat: basin.latitude,
                lon: basin.longitude,
                parameters: jittered,
                assessment: assess(&jittered),
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
