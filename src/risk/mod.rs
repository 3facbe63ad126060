//! Risk classification.
//!
//! Submodules:
//! - `thresholds` — station tier from current vs. danger flow level.
//! - `classifier` — tier and water level from simulation sliders.
//! - `simulation` — per-basin jittered fan-out of the classifier.

pub mod classifier;
pub mod simulation;
pub mod thresholds;

pub use classifier::{assess, classify_risk, effective_rainfall, estimate_water_level};
pub use simulation::{JitterBounds, SimulatedBasin, jitter_parameters, simulate_basins};
pub use thresholds::classify_flow_level;
