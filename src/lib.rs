//! Flood-risk classification core for the Assam situational-awareness apps.
//!
//! - `ingest::gauge_csv` normalizes the government gauge table into
//!   `StationRecord`s, each with a risk tier from its flow-level ratio.
//! - `risk` maps rainfall / blockage / saturation sliders to a tier and an
//!   estimated water level, and fans one slider set out across basins.
//! - `analysis` and `verify` summarize and audit normalized snapshots.

pub mod analysis;
pub mod basins;
pub mod config;
pub mod ingest;
pub mod logging;
pub mod model;
pub mod numeric;
pub mod risk;
pub mod verify;

pub use ingest::gauge_csv::normalize_station;
pub use model::{
    FloodRiskError, Result, RiskAssessment, RiskLevel, SimulationParameters, StationRecord,
};
pub use risk::{assess, classify_risk, estimate_water_level, simulate_basins};
