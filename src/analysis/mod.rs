/// Data organization utilities for the flood-risk dashboard.
///
/// This module provides grouping and tallying helpers over normalized
/// station records and simulated basins. Rendering is left to the apps.
///
/// Submodules:
/// - `groupings` — per-district / per-basin grouping and risk tallies.

pub mod groupings;
