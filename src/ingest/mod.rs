/// Input adapters.
///
/// Submodules:
/// - `gauge_csv` — government gauge station table → `StationRecord`s.

pub mod gauge_csv;
