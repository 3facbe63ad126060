/// Grouping and tallying helpers behind the dashboard summary cards.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::model::{RiskLevel, StationRecord};
use crate::risk::simulation::SimulatedBasin;

/// Count of entries per risk tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RiskSummary {
    pub total: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl RiskSummary {
    pub fn add(&mut self, level: RiskLevel) {
        self.total += 1;
        match level {
            RiskLevel::High => self.high += 1,
            RiskLevel::Medium => self.medium += 1,
            RiskLevel::Low => self.low += 1,
        }
    }

    pub fn from_levels<I: IntoIterator<Item = RiskLevel>>(levels: I) -> Self {
        let mut summary = Self::default();
        for level in levels {
            summary.add(level);
        }
        summary
    }

    /// Highest tier present, or `None` for an empty summary.
    pub fn worst(&self) -> Option<RiskLevel> {
        if self.high > 0 {
            Some(RiskLevel::High)
        } else if self.medium > 0 {
            Some(RiskLevel::Medium)
        } else if self.low > 0 {
            Some(RiskLevel::Low)
        } else {
            None
        }
    }
}

/// Tier counts over normalized stations.
pub fn summarize_stations(records: &[StationRecord]) -> RiskSummary {
    RiskSummary::from_levels(records.iter().map(|r| r.risk_level))
}

/// Tier counts over a simulation run.
pub fn summarize_basins(results: &[SimulatedBasin]) -> RiskSummary {
    RiskSummary::from_levels(results.iter().map(|r| r.assessment.risk_level))
}

/// Groups stations by district, preserving input order within a group.
/// Stations with a blank district land under `""`.
pub fn group_by_district(records: &[StationRecord]) -> BTreeMap<&str, Vec<&StationRecord>> {
    let mut groups: BTreeMap<&str, Vec<&StationRecord>> = BTreeMap::new();
    for record in records {
        groups.entry(record.district.as_str()).or_default().push(record);
    }
    groups
}

/// Groups stations by basin name, preserving input order within a group.
pub fn group_by_basin(records: &[StationRecord]) -> BTreeMap<&str, Vec<&StationRecord>> {
    let mut groups: BTreeMap<&str, Vec<&StationRecord>> = BTreeMap::new();
    for record in records {
        groups.entry(record.basin_name.as_str()).or_default().push(record);
    }
    groups
}

/// Per-district tier counts.
pub fn district_summaries(records: &[StationRecord]) -> BTreeMap<&str, RiskSummary> {
    group_by_district(records)
        .into_iter()
        .map(|(district, stations)| {
            let summary = RiskSummary::from_levels(stations.iter().map(|s| s.risk_level));
            (district, summary)
        })
        .collect()
}

/// Stations at `level` or above, most severe first; ties keep input order.
pub fn stations_at_or_above(records: &[StationRecord], level: RiskLevel) -> Vec<&StationRecord> {
    let mut selected: Vec<&StationRecord> =
        records.iter().filter(|r| r.risk_level >= level).collect();
    selected.sort_by(|a, b| b.risk_level.cmp(&a.risk_level));
    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::gauge_csv::normalize_station;

    fn station(
        code: &str,
        district: &str,
        basin: &str,
        danger: &str,
        current: &str,
    ) -> StationRecord {
        let mut fields = vec![""; 19];
        fields[0] = code;
        fields[4] = district;
        fields[7] = basin;
        fields[15] = danger;
        fields[17] = current;
        normalize_station(&fields, 1)
    }

    fn sample() -> Vec<StationRecord> {
        vec![
            station("A", "Cachar", "Barak", "10", "2"),     // Low
            station("B", "Dibrugarh", "Brahmaputra", "10", "9.7"), // High
            station("C", "Cachar", "Barak", "10", "8.5"),   // Medium
            station("D", "Dibrugarh", "Brahmaputra", "", "9"), // Low, no danger level
            station("E", "Nagaon", "Kopili", "10", "11"),   // High
        ]
    }

    #[test]
    fn test_summary_counts_each_tier() {
        let summary = summarize_stations(&sample());
        assert_eq!(
            summary,
            RiskSummary {
                total: 5,
                high: 2,
                medium: 1,
                low: 2
            }
        );
        assert_eq!(summary.worst(), Some(RiskLevel::High));
    }

    #[test]
    fn test_empty_summary_has_no_worst_tier() {
        let summary = summarize_stations(&[]);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.worst(), None);
    }

    #[test]
    fn test_group_by_district_is_sorted_and_order_preserving() {
        let records = sample();
        let groups = group_by_district(&records);
        let districts: Vec<_> = groups.keys().copied().collect();
        assert_eq!(districts, vec!["Cachar", "Dibrugarh", "Nagaon"]);
        let cachar: Vec<_> = groups["Cachar"].iter().map(|s| s.station_code.as_str()).collect();
        assert_eq!(cachar, vec!["A", "C"]);
    }

    #[test]
    fn test_group_by_basin() {
        let records = sample();
        let groups = group_by_basin(&records);
        assert_eq!(groups["Brahmaputra"].len(), 2);
        assert_eq!(groups["Kopili"].len(), 1);
    }

    #[test]
    fn test_district_summaries() {
        let records = sample();
        let summaries = district_summaries(&records);
        assert_eq!(summaries["Cachar"].medium, 1);
        assert_eq!(summaries["Cachar"].low, 1);
        assert_eq!(summaries["Dibrugarh"].worst(), Some(RiskLevel::High));
    }

    #[test]
    fn test_stations_at_or_above_sorts_most_severe_first() {
        let records = sample();
        let urgent = stations_at_or_above(&records, RiskLevel::Medium);
        let codes: Vec<_> = urgent.iter().map(|s| s.station_code.as_str()).collect();
        assert_eq!(codes, vec!["B", "E", "C"]);
    }
}
