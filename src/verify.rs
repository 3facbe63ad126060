//! Gauge Dataset Verification Module
//!
//! Checks a normalized station snapshot for gaps that silently weaken the
//! risk tiers: stations without a usable danger level always read `Low`,
//! and duplicate station codes make the mock API ambiguous.
//!
//! Run this before publishing a new snapshot to the apps.

use chrono::Utc;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::ingest::gauge_csv::{NormalizeOutcome, SkippedRow};
use crate::model::StationRecord;

// ============================================================================
// Verification Results
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationReport {
    pub timestamp: String,
    pub status: VerificationStatus,
    pub summary: VerificationSummary,
    pub missing_danger_level: Vec<String>,
    pub missing_current_level: Vec<String>,
    pub zero_danger_level: Vec<String>,
    pub missing_coordinates: Vec<String>,
    pub warning_above_danger: Vec<String>,
    pub duplicate_station_codes: Vec<DuplicateStationCode>,
    /// Source rows the normalizer dropped for missing columns.
    pub skipped_rows: Vec<SkippedRow>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationSummary {
    pub total_stations: usize,
    /// Stations whose tier is computed from real levels rather than the
    /// `Low` fallback.
    pub classifiable: usize,
    pub unclassifiable: usize,
}

/// One station code used by more than one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateStationCode {
    pub station_code: String,
    /// Record ids sharing the code, in input order.
    pub ids: Vec<String>,
    /// Distinct districts the code appears in, sorted.
    pub districts: Vec<String>,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum VerificationStatus {
    /// Every station can be classified.
    Success,
    /// Some stations fall back to `Low`, or some source rows were skipped.
    PartialSuccess,
    /// No station can be classified (or the snapshot is empty).
    Failed,
}

// ============================================================================
// Verification
// ============================================================================

pub fn verify_stations(records: &[StationRecord]) -> VerificationReport {
    let mut report = VerificationReport {
        timestamp: Utc::now().to_rfc3339(),
        status: VerificationStatus::Failed,
        summary: VerificationSummary {
            total_stations: records.len(),
            ..VerificationSummary::default()
        },
        missing_danger_level: Vec::new(),
        missing_current_level: Vec::new(),
        zero_danger_level: Vec::new(),
        missing_coordinates: Vec::new(),
        warning_above_danger: Vec::new(),
        duplicate_station_codes: Vec::new(),
        skipped_rows: Vec::new(),
    };

    for record in records {
        let mut classifiable = true;

        match record.danger_flow_level {
            None => {
                report.missing_danger_level.push(record.id.clone());
                classifiable = false;
            }
            Some(d) if d == 0.0 => {
                report.zero_danger_level.push(record.id.clone());
                classifiable = false;
            }
            Some(_) => {}
        }

        if record.current_flow_level.is_none() {
            report.missing_current_level.push(record.id.clone());
            classifiable = false;
        }

        if record.lat.is_none() || record.lon.is_none() {
            report.missing_coordinates.push(record.id.clone());
        }

        if let (Some(warning), Some(danger)) =
            (record.warning_flow_level, record.danger_flow_level)
        {
            if warning > danger {
                report.warning_above_danger.push(record.id.clone());
            }
        }

        if classifiable {
            report.summary.classifiable += 1;
        } else {
            report.summary.unclassifiable += 1;
        }
    }

    report.duplicate_station_codes = find_duplicate_codes(records);

    report.status = if report.summary.classifiable == 0 {
        VerificationStatus::Failed
    } else if report.summary.unclassifiable == 0 {
        VerificationStatus::Success
    } else {
        VerificationStatus::PartialSuccess
    };

    report
}

/// Verifies a whole normalization run. Skipped rows are listed in the
/// report and keep an otherwise clean snapshot at `PartialSuccess`.
pub fn verify_outcome(outcome: &NormalizeOutcome) -> VerificationReport {
    let mut report = verify_stations(&outcome.records);
    report.skipped_rows = outcome.skipped.clone();
    if !report.skipped_rows.is_empty() && report.status == VerificationStatus::Success {
        report.status = VerificationStatus::PartialSuccess;
    }
    report
}

fn find_duplicate_codes(records: &[StationRecord]) -> Vec<DuplicateStationCode> {
    let mut by_code: BTreeMap<&str, Vec<&StationRecord>> = BTreeMap::new();
    for record in records.iter().filter(|r| !r.station_code.is_empty()) {
        by_code.entry(record.station_code.as_str()).or_default().push(record);
    }

    by_code
        .into_iter()
        .filter(|(_, group)| group.len() > 1)
        .map(|(code, group)| {
            let mut districts: Vec<String> = group.iter().map(|r| r.district.clone()).collect();
            districts.sort();
            districts.dedup();
            DuplicateStationCode {
                station_code: code.to_string(),
                ids: group.iter().map(|r| r.id.clone()).collect(),
                districts,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::gauge_csv::normalize_station;

    fn station(
        seq: u64,
        code: &str,
        district: &str,
        danger: &str,
        warning: &str,
        current: &str,
    ) -> StationRecord {
        let mut fields = vec![""; 19];
        fields[0] = code;
        fields[2] = "26.1";
        fields[3] = "91.7";
        fields[4] = district;
        fields[15] = danger;
        fields[16] = warning;
        fields[17] = current;
        normalize_station(&fields, seq)
    }

    #[test]
    fn test_complete_snapshot_is_success() {
        let records = vec![
            station(1, "A", "Cachar", "10", "9", "5"),
            station(2, "B", "Nagaon", "20", "19", "19.5"),
        ];
        let report = verify_stations(&records);
        assert_eq!(report.status, VerificationStatus::Success);
        assert_eq!(report.summary.classifiable, 2);
        assert!(report.missing_danger_level.is_empty());
        assert!(report.duplicate_station_codes.is_empty());
    }

    #[test]
    fn test_gaps_are_reported_by_id() {
        let records = vec![
            station(1, "A", "Cachar", "", "9", "5"),
            station(2, "B", "Nagaon", "0", "", "5"),
            station(3, "C", "Nagaon", "10", "12", ""),
            station(4, "D", "Nagaon", "10", "9", "8"),
        ];
        let report = verify_stations(&records);
        assert_eq!(report.status, VerificationStatus::PartialSuccess);
        assert_eq!(report.missing_danger_level, vec!["wl_1"]);
        assert_eq!(report.zero_danger_level, vec!["wl_2"]);
        assert_eq!(report.missing_current_level, vec!["wl_3"]);
        assert_eq!(report.warning_above_danger, vec!["wl_3"]);
        assert_eq!(report.summary.classifiable, 1);
        assert_eq!(report.summary.unclassifiable, 3);
    }

    #[test]
    fn test_duplicate_codes_list_ids_and_districts() {
        let records = vec![
            station(1, "KM-1", "Kamrup", "10", "9", "5"),
            station(2, "KM-1", "Cachar", "10", "9", "5"),
            station(3, "KM-1", "Kamrup", "10", "9", "5"),
            station(4, "ZZ-9", "Kamrup", "10", "9", "5"),
        ];
        let report = verify_stations(&records);
        assert_eq!(
            report.duplicate_station_codes,
            vec![DuplicateStationCode {
                station_code: "KM-1".to_string(),
                ids: vec!["wl_1".to_string(), "wl_2".to_string(), "wl_3".to_string()],
                districts: vec!["Cachar".to_string(), "Kamrup".to_string()],
            }]
        );
    }

    #[test]
    fn test_empty_snapshot_fails() {
        let report = verify_stations(&[]);
        assert_eq!(report.status, VerificationStatus::Failed);
        assert_eq!(report.summary.total_stations, 0);
    }

    #[test]
    fn test_report_serializes() {
        let report = verify_stations(&[station(1, "A", "Cachar", "10", "9", "5")]);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["status"], "Success");
        assert_eq!(json["summary"]["totalStations"], 1);
        assert!(json["duplicateStationCodes"].is_array());
        assert!(json["skippedRows"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_skipped_rows_are_reported_and_downgrade_success() {
        let outcome = NormalizeOutcome {
            records: vec![station(1, "A", "Cachar", "10", "9", "5")],
            skipped: vec![SkippedRow {
                line: 3,
                sequence: 2,
                fields: 4,
            }],
        };
        let report = verify_outcome(&outcome);
        assert_eq!(report.status, VerificationStatus::PartialSuccess);
        assert_eq!(report.skipped_rows, outcome.skipped);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["skippedRows"][0]["line"], 3);
        assert_eq!(json["skippedRows"][0]["sequence"], 2);
    }

    #[test]
    fn test_outcome_without_records_still_fails() {
        let outcome = NormalizeOutcome {
            records: Vec::new(),
            skipped: vec![SkippedRow {
                line: 2,
                sequence: 1,
                fields: 1,
            }],
        };
        assert_eq!(verify_outcome(&outcome).status, VerificationStatus::Failed);
    }
}
