/// Gauge station table normalizer.
///
/// Reads the government river/water-level gauge snapshot, a delimited
/// table with no usable header binding, and turns each row into a
/// `StationRecord` carrying its own risk tier.
///
/// Columns are positional. The reference snapshot's layout is captured in
/// `ColumnMap::default()`; a differently shaped export only needs a new
/// `[columns]` block in the config.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::logging::{self, Component};
use crate::model::{FloodRiskError, Result, StationRecord};
use crate::numeric::parse_float_or_none;
use crate::risk::thresholds::classify_flow_level;

/// Id prefix used by the mock API for water-level stations.
pub const DEFAULT_ID_PREFIX: &str = "wl_";

// ---------------------------------------------------------------------------
// Column mapping
// ---------------------------------------------------------------------------

/// Zero-based column index for every field the normalizer reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColumnMap {
    pub station_code: usize,
    pub lat: usize,
    pub lon: usize,
    pub district: usize,
    pub river_name: usize,
    pub basin_name: usize,
    pub rc_name: usize,
    pub division_name: usize,
    pub sub_division_name: usize,
    pub station_type: usize,
    pub high_flow_level: usize,
    pub high_flow_level_date: usize,
    pub danger_flow_level: usize,
    pub warning_flow_level: usize,
    pub current_flow_level: usize,
    pub observed_at: usize,
}

impl Default for ColumnMap {
    fn default() -> Self {
        ColumnMap {
            station_code: 0,
            lat: 2,
            lon: 3,
            district: 4,
            river_name: 6,
            basin_name: 7,
            rc_name: 9,
            division_name: 10,
            sub_division_name: 11,
            station_type: 12,
            high_flow_level: 13,
            high_flow_level_date: 14,
            danger_flow_level: 15,
            warning_flow_level: 16,
            current_flow_level: 17,
            observed_at: 18,
        }
    }
}

impl ColumnMap {
    fn indices(&self) -> [usize; 16] {
        [
            self.station_code,
            self.lat,
            self.lon,
            self.district,
            self.river_name,
            self.basin_name,
            self.rc_name,
            self.division_name,
            self.sub_division_name,
            self.station_type,
            self.high_flow_level,
            self.high_flow_level_date,
            self.danger_flow_level,
            self.warning_flow_level,
            self.current_flow_level,
            self.observed_at,
        ]
    }

    /// Fewest fields a row needs for every mapped column to exist.
    pub fn min_row_len(&self) -> usize {
        self.indices().iter().max().map_or(0, |max| max + 1)
    }
}

// ---------------------------------------------------------------------------
// Row normalization
// ---------------------------------------------------------------------------

/// Turns positional rows into station records.
#[derive(Debug, Clone, PartialEq)]
pub struct GaugeNormalizer {
    pub columns: ColumnMap,
    pub id_prefix: String,
}

impl Default for GaugeNormalizer {
    fn default() -> Self {
        Self {
            columns: ColumnMap::default(),
            id_prefix: DEFAULT_ID_PREFIX.to_string(),
        }
    }
}

impl GaugeNormalizer {
    pub fn new(columns: ColumnMap, id_prefix: impl Into<String>) -> Self {
        Self {
            columns,
            id_prefix: id_prefix.into(),
        }
    }

    /// Builds one record. Row shape is the caller's concern: a column the
    /// row does not reach reads as an empty cell.
    pub fn normalize_row(&self, fields: &[&str], sequence: u64) -> StationRecord {
        let c = &self.columns;
        let text = |idx: usize| fields.get(idx).map(|s| s.trim().to_string()).unwrap_or_default();
        let number = |idx: usize| fields.get(idx).and_then(|s| parse_float_or_none(s));

        let danger_flow_level = number(c.danger_flow_level);
        let current_flow_level = number(c.current_flow_level);

        StationRecord {
            id: format!("{}{}", self.id_prefix, sequence),
            station_code: text(c.station_code),
            lat: number(c.lat),
            lon: number(c.lon),
            district: text(c.district),
            river_name: text(c.river_name),
            basin_name: text(c.basin_name),
            rc_name: text(c.rc_name),
            division_name: text(c.division_name),
            sub_division_name: text(c.sub_division_name),
            station_type: text(c.station_type),
            high_flow_level: number(c.high_flow_level),
            high_flow_level_date: text(c.high_flow_level_date),
            danger_flow_level,
            warning_flow_level: number(c.warning_flow_level),
            current_flow_level,
            observed_at: text(c.observed_at),
            risk_level: classify_flow_level(current_flow_level, danger_flow_level),
        }
    }
}

/// Normalizes a row with the reference column layout and `wl_` ids.
pub fn normalize_station(fields: &[&str], sequence: u64) -> StationRecord {
    GaugeNormalizer::default().normalize_row(fields, sequence)
}

// ---------------------------------------------------------------------------
// Table reading
// ---------------------------------------------------------------------------

/// What to do with a row that is missing mapped columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShortRowPolicy {
    /// Drop the row, log a warning and count it.
    Skip,
    /// Abort the run with `FloodRiskError::ShortRow`.
    Error,
}

/// Reader settings, usually built from `Config::csv_options`.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvOptions {
    pub delimiter: u8,
    pub has_headers: bool,
    pub short_rows: ShortRowPolicy,
    pub id_prefix: String,
    /// Sequence number given to the first data row.
    pub first_sequence: u64,
    pub columns: ColumnMap,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            has_headers: true,
            short_rows: ShortRowPolicy::Skip,
            id_prefix: DEFAULT_ID_PREFIX.to_string(),
            first_sequence: 1,
            columns: ColumnMap::default(),
        }
    }
}

/// A row dropped under `ShortRowPolicy::Skip`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedRow {
    /// 1-based line in the source text.
    pub line: u64,
    pub sequence: u64,
    pub fields: usize,
}

/// Result of normalizing a whole table.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizeOutcome {
    pub records: Vec<StationRecord>,
    pub skipped: Vec<SkippedRow>,
}

/// Parses a gauge table held in memory.
///
/// Data rows are numbered from `options.first_sequence`; a skipped row
/// still consumes its number so ids stay tied to source rows. Rows whose
/// cells are all blank are ignored without consuming a number.
pub fn parse_gauge_csv(text: &str, options: &CsvOptions) -> Result<NormalizeOutcome> {
    let normalizer = GaugeNormalizer::new(options.columns.clone(), options.id_prefix.clone());
    let required = options.columns.min_row_len();

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(options.has_headers)
        .flexible(true)
        .trim(csv::Trim::None)
        .from_reader(text.as_bytes());

    let mut records = Vec::new();
    let mut skipped = Vec::new();
    let mut sequence = options.first_sequence;

    for result in reader.records() {
        let row = result?;
        if row.iter().all(|field| field.trim().is_empty()) {
            continue;
        }

        let line = row.position().map(|p| p.line()).unwrap_or(0);
        let fields: Vec<&str> = row.iter().collect();

        if fields.len() < required {
            match options.short_rows {
                ShortRowPolicy::Error => {
                    return Err(FloodRiskError::ShortRow {
                        line,
                        expected: required,
                        found: fields.len(),
                    });
                }
                ShortRowPolicy::Skip => {
                    logging::warn(
                        Component::Normalizer,
                        None,
                        &format!(
                            "skipping line {}: {} fields, need {}",
                            line,
                            fields.len(),
                            required
                        ),
                    );
                    skipped.push(SkippedRow {
                        line,
                        sequence,
                        fields: fields.len(),
                    });
                    sequence += 1;
                    continue;
                }
            }
        }

        let record = normalizer.normalize_row(&fields, sequence);
        logging::debug(
            Component::Normalizer,
            Some(&record.station_code),
            &format!("{} -> {}", record.id, record.risk_level),
        );
        records.push(record);
        sequence += 1;
    }

    logging::log_ingest_summary(records.len() + skipped.len(), records.len(), skipped.len());

    Ok(NormalizeOutcome { records, skipped })
}

/// Reads and parses a gauge table from disk.
pub fn read_gauge_csv<P: AsRef<Path>>(path: P, options: &CsvOptions) -> Result<NormalizeOutcome> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .map_err(|e| FloodRiskError::Io(format!("{}: {}", path.display(), e)))?;
    parse_gauge_csv(&text, options)
}

/// Serializes records as the pretty-printed JSON array the mock API serves.
pub fn station_json(records: &[StationRecord]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// Writes the JSON array to `path`, replacing any existing file.
pub fn write_station_json<P: AsRef<Path>>(path: P, records: &[StationRecord]) -> Result<()> {
    let json = station_json(records)?;
    let mut file = File::create(path.as_ref())?;
    writeln!(file, "{}", json)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
