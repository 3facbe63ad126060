/// TOML configuration for the flood-risk tools.
///
/// Every section and key is optional; `Config::default()` reproduces the
/// behaviour of the reference gauge snapshot (comma-delimited, header row,
/// fixed column positions, `wl_` ids numbered from 1, short rows skipped).
///
/// ```toml
/// [csv]
/// delimiter = ";"
/// short_rows = "error"
///
/// [columns]
/// current_flow_level = 20
///
/// [simulation]
/// seed = 42
///
/// [logging]
/// level = "debug"
/// file = "floodrisk.log"
/// ```

use serde::Deserialize;
use std::path::Path;

use crate::ingest::gauge_csv::{ColumnMap, CsvOptions, DEFAULT_ID_PREFIX, ShortRowPolicy};
use crate::logging::LogLevel;
use crate::model::{FloodRiskError, Result};

/// Environment variable naming a config file, read after `.env` is loaded.
pub const CONFIG_ENV_VAR: &str = "FLOODRISK_CONFIG";

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub csv: CsvSection,
    pub columns: ColumnMap,
    pub simulation: SimulationSection,
    pub logging: LoggingSection,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CsvSection {
    /// Single ASCII field separator.
    pub delimiter: char,
    pub has_headers: bool,
    pub short_rows: ShortRowPolicy,
    pub id_prefix: String,
    pub first_sequence: u64,
}

impl Default for CsvSection {
    fn default() -> Self {
        Self {
            delimiter: ',',
            has_headers: true,
            short_rows: ShortRowPolicy::Skip,
            id_prefix: DEFAULT_ID_PREFIX.to_string(),
            first_sequence: 1,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationSection {
    /// Fixed seed for the basin fan-out; `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl SimulationSection {
    /// Seed for a run: an explicit `--seed` wins, then the configured seed,
    /// then a fresh draw from OS entropy.
    pub fn resolve_seed(&self, explicit: Option<u64>) -> u64 {
        explicit.or(self.seed).unwrap_or_else(rand::random::<u64>)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingSection {
    pub level: LogLevel,
    pub file: Option<String>,
    pub timestamps: bool,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            file: None,
            timestamps: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

impl Config {
    /// Parses a configuration document.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Config = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| FloodRiskError::Io(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&text)
    }

    /// Resolves the config to use: an explicit path wins, then
    /// `FLOODRISK_CONFIG`, then built-in defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match std::env::var(CONFIG_ENV_VAR) {
            Ok(path) if !path.trim().is_empty() => Self::load(path.trim()),
            _ => Ok(Self::default()),
        }
    }

    /// Options for the gauge table reader, derived from `[csv]` and `[columns]`.
    pub fn csv_options(&self) -> CsvOptions {
        CsvOptions {
            // validate() guarantees an ASCII delimiter
            delimiter: self.csv.delimiter as u8,
            has_headers: self.csv.has_headers,
            short_rows: self.csv.short_rows,
            id_prefix: self.csv.id_prefix.clone(),
            first_sequence: self.csv.first_sequence,
            columns: self.columns.clone(),
        }
    }

    fn validate(&self) -> Result<()> {
        if !self.csv.delimiter.is_ascii() {
            return Err(FloodRiskError::Config(format!(
                "csv.delimiter must be a single ASCII character, got '{}'",
                self.csv.delimiter
            )));
        }
        if self.csv.delimiter == '"' {
            return Err(FloodRiskError::Config(
                "csv.delimiter cannot be the quote character".to_string(),
            ));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
