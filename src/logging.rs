/// Structured logging for the flood-risk tools
///
/// Provides context-rich logging tagged with the emitting component and,
/// where relevant, a station code. Supports console output and append-only
/// file logging for batch runs.

use chrono::Utc;
use serde::Deserialize;
use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::sync::Mutex;

// ---------------------------------------------------------------------------
// Log Levels
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    #[serde(alias = "warn")]
    Warning,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warning => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
        }
    }
}

// ---------------------------------------------------------------------------
// Components
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
    Normalizer,
    Classifier,
    Simulation,
    Config,
    System,
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Component::Normalizer => write!(f, "GAUGE"),
            Component::Classifier => write!(f, "RISK"),
            Component::Simulation => write!(f, "SIM"),
            Component::Config => write!(f, "CFG"),
            Component::System => write!(f, "SYS"),
        }
    }
}

// ---------------------------------------------------------------------------
// Logger Configuration
// ---------------------------------------------------------------------------

/// Global logger instance. Nothing is emitted until `init_logger` runs.
static LOGGER: Mutex<Option<Logger>> = Mutex::new(None);

pub struct Logger {
    /// Minimum log level to display
    min_level: LogLevel,
    /// Optional file path for logging
    log_file: Option<String>,
    /// Whether to include timestamps in console output
    console_timestamps: bool,
}

impl Logger {
    /// Initialize the global logger
    pub fn init(min_level: LogLevel, log_file: Option<String>, console_timestamps: bool) {
        let logger = Logger {
            min_level,
            log_file,
            console_timestamps,
        };

        if let Ok(mut slot) = LOGGER.lock() {
            *slot = Some(logger);
        }
    }

    fn format_entry(
        level: LogLevel,
        component: Component,
        station: Option<&str>,
        message: &str,
    ) -> String {
        let timestamp = Utc::now().format("%Y-%m-%d %H:%M:%S UTC");
        let station_part = station.map(|s| format!(" [{}]", s)).unwrap_or_default();
        format!("{} {} {}{}: {}", timestamp, level, component, station_part, message)
    }

    fn log(&self, level: LogLevel, component: Component, station: Option<&str>, message: &str) {
        if level < self.min_level {
            return;
        }

        let log_entry = Self::format_entry(level, component, station, message);
        let station_part = station.map(|s| format!(" [{}]", s)).unwrap_or_default();

        // Console output goes to stderr so JSON on stdout stays clean.
        if self.console_timestamps {
            eprintln!("{}", log_entry);
        } else {
            match level {
                LogLevel::Error => eprintln!("   ✗ {}{}: {}", component, station_part, message),
                LogLevel::Warning => eprintln!("   ⚠ {}{}: {}", component, station_part, message),
                LogLevel::Info => eprintln!("   {}", message),
                LogLevel::Debug => {
                    eprintln!("   [DEBUG] {}{}: {}", component, station_part, message)
                }
            }
        }

        if let Some(ref path) = self.log_file {
            if let Err(e) = Self::append_to_file(path, &log_entry) {
                eprintln!("Failed to write to log file {}: {}", path, e);
            }
        }
    }

    fn append_to_file(path: &str, entry: &str) -> std::io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;
        writeln!(file, "{}", entry)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Public Logging Functions
// ---------------------------------------------------------------------------

/// Initialize the global logger
pub fn init_logger(min_level: LogLevel, log_file: Option<&str>, console_timestamps: bool) {
    Logger::init(min_level, log_file.map(String::from), console_timestamps);
}

/// Whether `init_logger` has run. Before that, every log call is dropped.
pub fn is_initialized() -> bool {
    LOGGER.lock().map(|slot| slot.is_some()).unwrap_or(false)
}

fn emit(level: LogLevel, component: Component, station: Option<&str>, message: &str) {
    if let Ok(guard) = LOGGER.lock() {
        if let Some(logger) = guard.as_ref() {
            logger.log(level, component, station, message);
        }
    }
}

/// Log a general informational message
pub fn info(component: Component, station: Option<&str>, message: &str) {
    emit(LogLevel::Info, component, station, message);
}

/// Log a warning message
pub fn warn(component: Component, station: Option<&str>, message: &str) {
    emit(LogLevel::Warning, component, station, message);
}

/// Log an error message
pub fn error(component: Component, station: Option<&str>, message: &str) {
    emit(LogLevel::Error, component, station, message);
}

/// Log a debug message
pub fn debug(component: Component, station: Option<&str>, message: &str) {
    emit(LogLevel::Debug, component, station, message);
}

// ---------------------------------------------------------------------------
// Run Summary Logging
// ---------------------------------------------------------------------------

/// Level for a normalization run summary: quiet when every row made it,
/// an error when none did.
pub fn ingest_summary_level(total: usize, normalized: usize, skipped: usize) -> LogLevel {
    if skipped == 0 {
        LogLevel::Info
    } else if normalized == 0 && total > 0 {
        LogLevel::Error
    } else {
        LogLevel::Warning
    }
}

/// Log a summary of a gauge table normalization run
pub fn log_ingest_summary(total: usize, normalized: usize, skipped: usize) {
    let message = format!(
        "Normalization complete: {}/{} rows normalized, {} skipped",
        normalized, total, skipped
    );
    emit(
        ingest_summary_level(total, normalized, skipped),
        Component::Normalizer,
        None,
        &message,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_ordering() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Warning);
        assert!(LogLevel::Warning < LogLevel::Error);
    }

    #[test]
    fn test_summary_level_classification() {
        assert_eq!(ingest_summary_level(10, 10, 0), LogLevel::Info);
        assert_eq!(ingest_summary_level(10, 7, 3), LogLevel::Warning);
        assert_eq!(ingest_summary_level(3, 0, 3), LogLevel::Error);
        assert_eq!(ingest_summary_level(0, 0, 0), LogLevel::Info);
    }

    #[test]
    fn test_entry_format_includes_component_and_station() {
        let entry = Logger::format_entry(
            LogLevel::Warning,
            Component::Normalizer,
            Some("NH-1"),
            "short row",
        );
        assert!(entry.ends_with("WARN GAUGE [NH-1]: short row"), "got {}", entry);
        assert!(entry.contains("UTC"));
    }

    #[test]
    fn test_logger_reports_initialized_after_init() {
        init_logger(LogLevel::Error, None, false);
        assert!(is_initialized());
    }

    #[test]
    fn test_level_parses_from_config_names() {
        #[derive(Deserialize)]
        struct Wrapper {
            level: LogLevel,
        }
        let w: Wrapper = toml::from_str("level = \"warn\"").unwrap();
        assert_eq!(w.level, LogLevel::Warning);
        let w: Wrapper = toml::from_str("level = \"error\"").unwrap();
        assert_eq!(w.level, LogLevel::Error);
    }
}
