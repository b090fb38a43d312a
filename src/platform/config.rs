// mctwatch - platform/config.rs
//
// Platform-specific path resolution and config.toml loading with startup
// validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::util::constants;
use crate::util::error::ConfigError;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths for mctwatch data and configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/mctwatch/ or %APPDATA%\mctwatch\)
    pub config_dir: PathBuf,

    /// Data directory: the activity log, the session file, and the default
    /// database location live here.
    pub data_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            let data_dir = proj_dirs.data_dir().to_path_buf();

            tracing::debug!(
                config = %config_dir.display(),
                data = %data_dir.display(),
                "Platform paths resolved"
            );

            Self {
                config_dir,
                data_dir,
            }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            let fallback = PathBuf::from(".");
            Self {
                config_dir: fallback.clone(),
                data_dir: fallback,
            }
        }
    }

    /// Activity log location.
    pub fn audit_log_path(&self) -> PathBuf {
        self.data_dir.join(constants::AUDIT_LOG_FILE_NAME)
    }

    /// Default database location (overridable via config or --db).
    pub fn default_db_path(&self) -> PathBuf {
        self.data_dir.join(constants::DB_FILE_NAME)
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility -- a newer
/// config file can be used with an older binary without crashing.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[database]` section.
    pub database: DatabaseSection,
    /// `[staleness]` section.
    pub staleness: StalenessSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[database]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    /// Path to the SQLite file holding the operadores/mcts extract.
    pub path: Option<String>,
}

/// `[staleness]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct StalenessSection {
    /// Days without a signal before a device counts as stale.
    pub days: Option<i64>,
    /// Substring a status must contain to count as in service.
    pub active_status: Option<String>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
}

/// Validated application configuration derived from `config.toml`.
///
/// All values are validated against named constants at load time.
/// Invalid values produce actionable warnings and fall back to defaults.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Database path override (None = platform default location).
    pub db_path: Option<PathBuf>,

    /// Staleness window in days.
    pub stale_days: i64,

    /// Active-status needle for the pipeline.
    pub active_status: String,

    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: None,
            stale_days: constants::DEFAULT_STALE_DAYS,
            active_status: constants::DEFAULT_ACTIVE_STATUS_NEEDLE.to_string(),
            log_level: None,
        }
    }
}

/// Load and validate `config.toml` from the given config directory.
///
/// Returns `AppConfig` with validated values and a list of non-fatal warnings.
/// If the file does not exist, returns defaults with no warnings (first-run).
/// If the file is unparseable, returns defaults with an error warning --
/// the application still starts but the user is informed.
pub fn load_config(config_dir: &Path) -> (AppConfig, Vec<String>) {
    let config_path = config_dir.join(constants::CONFIG_FILE_NAME);

    let mut warnings: Vec<String> = Vec::new();

    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "No config.toml found; using defaults");
        return (AppConfig::default(), warnings);
    }

    let raw = match read_raw_config(&config_path) {
        Ok(r) => r,
        Err(e) => {
            let msg = format!("{e}. Using defaults.");
            tracing::warn!("{}", msg);
            warnings.push(msg);
            return (AppConfig::default(), warnings);
        }
    };

    tracing::info!(path = %config_path.display(), "Loaded config.toml");

    // Validate each field against named constants, accumulating all errors.
    let mut config = AppConfig::default();

    // -- Database: path --
    if let Some(ref path) = raw.database.path {
        if path.is_empty() {
            warnings.push(out_of_range(
                "[database] path",
                path,
                "a non-empty path",
                "the platform default location",
            ));
        } else {
            config.db_path = Some(PathBuf::from(path));
        }
    }

    // -- Staleness: days --
    if let Some(days) = raw.staleness.days {
        if (constants::MIN_STALE_DAYS..=constants::MAX_STALE_DAYS).contains(&days) {
            config.stale_days = days;
        } else {
            warnings.push(out_of_range(
                "[staleness] days",
                &days.to_string(),
                &format!(
                    "{}-{}",
                    constants::MIN_STALE_DAYS,
                    constants::MAX_STALE_DAYS
                ),
                &constants::DEFAULT_STALE_DAYS.to_string(),
            ));
        }
    }

    // -- Staleness: active_status --
    if let Some(ref needle) = raw.staleness.active_status {
        if needle.trim().is_empty() {
            warnings.push(out_of_range(
                "[staleness] active_status",
                needle,
                "a non-empty substring (empty would match every row)",
                constants::DEFAULT_ACTIVE_STATUS_NEEDLE,
            ));
        } else {
            config.active_status = needle.clone();
        }
    }

    // -- Logging: level --
    if let Some(ref level) = raw.logging.level {
        let valid = ["error", "warn", "info", "debug", "trace"];
        if valid.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level.clone());
        } else {
            warnings.push(out_of_range(
                "[logging] level",
                level,
                "error, warn, info, debug, trace",
                constants::DEFAULT_LOG_LEVEL,
            ));
        }
    }

    if !warnings.is_empty() {
        tracing::warn!(count = warnings.len(), "Config validation produced warnings");
    }

    (config, warnings)
}

/// Read and parse `config.toml`, keeping the failure cause typed.
fn read_raw_config(config_path: &Path) -> Result<RawConfig, ConfigError> {
    let content = std::fs::read_to_string(config_path).map_err(|e| ConfigError::Io {
        path: config_path.to_path_buf(),
        source: e,
    })?;

    toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
        path: config_path.to_path_buf(),
        source: e,
    })
}

/// Render a value-validation failure into one warning line.
fn out_of_range(field: &str, value: &str, expected: &str, fallback: &str) -> String {
    let e = ConfigError::ValueOutOfRange {
        field: field.to_string(),
        value: value.to_string(),
        expected: expected.to_string(),
    };
    format!("{e}. Using {fallback}.")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, content: &str) {
        std::fs::write(dir.path().join(constants::CONFIG_FILE_NAME), content).unwrap();
    }

    #[test]
    fn test_missing_config_returns_defaults() {
        let dir = TempDir::new().unwrap();
        let (config, warnings) = load_config(dir.path());
        assert!(warnings.is_empty());
        assert_eq!(config.stale_days, constants::DEFAULT_STALE_DAYS);
        assert_eq!(config.active_status, constants::DEFAULT_ACTIVE_STATUS_NEEDLE);
        assert!(config.db_path.is_none());
    }

    #[test]
    fn test_valid_config_is_applied() {
        let dir = TempDir::new().unwrap();
        write_config(
            &dir,
            "[database]\npath = \"/srv/extract.db\"\n\
             [staleness]\ndays = 30\nactive_status = \"Operacional\"\n\
             [logging]\nlevel = \"debug\"\n",
        );
        let (config, warnings) = load_config(dir.path());
        assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
        assert_eq!(config.db_path, Some(PathBuf::from("/srv/extract.db")));
        assert_eq!(config.stale_days, 30);
        assert_eq!(config.active_status, "Operacional");
        assert_eq!(config.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_out_of_range_days_warns_and_falls_back() {
        let dir = TempDir::new().unwrap();
        write_config(&dir, "[staleness]\ndays = 0\n");
        let (config, warnings) = load_config(dir.path());
        assert_eq!(config.stale_days, constants::DEFAULT_STALE_DAYS);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("days"));
    }

    #[test]
    fn test_out_of_range_warning_names_field_and_range() {
        let dir = TempDir::new().unwrap();
        write_config(&dir, "[staleness]\ndays = 9999\n");
        let (_, warnings) = load_config(dir.path());
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("[staleness] days"), "{}", warnings[0]);
        assert!(warnings[0].contains("9999"), "{}", warnings[0]);
        assert!(warnings[0].contains("1-365"), "{}", warnings[0]);
    }

    #[test]
    fn test_empty_active_status_warns_and_falls_back() {
        let dir = TempDir::new().unwrap();
        write_config(&dir, "[staleness]\nactive_status = \"  \"\n");
        let (config, warnings) = load_config(dir.path());
        assert_eq!(config.active_status, constants::DEFAULT_ACTIVE_STATUS_NEEDLE);
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_malformed_toml_warns_and_uses_defaults() {
        let dir = TempDir::new().unwrap();
        write_config(&dir, "not [valid toml ===");
        let (config, warnings) = load_config(dir.path());
        assert_eq!(config.stale_days, constants::DEFAULT_STALE_DAYS);
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let dir = TempDir::new().unwrap();
        write_config(&dir, "[future_section]\nkey = 1\n[staleness]\ndays = 20\n");
        let (config, warnings) = load_config(dir.path());
        assert!(warnings.is_empty());
        assert_eq!(config.stale_days, 20);
    }
}
