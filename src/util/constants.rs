// mctwatch - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "mctwatch";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "mctwatch";

/// Current application version (updated by release script).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Staleness pipeline
// =============================================================================

/// Default number of days without a signal before a device counts as stale.
pub const DEFAULT_STALE_DAYS: i64 = 15;

/// Minimum user-configurable staleness window in days.
pub const MIN_STALE_DAYS: i64 = 1;

/// Maximum user-configurable staleness window in days.
pub const MAX_STALE_DAYS: i64 = 365;

/// Substring (case-insensitive) a status value must contain for the device
/// to count as in service. Export status values are Portuguese ("Ativo",
/// "Inativo", "Ativo - manutenção", ...).
pub const DEFAULT_ACTIVE_STATUS_NEEDLE: &str = "Ativo";

// =============================================================================
// CSV ingestion
// =============================================================================

/// Field delimiter used by the fleet-system CSV export.
pub const CSV_DELIMITER: u8 = b';';

/// Header needles for fuzzy column resolution. The first header whose text
/// case-insensitively contains the needle wins.
pub const HEADER_NEEDLE_DEVICE: &str = "número";
pub const HEADER_NEEDLE_STATUS: &str = "situação";
pub const HEADER_NEEDLE_LAST_SIGNAL: &str = "último sinal";

/// chrono format of the "Último Sinal" column in the export.
pub const LAST_SIGNAL_FORMAT: &str = "%d/%m/%Y %H:%M";

/// Maximum number of data rows accepted from a single CSV file. The export
/// covers one fleet (a few thousand devices); anything beyond this is the
/// wrong file, not a bigger fleet.
pub const MAX_CSV_ROWS: usize = 100_000;

// =============================================================================
// Activity log & reports
// =============================================================================

/// Activity log file name (stored in the platform data directory).
pub const AUDIT_LOG_FILE_NAME: &str = "mctwatch.log";

/// chrono format of the timestamp prefixing each activity-log line.
/// The report transform strips the fractional part.
pub const AUDIT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Separator between the timestamp and the message in an activity-log line.
pub const AUDIT_SEPARATOR: &str = " - ";

/// Default file name offered for the generated activity report.
pub const REPORT_FILE_NAME: &str = "MCTs_report.csv";

/// Default file name offered when exporting the stale-device list.
pub const STALE_EXPORT_FILE_NAME: &str = "mcts_stale.csv";

// =============================================================================
// Database
// =============================================================================

/// Default database file name (stored in the platform data directory).
pub const DB_FILE_NAME: &str = "mctwatch.db";

/// Operator role id allowed to log in (dispatcher role in the fleet schema).
pub const OPERATOR_ROLE_ALLOWED: &str = "1";

// =============================================================================
// UI defaults
// =============================================================================

/// Maximum device ids accepted in a single disable submission.
pub const MAX_DISABLE_LINES: usize = 10_000;

/// Initial window size.
pub const WINDOW_WIDTH: f32 = 520.0;
pub const WINDOW_HEIGHT: f32 = 560.0;

// =============================================================================
// Logging
// =============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Session persistence file name (stored in the platform data directory).
pub const SESSION_FILE_NAME: &str = "session.json";
