// mctwatch - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// No string-based error propagation; every error keeps its causal chain
// for diagnostic logging, and the GUI layer turns the Display text into
// a blocking alert.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all mctwatch operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum McTWatchError {
    /// Operator/device store access failed.
    Db(DbError),

    /// CSV ingestion failed.
    Load(LoadError),

    /// Report or export generation failed.
    Report(ReportError),

    /// I/O error with path context.
    Io {
        path: PathBuf,
        operation: &'static str,
        source: io::Error,
    },
}

impl fmt::Display for McTWatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Db(e) => write!(f, "Database error: {e}"),
            Self::Load(e) => write!(f, "CSV load error: {e}"),
            Self::Report(e) => write!(f, "Report error: {e}"),
            Self::Io {
                path,
                operation,
                source,
            } => write!(
                f,
                "I/O error during {operation} on '{}': {source}",
                path.display()
            ),
        }
    }
}

impl std::error::Error for McTWatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Db(e) => Some(e),
            Self::Load(e) => Some(e),
            Self::Report(e) => Some(e),
            Self::Io { source, .. } => Some(source),
        }
    }
}

// ---------------------------------------------------------------------------
// Database errors
// ---------------------------------------------------------------------------

/// Errors related to the operator/device store.
#[derive(Debug)]
pub enum DbError {
    /// The database file could not be opened.
    Open {
        path: PathBuf,
        source: rusqlite::Error,
    },

    /// The directory for the database file could not be created.
    CreateDir { path: PathBuf, source: io::Error },

    /// Schema creation failed on a fresh database file.
    Migrate { source: rusqlite::Error },

    /// One of the fixed statements failed.
    Query {
        statement: &'static str,
        source: rusqlite::Error,
    },
}

impl fmt::Display for DbError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open { path, source } => {
                write!(f, "cannot open database '{}': {source}", path.display())
            }
            Self::CreateDir { path, source } => {
                write!(
                    f,
                    "cannot create database directory '{}': {source}",
                    path.display()
                )
            }
            Self::Migrate { source } => {
                write!(f, "schema migration failed: {source}")
            }
            Self::Query { statement, source } => {
                write!(f, "query '{statement}' failed: {source}")
            }
        }
    }
}

impl std::error::Error for DbError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Open { source, .. } => Some(source),
            Self::CreateDir { source, .. } => Some(source),
            Self::Migrate { source } => Some(source),
            Self::Query { source, .. } => Some(source),
        }
    }
}

impl From<DbError> for McTWatchError {
    fn from(e: DbError) -> Self {
        Self::Db(e)
    }
}

// ---------------------------------------------------------------------------
// CSV load errors
// ---------------------------------------------------------------------------

/// Errors related to ingesting the fleet-system CSV export.
#[derive(Debug)]
pub enum LoadError {
    /// The csv crate rejected the file (malformed quoting, bad UTF-8, ...).
    Csv { path: PathBuf, source: csv::Error },

    /// One or more expected columns could not be resolved from the header.
    /// `columns` holds the logical names that had no fuzzy match.
    MissingColumns {
        path: PathBuf,
        columns: Vec<&'static str>,
    },

    /// The file holds more data rows than the accepted maximum.
    TooManyRows { path: PathBuf, max: usize },

    /// I/O error while reading the file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Csv { path, source } => {
                write!(f, "cannot parse '{}': {source}", path.display())
            }
            Self::MissingColumns { path, columns } => write!(
                f,
                "columns {columns:?} were not found in '{}'",
                path.display()
            ),
            Self::TooManyRows { path, max } => write!(
                f,
                "'{}' exceeds the maximum of {max} rows — is this the right export?",
                path.display()
            ),
            Self::Io { path, source } => {
                write!(f, "'{}': I/O error: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Csv { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<LoadError> for McTWatchError {
    fn from(e: LoadError) -> Self {
        Self::Load(e)
    }
}

// ---------------------------------------------------------------------------
// Report errors
// ---------------------------------------------------------------------------

/// Errors related to report generation and stale-list export.
#[derive(Debug)]
pub enum ReportError {
    /// The activity log does not exist yet (nothing has been recorded).
    LogNotFound { path: PathBuf },

    /// CSV serialisation error.
    Csv { path: PathBuf, source: csv::Error },

    /// I/O error reading the log or writing the report.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LogNotFound { path } => write!(
                f,
                "activity log '{}' not found — nothing has been recorded yet",
                path.display()
            ),
            Self::Csv { path, source } => {
                write!(f, "CSV write error '{}': {source}", path.display())
            }
            Self::Io { path, source } => {
                write!(f, "report I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ReportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Csv { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ReportError> for McTWatchError {
    fn from(e: ReportError) -> Self {
        Self::Report(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration loading.
///
/// Config failures are never fatal: `load_config` renders these into the
/// warning list it returns and the application starts on the defaults.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A config value is out of the allowed range.
    ValueOutOfRange {
        field: String,
        value: String,
        expected: String,
    },

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "config parse error '{}': {source}", path.display())
            }
            Self::ValueOutOfRange {
                field,
                value,
                expected,
            } => write!(
                f,
                "config '{field}' = '{value}' is out of range. Expected: {expected}"
            ),
            Self::Io { path, source } => {
                write!(f, "config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for mctwatch results.
pub type Result<T> = std::result::Result<T, McTWatchError>;
