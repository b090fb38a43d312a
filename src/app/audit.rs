// mctwatch - app/audit.rs
//
// Append-only activity log. Every operator-visible action (CSV load,
// disable submission) is recorded as one `timestamp - message` line; the
// "Generate report" action re-parses this file into CSV via core::report.
//
// This is deliberately a flat text file, not tracing output: the report
// format is part of the tool's contract and must not change when the
// diagnostic logging configuration does.

use crate::util::constants;
use crate::util::error::{McTWatchError, ReportError};
use chrono::Local;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Handle to the activity log file.
#[derive(Debug, Clone)]
pub struct AuditLog {
    path: PathBuf,
}

impl AuditLog {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one timestamped line. The parent directory is created on
    /// first use; no user action required.
    pub fn append(&self, message: &str) -> Result<(), McTWatchError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| McTWatchError::Io {
                path: parent.to_path_buf(),
                operation: "create audit directory",
                source: e,
            })?;
        }

        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| McTWatchError::Io {
                path: self.path.clone(),
                operation: "open audit log",
                source: e,
            })?;

        let timestamp = Local::now().format(constants::AUDIT_TIMESTAMP_FORMAT);
        writeln!(file, "{timestamp}{}{message}", constants::AUDIT_SEPARATOR).map_err(|e| {
            McTWatchError::Io {
                path: self.path.clone(),
                operation: "append audit line",
                source: e,
            }
        })?;

        tracing::debug!(path = %self.path.display(), "Audit line recorded");
        Ok(())
    }

    /// Record a disable submission: the operator's name and the pasted ids.
    /// Mirrors the line shape the report transform expects.
    pub fn record_disabled(&self, operator: &str, mcts: &[String]) -> Result<(), McTWatchError> {
        self.append(&format!(
            "MCTs desabilitados pelo usuário: {operator} [{}]",
            mcts.join(", ")
        ))
    }

    /// Record a completed CSV load.
    pub fn record_load(
        &self,
        operator: &str,
        file: &Path,
        kept: usize,
        stale: usize,
    ) -> Result<(), McTWatchError> {
        self.append(&format!(
            "Arquivo carregado por {operator}: {} ({kept} MCTs, {stale} sem sinal)",
            file.display()
        ))
    }

    /// Read the full log content for report generation.
    ///
    /// A missing file is reported as `LogNotFound` so the caller can show
    /// a meaningful alert rather than an I/O error.
    pub fn read_all(&self) -> Result<String, ReportError> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(ReportError::LogNotFound {
                path: self.path.clone(),
            }),
            Err(e) => Err(ReportError::Io {
                path: self.path.clone(),
                source: e,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_append_creates_file_and_parent() {
        let dir = TempDir::new().unwrap();
        let log = AuditLog::new(dir.path().join("nested").join("audit.log"));
        log.append("primeira mensagem").unwrap();

        let content = log.read_all().unwrap();
        assert!(content.contains(" - primeira mensagem"));
        assert_eq!(content.lines().count(), 1);
    }

    #[test]
    fn test_appends_accumulate() {
        let dir = TempDir::new().unwrap();
        let log = AuditLog::new(dir.path().join("audit.log"));
        log.append("uma").unwrap();
        log.append("duas").unwrap();
        assert_eq!(log.read_all().unwrap().lines().count(), 2);
    }

    #[test]
    fn test_lines_parse_back_through_report_transform() {
        let dir = TempDir::new().unwrap();
        let log = AuditLog::new(dir.path().join("audit.log"));
        log.record_disabled("Ana Souza", &["49332".to_string(), "50817".to_string()])
            .unwrap();

        let content = log.read_all().unwrap();
        let row = crate::core::report::parse_log_line(content.lines().next().unwrap())
            .expect("audit line must be report-parseable");
        // The transform trims the trailing ']' from the message tail.
        assert_eq!(
            row.message,
            "MCTs desabilitados pelo usuário: Ana Souza [49332, 50817"
        );
    }

    #[test]
    fn test_read_all_missing_file_is_log_not_found() {
        let dir = TempDir::new().unwrap();
        let log = AuditLog::new(dir.path().join("missing.log"));
        assert!(matches!(
            log.read_all(),
            Err(ReportError::LogNotFound { .. })
        ));
    }
}
