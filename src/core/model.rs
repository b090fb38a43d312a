// mctwatch - core/model.rs
//
// Core data model types. Pure data definitions with no I/O, no UI,
// no platform dependencies.
//
// These types are the shared vocabulary across all layers.

use chrono::NaiveDateTime;
use serde::Serialize;

// =============================================================================
// Operator (result of the login lookup)
// =============================================================================

/// An operator record as fetched from the `operadores` table.
///
/// The stored password never leaves the db layer; what circulates through
/// app state after login is only this identifying subset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operator {
    /// Registration number ("matrícula") — the login identifier.
    pub matricula: String,

    /// Display name shown in the logged-in banner and audit lines.
    pub name: String,

    /// Role id. Only role "1" is allowed to log in.
    pub role: String,
}

// =============================================================================
// Device row (normalised output of CSV ingestion)
// =============================================================================

/// A single device-status row from the fleet-system export, after fuzzy
/// column resolution. This is what flows through the staleness pipeline.
#[derive(Debug, Clone, Serialize)]
pub struct DeviceRow {
    /// Device identifier (the "Número" column).
    pub mct: String,

    /// Status text (the "Situação" column), e.g. "Ativo", "Inativo".
    pub status: String,

    /// Raw last-signal text as it appeared in the file.
    pub raw_last_signal: String,

    /// Parsed last-signal timestamp (naive — the export carries no zone).
    /// `None` when the raw text does not match the export's date format;
    /// such rows are dropped by the pipeline before the cutoff comparison.
    pub last_signal: Option<NaiveDateTime>,
}

// =============================================================================
// Stale device (pipeline output)
// =============================================================================

/// A device whose last signal is older than the staleness cutoff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StaleDevice {
    /// Device identifier.
    pub mct: String,

    /// Last signal timestamp.
    pub last_signal: NaiveDateTime,
}

impl StaleDevice {
    /// One-line display form used by the results page.
    pub fn display_line(&self) -> String {
        format!(
            "MCT: {} Última-Data: {}",
            self.mct,
            self.last_signal.format(crate::util::constants::LAST_SIGNAL_FORMAT)
        )
    }
}

// =============================================================================
// Load summary
// =============================================================================

/// Row accounting for a completed CSV load, shown in the status bar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    /// Data rows read from the file (header excluded).
    pub rows_read: usize,

    /// Rows dropped for an empty id, status, or last-signal field,
    /// or because the record was too short to hold the resolved columns.
    pub rows_dropped: usize,

    /// Rows that entered the staleness pipeline.
    pub rows_kept: usize,
}

// =============================================================================
// Report row
// =============================================================================

/// One row of the activity report (`Data,Mensagem`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    /// Timestamp with the fractional seconds stripped.
    pub date: String,

    /// Message with surrounding square brackets trimmed.
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_stale_device_display_line_uses_export_format() {
        let device = StaleDevice {
            mct: "49332".to_string(),
            last_signal: NaiveDate::from_ymd_opt(2024, 3, 7)
                .unwrap()
                .and_hms_opt(14, 5, 0)
                .unwrap(),
        };
        assert_eq!(device.display_line(), "MCT: 49332 Última-Data: 07/03/2024 14:05");
    }
}
