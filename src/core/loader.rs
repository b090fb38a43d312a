// mctwatch - core/loader.rs
//
// CSV ingestion of the fleet-system device export.
// Core layer: accepts Read trait objects, never touches the filesystem
// directly (the app layer opens the file picked in the dialog).
//
// The export is semicolon-delimited and its header wording drifts between
// fleet-system releases ("Número", "Número de Série", "Número MCT", ...),
// so columns are resolved by case-insensitive substring containment rather
// than exact names. The first matching header wins.

use crate::core::model::{DeviceRow, LoadSummary};
use crate::util::constants;
use crate::util::error::LoadError;
use chrono::NaiveDateTime;
use std::io::Read;
use std::path::Path;

/// Logical columns the pipeline needs, with the header needle that
/// identifies each. The short names are what a missing-column alert shows.
const EXPECTED_COLUMNS: &[(&str, &str)] = &[
    ("mct", constants::HEADER_NEEDLE_DEVICE),
    ("status", constants::HEADER_NEEDLE_STATUS),
    ("data", constants::HEADER_NEEDLE_LAST_SIGNAL),
];

/// Result of loading a device export.
#[derive(Debug)]
pub struct LoadResult {
    /// Rows that survived ingestion (all three fields non-empty).
    pub rows: Vec<DeviceRow>,

    /// Row accounting for the status bar and the audit line.
    pub summary: LoadSummary,
}

/// Resolved header positions for the three logical columns.
#[derive(Debug, Clone, Copy)]
struct ColumnMap {
    mct: usize,
    status: usize,
    last_signal: usize,
}

/// Load device rows from a semicolon-delimited export.
///
/// `path` is used only for error context. Rows with an empty id, status, or
/// last-signal field are counted as dropped, not errors — the export always
/// carries a tail of decommissioned devices with blank signal columns.
pub fn load_device_rows<R: Read>(reader: R, path: &Path) -> Result<LoadResult, LoadError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(constants::CSV_DELIMITER)
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| LoadError::Csv {
            path: path.to_path_buf(),
            source: e,
        })?
        .clone();

    let columns = resolve_columns(&headers, path)?;

    let mut rows = Vec::new();
    let mut summary = LoadSummary::default();

    for record in csv_reader.records() {
        let record = record.map_err(|e| LoadError::Csv {
            path: path.to_path_buf(),
            source: e,
        })?;
        summary.rows_read += 1;

        if summary.rows_read > constants::MAX_CSV_ROWS {
            return Err(LoadError::TooManyRows {
                path: path.to_path_buf(),
                max: constants::MAX_CSV_ROWS,
            });
        }

        // Short records cannot hold all resolved columns — drop them the
        // same way as rows with blank fields.
        let mct = record.get(columns.mct).unwrap_or("").trim();
        let status = record.get(columns.status).unwrap_or("").trim();
        let raw_last_signal = record.get(columns.last_signal).unwrap_or("").trim();

        if mct.is_empty() || status.is_empty() || raw_last_signal.is_empty() {
            summary.rows_dropped += 1;
            continue;
        }

        let last_signal =
            NaiveDateTime::parse_from_str(raw_last_signal, constants::LAST_SIGNAL_FORMAT).ok();

        rows.push(DeviceRow {
            mct: mct.to_string(),
            status: status.to_string(),
            raw_last_signal: raw_last_signal.to_string(),
            last_signal,
        });
        summary.rows_kept += 1;
    }

    tracing::info!(
        file = %path.display(),
        read = summary.rows_read,
        kept = summary.rows_kept,
        dropped = summary.rows_dropped,
        "Device export loaded"
    );

    Ok(LoadResult { rows, summary })
}

/// Resolve the three logical columns against the header row.
///
/// All missing columns are reported at once so the operator fixes the
/// export in a single round trip.
fn resolve_columns(headers: &csv::StringRecord, path: &Path) -> Result<ColumnMap, LoadError> {
    let mut resolved: [Option<usize>; 3] = [None; 3];
    let mut missing = Vec::new();

    for (slot, (logical, needle)) in EXPECTED_COLUMNS.iter().enumerate() {
        let found = headers
            .iter()
            .position(|h| h.to_lowercase().contains(needle));
        match found {
            Some(idx) => resolved[slot] = Some(idx),
            None => missing.push(*logical),
        }
    }

    if !missing.is_empty() {
        return Err(LoadError::MissingColumns {
            path: path.to_path_buf(),
            columns: missing,
        });
    }

    Ok(ColumnMap {
        mct: resolved[0].expect("resolved above"),
        status: resolved[1].expect("resolved above"),
        last_signal: resolved[2].expect("resolved above"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::path::PathBuf;

    fn load(content: &str) -> Result<LoadResult, LoadError> {
        load_device_rows(Cursor::new(content.to_string()), &PathBuf::from("test.csv"))
    }

    #[test]
    fn test_loads_semicolon_export() {
        let result = load(
            "Número;Situação;Último Sinal\n\
             49332;Ativo;01/03/2024 08:15\n\
             50817;Inativo;20/02/2024 17:40\n",
        )
        .unwrap();

        assert_eq!(result.rows.len(), 2);
        assert_eq!(result.summary.rows_read, 2);
        assert_eq!(result.summary.rows_kept, 2);
        assert_eq!(result.rows[0].mct, "49332");
        assert_eq!(result.rows[0].status, "Ativo");
        assert!(result.rows[0].last_signal.is_some());
    }

    #[test]
    fn test_fuzzy_header_resolution() {
        // Drifted header wording still resolves: containment, not equality.
        let result = load(
            "Número de Série;Situação Atual;Data do Último Sinal\n\
             49332;Ativo;01/03/2024 08:15\n",
        )
        .unwrap();
        assert_eq!(result.rows.len(), 1);
        assert_eq!(result.rows[0].mct, "49332");
    }

    #[test]
    fn test_header_resolution_is_case_insensitive() {
        let result = load(
            "NÚMERO;SITUAÇÃO;ÚLTIMO SINAL\n\
             49332;Ativo;01/03/2024 08:15\n",
        )
        .unwrap();
        assert_eq!(result.rows.len(), 1);
    }

    #[test]
    fn test_missing_columns_reported_together() {
        let err = load("Número;Qualquer\n49332;x\n").unwrap_err();
        match err {
            LoadError::MissingColumns { columns, .. } => {
                assert_eq!(columns, vec!["status", "data"]);
            }
            other => panic!("expected MissingColumns, got {other:?}"),
        }
    }

    #[test]
    fn test_blank_fields_drop_row() {
        let result = load(
            "Número;Situação;Último Sinal\n\
             49332;Ativo;01/03/2024 08:15\n\
             ;Ativo;01/03/2024 08:15\n\
             50817;;01/03/2024 08:15\n\
             50901;Ativo;\n",
        )
        .unwrap();

        assert_eq!(result.summary.rows_read, 4);
        assert_eq!(result.summary.rows_kept, 1);
        assert_eq!(result.summary.rows_dropped, 3);
    }

    #[test]
    fn test_short_record_drops_row() {
        let result = load(
            "Número;Situação;Último Sinal\n\
             49332;Ativo\n",
        )
        .unwrap();
        assert_eq!(result.summary.rows_dropped, 1);
        assert!(result.rows.is_empty());
    }

    #[test]
    fn test_unparseable_timestamp_kept_as_none() {
        let result = load(
            "Número;Situação;Último Sinal\n\
             49332;Ativo;2024-03-01T08:15:00\n",
        )
        .unwrap();
        assert_eq!(result.rows.len(), 1);
        assert!(result.rows[0].last_signal.is_none());
        assert_eq!(result.rows[0].raw_last_signal, "2024-03-01T08:15:00");
    }

    #[test]
    fn test_too_many_rows_is_an_error() {
        let mut content = String::from("Número;Situação;Último Sinal\n");
        for i in 0..=constants::MAX_CSV_ROWS {
            content.push_str(&format!("{i};Ativo;01/03/2024 08:15\n"));
        }
        let err = load(&content).unwrap_err();
        assert!(
            matches!(err, LoadError::TooManyRows { max, .. } if max == constants::MAX_CSV_ROWS),
            "expected TooManyRows, got {err:?}"
        );
    }

    #[test]
    fn test_column_order_does_not_matter() {
        let result = load(
            "Último Sinal;Número;Situação\n\
             01/03/2024 08:15;49332;Ativo\n",
        )
        .unwrap();
        assert_eq!(result.rows[0].mct, "49332");
        assert_eq!(result.rows[0].status, "Ativo");
    }
}
