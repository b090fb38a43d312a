// mctwatch - core/report.rs
//
// CSV outputs: the stale-device list export and the activity-log report.
// Core layer: writes to any Write trait object; the app layer owns the
// destination files.

use crate::core::model::{ReportRow, StaleDevice};
use crate::util::constants;
use crate::util::error::ReportError;
use std::io::Write;
use std::path::Path;

/// Export the stale-device list to CSV.
///
/// Writes: mct, ultimo_sinal (in the export's own date format).
pub fn export_stale_csv<W: Write>(
    devices: &[StaleDevice],
    writer: W,
    export_path: &Path,
) -> Result<usize, ReportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record(["mct", "ultimo_sinal"])
        .map_err(|e| ReportError::Csv {
            path: export_path.to_path_buf(),
            source: e,
        })?;

    let mut count = 0;
    for device in devices {
        csv_writer
            .write_record([
                device.mct.as_str(),
                &device
                    .last_signal
                    .format(constants::LAST_SIGNAL_FORMAT)
                    .to_string(),
            ])
            .map_err(|e| ReportError::Csv {
                path: export_path.to_path_buf(),
                source: e,
            })?;
        count += 1;
    }

    csv_writer.flush().map_err(|e| ReportError::Io {
        path: export_path.to_path_buf(),
        source: e,
    })?;

    Ok(count)
}

/// Parse one activity-log line into a report row.
///
/// Lines are `<timestamp><" - "><message>`. The timestamp's fractional
/// seconds are stripped (everything from the first '.'), and one pair of
/// surrounding square brackets is trimmed from the message. Lines without
/// the separator yield `None` and are skipped by the caller.
pub fn parse_log_line(line: &str) -> Option<ReportRow> {
    let (date_part, message_part) = line.split_once(constants::AUDIT_SEPARATOR)?;

    let date = date_part
        .split('.')
        .next()
        .unwrap_or(date_part)
        .trim()
        .to_string();

    let message = message_part
        .trim()
        .trim_start_matches('[')
        .trim_end_matches(']')
        .to_string();

    Some(ReportRow { date, message })
}

/// Transform the activity log into the `Data,Mensagem` report.
///
/// `log_content` is the full text of the activity log; `report_path` is
/// used only for error context. Returns the number of rows written.
pub fn report_from_log<W: Write>(
    log_content: &str,
    writer: W,
    report_path: &Path,
) -> Result<usize, ReportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record(["Data", "Mensagem"])
        .map_err(|e| ReportError::Csv {
            path: report_path.to_path_buf(),
            source: e,
        })?;

    let mut count = 0;
    for line in log_content.lines() {
        let Some(row) = parse_log_line(line) else {
            continue;
        };
        csv_writer
            .write_record([row.date.as_str(), row.message.as_str()])
            .map_err(|e| ReportError::Csv {
                path: report_path.to_path_buf(),
                source: e,
            })?;
        count += 1;
    }

    csv_writer.flush().map_err(|e| ReportError::Io {
        path: report_path.to_path_buf(),
        source: e,
    })?;

    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::path::PathBuf;

    fn device(mct: &str) -> StaleDevice {
        StaleDevice {
            mct: mct.to_string(),
            last_signal: NaiveDate::from_ymd_opt(2024, 2, 20)
                .unwrap()
                .and_hms_opt(17, 40, 0)
                .unwrap(),
        }
    }

    #[test]
    fn test_stale_export_writes_header_and_rows() {
        let mut buf = Vec::new();
        let count =
            export_stale_csv(&[device("49332"), device("50817")], &mut buf, &PathBuf::from("out.csv"))
                .unwrap();
        assert_eq!(count, 2);

        let output = String::from_utf8(buf).unwrap();
        assert!(output.starts_with("mct,ultimo_sinal"));
        assert!(output.contains("49332,20/02/2024 17:40"));
        assert!(output.contains("50817,20/02/2024 17:40"));
    }

    #[test]
    fn test_parse_log_line_strips_fraction_and_brackets() {
        let row = parse_log_line(
            "2024-03-07 14:05:12.345 - [MCTs desabilitados pelo operador Ana: 49332, 50817]",
        )
        .unwrap();
        assert_eq!(row.date, "2024-03-07 14:05:12");
        assert_eq!(
            row.message,
            "MCTs desabilitados pelo operador Ana: 49332, 50817"
        );
    }

    #[test]
    fn test_parse_log_line_without_separator_is_none() {
        assert!(parse_log_line("a bare continuation line").is_none());
        assert!(parse_log_line("").is_none());
    }

    #[test]
    fn test_parse_log_line_without_fraction_keeps_date() {
        let row = parse_log_line("2024-03-07 14:05:12 - carga concluída").unwrap();
        assert_eq!(row.date, "2024-03-07 14:05:12");
        assert_eq!(row.message, "carga concluída");
    }

    #[test]
    fn test_report_from_log_skips_unparseable_lines() {
        let log = "2024-03-07 14:05:12.001 - primeira mensagem\n\
                   garbage without separator\n\
                   2024-03-07 15:00:00.002 - segunda mensagem\n";
        let mut buf = Vec::new();
        let count = report_from_log(log, &mut buf, &PathBuf::from("report.csv")).unwrap();
        assert_eq!(count, 2);

        let output = String::from_utf8(buf).unwrap();
        assert!(output.starts_with("Data,Mensagem"));
        assert!(output.contains("2024-03-07 14:05:12,primeira mensagem"));
        assert!(!output.contains("garbage"));
    }

    #[test]
    fn test_report_from_empty_log_writes_header_only() {
        let mut buf = Vec::new();
        let count = report_from_log("", &mut buf, &PathBuf::from("report.csv")).unwrap();
        assert_eq!(count, 0);
        assert_eq!(String::from_utf8(buf).unwrap().trim(), "Data,Mensagem");
    }
}
