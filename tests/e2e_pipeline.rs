// mctwatch - tests/e2e_pipeline.rs
//
// End-to-end tests for the load → filter → export pipeline and for the
// activity-log report path.
//
// These tests exercise the real filesystem, a real SQLite store, real CSV
// parsing, and real chrono timestamp parsing — no mocks, no stubs. This is
// the full path from a raw fleet-system export on disk to the stale-device
// list an operator sees, and from recorded activity lines to the CSV report.

use chrono::{NaiveDate, NaiveDateTime};
use mctwatch::app::audit::AuditLog;
use mctwatch::core::filter::{stale_devices, StalenessCriteria};
use mctwatch::core::loader::load_device_rows;
use mctwatch::core::report::{export_stale_csv, report_from_log};
use mctwatch::db::Db;
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

// =============================================================================
// Helpers
// =============================================================================

/// Absolute path to the on-disk fixture files.
fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// A fixed "now" so the fixture's timestamps classify deterministically.
/// Cutoff with the 15-day default window: 2024-03-06 12:00.
fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 21)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

/// Store seeded the way a synced extract would be, with one briefcase.
fn seeded_store(dir: &tempfile::TempDir) -> Db {
    let db = Db::open(&dir.path().join("extract.db")).unwrap();
    db.upsert_operator("12345", "Ana Souza", "1", "segredo").unwrap();
    db.upsert_mct("49332", "Locomotiva 101", false).unwrap();
    db.upsert_mct("MAL-01", "Maleta reserva A", true).unwrap();
    db
}

/// Run the fixture export through load → briefcase exclusion → staleness.
fn run_pipeline(db: &Db) -> (mctwatch::core::loader::LoadResult, Vec<mctwatch::core::model::StaleDevice>) {
    let path = fixture("mct_export.csv");
    let file = fs::File::open(&path).unwrap();
    let loaded = load_device_rows(file, &path).unwrap();

    let excluded: HashSet<String> = db.briefcase_ids().unwrap().into_iter().collect();
    let criteria = StalenessCriteria::new(excluded, "Ativo", 15);
    let stale = stale_devices(&loaded.rows, &criteria, now());
    (loaded, stale)
}

// =============================================================================
// Load → filter E2E
// =============================================================================

/// The fixture export loads with the expected row accounting: 8 data rows,
/// one dropped for a blank last-signal field.
#[test]
fn e2e_fixture_export_row_accounting() {
    let dir = tempfile::tempdir().unwrap();
    let db = seeded_store(&dir);
    let (loaded, _) = run_pipeline(&db);

    assert_eq!(loaded.summary.rows_read, 8);
    assert_eq!(loaded.summary.rows_dropped, 1);
    assert_eq!(loaded.summary.rows_kept, 7);
}

/// Full pipeline: briefcases are excluded via the store, recent and
/// out-of-service devices drop out, and the survivors come back oldest first.
#[test]
fn e2e_stale_devices_oldest_first() {
    let dir = tempfile::tempdir().unwrap();
    let db = seeded_store(&dir);
    let (_, stale) = run_pipeline(&db);

    let ids: Vec<_> = stale.iter().map(|d| d.mct.as_str()).collect();
    // 50901 (10/01, "Inativo" contains "ativo"), 49332 (20/02), 50817 (01/03).
    // MAL-01 is a briefcase, 51110 signalled recently, 52044 is "Desligado",
    // 53000's timestamp never parsed.
    assert_eq!(ids, vec!["50901", "49332", "50817"]);
}

/// Login lookup against the file-backed store: the allowed role comes back
/// with its stored password, unknown matriculas come back as None.
#[test]
fn e2e_operator_lookup() {
    let dir = tempfile::tempdir().unwrap();
    let db = seeded_store(&dir);

    let stored = db.find_operator("12345").unwrap().unwrap();
    assert_eq!(stored.operator.name, "Ana Souza");
    assert_eq!(stored.password, "segredo");

    assert!(db.find_operator("00000").unwrap().is_none());
}

/// The store round-trips through a real file on disk: reopening the same
/// path sees the seeded rows.
#[test]
fn e2e_store_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("extract.db");
    {
        let db = Db::open(&path).unwrap();
        db.upsert_mct("MAL-09", "Maleta nova", true).unwrap();
    }
    let db = Db::open(&path).unwrap();
    assert_eq!(db.briefcase_ids().unwrap(), vec!["MAL-09"]);
}

/// Stale-list export writes the header plus one line per device in order.
#[test]
fn e2e_stale_export_csv() {
    let dir = tempfile::tempdir().unwrap();
    let db = seeded_store(&dir);
    let (_, stale) = run_pipeline(&db);

    let export_path = dir.path().join("stale.csv");
    let file = fs::File::create(&export_path).unwrap();
    let count = export_stale_csv(&stale, file, &export_path).unwrap();
    assert_eq!(count, 3);

    let content = fs::read_to_string(&export_path).unwrap();
    let lines: Vec<_> = content.lines().collect();
    assert_eq!(lines[0], "mct,ultimo_sinal");
    assert_eq!(lines[1], "50901,10/01/2024 06:00");
    assert_eq!(lines[2], "49332,20/02/2024 17:40");
    assert_eq!(lines[3], "50817,01/03/2024 08:15");
}

// =============================================================================
// Activity log → report E2E
// =============================================================================

/// Recorded activity lines come back out of the report transform as
/// Data,Mensagem rows with the fractional seconds stripped.
#[test]
fn e2e_audit_log_to_report() {
    let dir = tempfile::tempdir().unwrap();
    let log = AuditLog::new(dir.path().join("activity.log"));

    log.record_disabled("Ana Souza", &["49332".to_string(), "50817".to_string()])
        .unwrap();
    log.record_load("Ana Souza", &fixture("mct_export.csv"), 7, 3)
        .unwrap();

    let content = log.read_all().unwrap();
    let report_path = dir.path().join("report.csv");
    let file = fs::File::create(&report_path).unwrap();
    let count = report_from_log(&content, file, &report_path).unwrap();
    assert_eq!(count, 2);

    let report = fs::read_to_string(&report_path).unwrap();
    let lines: Vec<_> = report.lines().collect();
    assert_eq!(lines[0], "Data,Mensagem");
    assert!(lines[1].contains("MCTs desabilitados pelo usuário: Ana Souza"));
    assert!(lines[2].contains("Arquivo carregado por Ana Souza"));
    // Timestamps in the report carry no fractional seconds.
    assert!(!lines[1].split(',').next().unwrap().contains('.'));
}

/// Generating a report before anything was recorded reports LogNotFound,
/// which the GUI turns into its "no log yet" alert.
#[test]
fn e2e_report_without_log_is_log_not_found() {
    use mctwatch::util::error::ReportError;
    let dir = tempfile::tempdir().unwrap();
    let log = AuditLog::new(dir.path().join("never-written.log"));
    assert!(matches!(
        log.read_all(),
        Err(ReportError::LogNotFound { .. })
    ));
}
