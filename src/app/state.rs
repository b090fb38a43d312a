// mctwatch - app/state.rs
//
// Application state management. Holds the current page, the logged-in
// operator, form buffers, the loaded device rows, and the stale results.
// Owned by the eframe::App implementation; UI panels communicate actions
// back through the request flags, and gui.rs performs the blocking work.

use crate::core::model::{LoadSummary, Operator, StaleDevice};
use crate::platform::config::AppConfig;
use std::path::PathBuf;

/// The three pages of the application, in login order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Login,
    Main,
    Results,
}

/// A blocking user-facing alert. While set, the rest of the UI is inert.
#[derive(Debug, Clone)]
pub struct Alert {
    pub title: String,
    pub message: String,
    pub is_error: bool,
}

/// Top-level application state.
#[derive(Debug)]
pub struct AppState {
    /// Page currently shown.
    pub page: Page,

    /// Operator from a successful login (None on the login page).
    pub operator: Option<Operator>,

    // ---- Login form ----
    pub matricula_input: String,
    pub password_input: String,
    /// Set by the login panel (button or Enter); gui.rs runs the DB check.
    pub login_requested: bool,

    // ---- Main page actions ----
    /// The operator asked to pick and load a CSV export.
    pub pick_csv_requested: bool,
    /// The operator asked to generate the activity report.
    pub generate_report_requested: bool,

    // ---- Disable window ----
    pub show_disable_window: bool,
    pub disable_input: String,
    pub submit_disable_requested: bool,

    // ---- Loaded data ----
    /// Row accounting from the last load.
    pub load_summary: Option<LoadSummary>,
    /// File the rows came from.
    pub loaded_file: Option<PathBuf>,
    /// Stale devices from the last pipeline run, oldest first.
    pub stale: Vec<StaleDevice>,

    // ---- Results page ----
    /// The operator asked to export the stale list to CSV.
    pub export_stale_requested: bool,

    // ---- Feedback ----
    /// Status bar text.
    pub status_message: String,
    /// Blocking alert, if any.
    pub alert: Option<Alert>,

    // ---- Config-derived pipeline parameters ----
    pub stale_days: i64,
    pub active_status: String,

    // ---- Session-restored values ----
    /// Directory the file dialog opens in.
    pub last_csv_dir: Option<PathBuf>,

    /// Matricula of the last successful login, restored from the session
    /// and updated only when a login is granted — never from the input
    /// buffer, which may hold a failed attempt.
    pub last_login_matricula: String,
}

impl AppState {
    /// Create initial state from validated config.
    pub fn new(config: &AppConfig) -> Self {
        Self {
            page: Page::Login,
            operator: None,
            matricula_input: String::new(),
            password_input: String::new(),
            login_requested: false,
            pick_csv_requested: false,
            generate_report_requested: false,
            show_disable_window: false,
            disable_input: String::new(),
            submit_disable_requested: false,
            load_summary: None,
            loaded_file: None,
            stale: Vec::new(),
            export_stale_requested: false,
            status_message: "Faça login para começar.".to_string(),
            alert: None,
            stale_days: config.stale_days,
            active_status: config.active_status.clone(),
            last_csv_dir: None,
            last_login_matricula: String::new(),
        }
    }

    /// Raise a blocking error alert.
    pub fn alert_error(&mut self, title: &str, message: impl Into<String>) {
        self.alert = Some(Alert {
            title: title.to_string(),
            message: message.into(),
            is_error: true,
        });
    }

    /// Raise a blocking informational alert.
    pub fn alert_info(&mut self, title: &str, message: impl Into<String>) {
        self.alert = Some(Alert {
            title: title.to_string(),
            message: message.into(),
            is_error: false,
        });
    }

    /// Device ids currently pasted in the disable window: one per line,
    /// trimmed, blank lines ignored.
    pub fn disable_lines(&self) -> Vec<String> {
        self.disable_input
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Name of the logged-in operator, or an empty string on the login page.
    pub fn operator_name(&self) -> &str {
        self.operator.as_ref().map(|o| o.name.as_str()).unwrap_or("")
    }

    /// Drop the results of the previous load before a new one.
    pub fn clear_load(&mut self) {
        self.load_summary = None;
        self.loaded_file = None;
        self.stale.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> AppState {
        AppState::new(&AppConfig::default())
    }

    #[test]
    fn test_initial_page_is_login() {
        let s = state();
        assert_eq!(s.page, Page::Login);
        assert!(s.operator.is_none());
        assert!(s.alert.is_none());
    }

    #[test]
    fn test_disable_lines_trims_and_skips_blanks() {
        let mut s = state();
        s.disable_input = "  49332 \n\n50817\n   \n".to_string();
        assert_eq!(s.disable_lines(), vec!["49332", "50817"]);
    }

    #[test]
    fn test_clear_load_resets_data() {
        let mut s = state();
        s.loaded_file = Some(PathBuf::from("x.csv"));
        s.load_summary = Some(Default::default());
        s.clear_load();
        assert!(s.loaded_file.is_none());
        assert!(s.load_summary.is_none());
        assert!(s.stale.is_empty());
    }

    #[test]
    fn test_clear_load_keeps_session_fields() {
        let mut s = state();
        s.last_login_matricula = "12345".to_string();
        s.last_csv_dir = Some(PathBuf::from("/tmp/exports"));
        s.loaded_file = Some(PathBuf::from("x.csv"));
        s.clear_load();
        assert_eq!(s.last_login_matricula, "12345");
        assert!(s.last_csv_dir.is_some());
    }
}
