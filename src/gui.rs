// mctwatch - gui.rs
//
// Top-level eframe::App implementation.
// Renders the current page and executes the blocking actions the panels
// flagged on AppState: the login query, the CSV pick/load/filter run,
// disable submissions, and report generation. All I/O here is synchronous
// by design — one operator, one action at a time.
//
// Handlers return Result; the dispatch in update() turns failures into
// blocking alerts. Cancelled dialogs and rejected credentials are normal
// outcomes, not errors.

use crate::app::audit::AuditLog;
use crate::app::session::{self, SessionData, SESSION_VERSION};
use crate::app::state::{AppState, Page};
use crate::core::{filter, loader, report};
use crate::db::{check_credentials, Db, LoginOutcome};
use crate::ui;
use crate::util::constants;
use crate::util::error::{LoadError, ReportError, Result};
use chrono::Local;
use std::collections::HashSet;
use std::path::PathBuf;

/// The mctwatch application.
pub struct McTWatchApp {
    pub state: AppState,
    /// Path to the SQLite extract; opened per operation like the remote
    /// instance it replaces.
    db_path: PathBuf,
    audit: AuditLog,
    session_path: PathBuf,
}

impl McTWatchApp {
    /// Create a new application instance.
    pub fn new(state: AppState, db_path: PathBuf, audit: AuditLog, session_path: PathBuf) -> Self {
        Self {
            state,
            db_path,
            audit,
            session_path,
        }
    }

    /// Run the login query and check the typed password.
    ///
    /// An unknown matricula, a disallowed role, and a wrong password all
    /// produce the same alert; only store failures propagate as errors.
    fn handle_login(&mut self) -> Result<()> {
        let matricula = self.state.matricula_input.trim().to_string();
        let password = std::mem::take(&mut self.state.password_input);

        let db = Db::open(&self.db_path)?;
        match check_credentials(db.find_operator(&matricula)?, &password) {
            LoginOutcome::Granted(operator) => {
                tracing::info!(matricula = %matricula, "Operator logged in");
                let name = operator.name.clone();
                self.state.operator = Some(operator);
                self.state.last_login_matricula = matricula;
                self.state.page = Page::Main;
                self.state.status_message =
                    "Carregue um arquivo CSV para verificar os MCTs.".to_string();
                self.state
                    .alert_info("Login Bem-sucedido", format!("Bem-vindo, {name}!"));
            }
            LoginOutcome::Denied => {
                tracing::warn!(matricula = %matricula, "Login rejected");
                self.state.alert_error(
                    "Erro de Login",
                    "Usuário não autorizado ou senha incorreta.",
                );
            }
        }
        Ok(())
    }

    /// Pick a CSV export, load it, and run the staleness pipeline.
    fn handle_pick_csv(&mut self) -> Result<()> {
        let mut dialog = rfd::FileDialog::new().add_filter("CSV", &["csv"]);
        if let Some(ref dir) = self.state.last_csv_dir {
            dialog = dialog.set_directory(dir);
        }
        let Some(path) = dialog.pick_file() else {
            return Ok(()); // dialog cancelled
        };

        if let Some(parent) = path.parent() {
            self.state.last_csv_dir = Some(parent.to_path_buf());
        }

        let file = std::fs::File::open(&path).map_err(|e| LoadError::Io {
            path: path.clone(),
            source: e,
        })?;
        let loaded = loader::load_device_rows(file, &path)?;

        // The exclusion list comes from the store on every load so a
        // refreshed extract takes effect without restarting.
        let excluded: HashSet<String> = Db::open(&self.db_path)?
            .briefcase_ids()?
            .into_iter()
            .collect();

        let criteria = filter::StalenessCriteria::new(
            excluded,
            &self.state.active_status,
            self.state.stale_days,
        );
        let stale = filter::stale_devices(&loaded.rows, &criteria, Local::now().naive_local());

        if let Err(e) = self.audit.record_load(
            self.state.operator_name(),
            &path,
            loaded.summary.rows_kept,
            stale.len(),
        ) {
            // The pipeline result is still shown; the audit gap is logged.
            tracing::warn!(error = %e, "Could not record load in the activity log");
        }

        self.state.clear_load();
        self.state.status_message = format!(
            "{}: {} MCTs sem sinal de {} linhas.",
            path.file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            stale.len(),
            loaded.summary.rows_read,
        );
        self.state.load_summary = Some(loaded.summary);
        self.state.loaded_file = Some(path);
        self.state.stale = stale;
        self.state.page = Page::Results;
        Ok(())
    }

    /// Record the pasted disabled ids in the activity log.
    fn handle_submit_disable(&mut self) -> Result<()> {
        let lines = self.state.disable_lines();
        if lines.len() > constants::MAX_DISABLE_LINES {
            self.state.alert_error(
                "Erro",
                format!(
                    "Mais de {} MCTs colados — confira o conteúdo.",
                    constants::MAX_DISABLE_LINES
                ),
            );
            return Ok(());
        }

        self.audit
            .record_disabled(self.state.operator_name(), &lines)?;

        tracing::info!(count = lines.len(), "Disable submission recorded");
        self.state.disable_input.clear();
        self.state.show_disable_window = false;
        self.state
            .alert_info("MCTs Enviados", "Os MCTs foram registrados com sucesso!");
        Ok(())
    }

    /// Transform the activity log into the Data/Mensagem CSV report.
    fn handle_generate_report(&mut self) -> Result<()> {
        let log_content = match self.audit.read_all() {
            Ok(c) => c,
            Err(ReportError::LogNotFound { .. }) => {
                self.state
                    .alert_error("Erro", "Arquivo de log não encontrado.");
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        let Some(dest) = rfd::FileDialog::new()
            .add_filter("CSV", &["csv"])
            .set_file_name(constants::REPORT_FILE_NAME)
            .save_file()
        else {
            return Ok(());
        };

        let file = std::fs::File::create(&dest).map_err(|e| ReportError::Io {
            path: dest.clone(),
            source: e,
        })?;
        let rows = report::report_from_log(&log_content, file, &dest)?;

        tracing::info!(rows, dest = %dest.display(), "Activity report generated");
        self.state.alert_info(
            "Sucesso",
            format!(
                "Relatório gerado com sucesso! O arquivo foi salvo em: {}",
                dest.display()
            ),
        );
        Ok(())
    }

    /// Export the current stale list to CSV.
    fn handle_export_stale(&mut self) -> Result<()> {
        let Some(dest) = rfd::FileDialog::new()
            .add_filter("CSV", &["csv"])
            .set_file_name(constants::STALE_EXPORT_FILE_NAME)
            .save_file()
        else {
            return Ok(());
        };

        let file = std::fs::File::create(&dest).map_err(|e| ReportError::Io {
            path: dest.clone(),
            source: e,
        })?;
        let n = report::export_stale_csv(&self.state.stale, file, &dest)?;

        self.state.status_message = format!("{n} MCTs exportados para CSV.");
        Ok(())
    }

    fn save_session(&self) {
        let data = SessionData {
            version: SESSION_VERSION,
            last_csv_dir: self.state.last_csv_dir.clone(),
            last_matricula: self.state.last_login_matricula.clone(),
        };
        if let Err(e) = session::save(&data, &self.session_path) {
            tracing::warn!(error = %e, "Session save failed");
        }
    }
}

impl eframe::App for McTWatchApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Handle flags set by the panels last frame ----
        if self.state.login_requested {
            self.state.login_requested = false;
            if let Err(e) = self.handle_login() {
                tracing::error!(error = %e, "Login failed");
                self.state.alert_error("Erro de Conexão", e.to_string());
            }
        }
        if self.state.pick_csv_requested {
            self.state.pick_csv_requested = false;
            if let Err(e) = self.handle_pick_csv() {
                tracing::warn!(error = %e, "CSV load failed");
                self.state.alert_error("Erro", e.to_string());
            }
        }
        if self.state.submit_disable_requested {
            self.state.submit_disable_requested = false;
            if let Err(e) = self.handle_submit_disable() {
                tracing::error!(error = %e, "Disable submission failed");
                self.state.alert_error("Erro", e.to_string());
            }
        }
        if self.state.generate_report_requested {
            self.state.generate_report_requested = false;
            if let Err(e) = self.handle_generate_report() {
                tracing::error!(error = %e, "Report generation failed");
                self.state.alert_error("Erro", e.to_string());
            }
        }
        if self.state.export_stale_requested {
            self.state.export_stale_requested = false;
            if let Err(e) = self.handle_export_stale() {
                tracing::error!(error = %e, "Stale-list export failed");
                self.state.alert_error("Erro", e.to_string());
            }
        }

        // Status bar
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(&self.state.status_message);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if self.state.operator.is_some() && !self.state.stale.is_empty() {
                        ui.label(format!("{} MCTs sem sinal", self.state.stale.len()));
                    }
                });
            });
        });

        // A visible alert makes the page behind it inert.
        let alert_shown = ui::panels::alert::render(ctx, &mut self.state);

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_enabled_ui(!alert_shown, |ui| match self.state.page {
                Page::Login => ui::panels::login::render(ui, &mut self.state),
                Page::Main => ui::panels::main_page::render(ui, &mut self.state),
                Page::Results => ui::panels::results::render(ui, &mut self.state),
            });
        });

        // Floating disable window (only reachable after login).
        if self.state.operator.is_some() {
            ui::panels::disable::render(ctx, &mut self.state);
        }
    }

    /// Called by eframe when the application window is about to close.
    ///
    /// Saves the current session so the next launch can restore it.
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.save_session();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::config::AppConfig;

    fn app(dir: &tempfile::TempDir) -> McTWatchApp {
        McTWatchApp::new(
            AppState::new(&AppConfig::default()),
            dir.path().join("extract.db"),
            AuditLog::new(dir.path().join("activity.log")),
            dir.path().join("session.json"),
        )
    }

    #[test]
    fn test_session_saves_last_successful_login_not_input_buffer() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir);
        app.state.last_login_matricula = "12345".to_string();
        // A later, failed attempt left in the input buffer must not leak
        // into the session.
        app.state.matricula_input = "99999".to_string();
        app.save_session();

        let loaded = session::load(&dir.path().join("session.json")).unwrap();
        assert_eq!(loaded.last_matricula, "12345");
    }

    #[test]
    fn test_session_saves_last_csv_dir() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir);
        app.state.last_csv_dir = Some(PathBuf::from("/tmp/exports"));
        app.save_session();

        let loaded = session::load(&dir.path().join("session.json")).unwrap();
        assert_eq!(loaded.last_csv_dir, Some(PathBuf::from("/tmp/exports")));
    }
}
