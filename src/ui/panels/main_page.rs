// mctwatch - ui/panels/main_page.rs
//
// Main page after login: load a CSV export, open the disable window,
// generate the activity report. Actions are flagged on AppState and
// executed by gui.rs (file dialogs and DB calls are blocking).

use crate::app::state::AppState;
use crate::ui::theme;

/// Render the main page.
pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    ui.vertical_centered(|ui| {
        ui.add_space(24.0);
        ui.heading("Desabilitação de MCTs");
        ui.add_space(4.0);
        ui.colored_label(
            theme::OPERATOR_BANNER,
            format!("Usuário logado: {}", state.operator_name()),
        );

        ui.add_space(32.0);
        if ui.button("Carregar Arquivo CSV").clicked() {
            state.pick_csv_requested = true;
        }

        ui.add_space(12.0);
        if ui.button("MCTs Desabilitados").clicked() {
            state.show_disable_window = true;
        }

        ui.add_space(12.0);
        if ui.button("Gerar Relatório").clicked() {
            state.generate_report_requested = true;
        }

        if let Some(summary) = state.load_summary {
            ui.add_space(24.0);
            ui.separator();
            ui.label(format!(
                "Última carga: {} linhas lidas, {} aproveitadas, {} descartadas.",
                summary.rows_read, summary.rows_kept, summary.rows_dropped
            ));
        }
    });
}
