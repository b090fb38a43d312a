// mctwatch - ui/panels/results.rs
//
// Read-only listing of stale devices (oldest signal first) with a CSV
// export action and a way back to the main page.

use crate::app::state::{AppState, Page};
use crate::ui::theme;

/// Render the results page.
pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    ui.horizontal(|ui| {
        if ui.button("\u{2190} Voltar").clicked() {
            state.page = Page::Main;
        }
        ui.heading(format!(
            "MCTs sem sinal há mais de {} dias: {}",
            state.stale_days,
            state.stale.len()
        ));
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.add_enabled_ui(!state.stale.is_empty(), |ui| {
                if ui.button("Exportar CSV\u{2026}").clicked() {
                    state.export_stale_requested = true;
                }
            });
        });
    });

    if let Some(ref file) = state.loaded_file {
        ui.colored_label(
            theme::OPERATOR_BANNER,
            format!("Arquivo: {}", file.display()),
        );
    }
    ui.separator();

    if state.stale.is_empty() {
        ui.centered_and_justified(|ui| {
            ui.label("Nenhum MCT ativo ficou sem sinal no período.");
        });
        return;
    }

    // Virtual scrolling: only visible rows are laid out.
    egui::ScrollArea::vertical()
        .auto_shrink([false; 2])
        .show_rows(
            ui,
            theme::RESULTS_ROW_HEIGHT,
            state.stale.len(),
            |ui, row_range| {
                for device in &state.stale[row_range] {
                    ui.colored_label(
                        theme::STALE_ROW,
                        egui::RichText::new(device.display_line()).monospace(),
                    );
                }
            },
        );
}
