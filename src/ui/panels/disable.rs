// mctwatch - ui/panels/disable.rs
//
// Floating window where the operator pastes disabled device ids, one per
// line, with a live count. Submission is flagged for gui.rs, which writes
// the audit line.

use crate::app::state::AppState;
use crate::ui::theme;

/// Render the disable window (if state.show_disable_window is true).
pub fn render(ctx: &egui::Context, state: &mut AppState) {
    if !state.show_disable_window {
        return;
    }

    let mut open = true;
    egui::Window::new("Desabilitação de MCTs")
        .open(&mut open)
        .collapsible(false)
        .resizable(true)
        .min_width(theme::DISABLE_WINDOW_WIDTH)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label("Cole os MCTs desabilitados (um por linha):");
            ui.add_space(6.0);

            egui::ScrollArea::vertical()
                .max_height(theme::RESULTS_ROW_HEIGHT * theme::DISABLE_TEXT_ROWS as f32)
                .show(ui, |ui| {
                    ui.add(
                        egui::TextEdit::multiline(&mut state.disable_input)
                            .desired_rows(theme::DISABLE_TEXT_ROWS)
                            .desired_width(f32::INFINITY),
                    );
                });

            ui.add_space(6.0);
            ui.label(format!("MCTs colados: {}", state.disable_lines().len()));

            ui.add_space(10.0);
            ui.vertical_centered(|ui| {
                ui.add_enabled_ui(!state.disable_lines().is_empty(), |ui| {
                    if ui.button("Enviar").clicked() {
                        state.submit_disable_requested = true;
                    }
                });
            });
        });

    if !open {
        state.show_disable_window = false;
    }
}
