// mctwatch - ui/panels/alert.rs
//
// Blocking alert window. All failures (bad credentials, missing columns,
// file errors, DB errors) surface here; OK dismisses.

use crate::app::state::AppState;
use crate::ui::theme;

/// Render the active alert, if any. Returns true while an alert is shown
/// so the caller can make the rest of the UI inert.
pub fn render(ctx: &egui::Context, state: &mut AppState) -> bool {
    let Some(alert) = state.alert.clone() else {
        return false;
    };

    let mut dismissed = false;
    egui::Window::new(alert.title.as_str())
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            if alert.is_error {
                ui.colored_label(theme::ALERT_ERROR, &alert.message);
            } else {
                ui.label(&alert.message);
            }
            ui.add_space(10.0);
            ui.vertical_centered(|ui| {
                if ui.button("OK").clicked() {
                    dismissed = true;
                }
            });
        });

    if dismissed {
        state.alert = None;
    }
    true
}
