// mctwatch - ui/panels/login.rs
//
// Login form: matricula and password, Enter in either field submits.
// The actual DB check runs in gui.rs when login_requested is set.

use crate::app::state::AppState;
use crate::ui::theme;

/// Render the login page.
pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    ui.vertical_centered(|ui| {
        ui.add_space(40.0);
        ui.heading("Desabilitação de MCTs");
        ui.add_space(24.0);

        ui.label("Matrícula:");
        let matricula = ui.add(
            egui::TextEdit::singleline(&mut state.matricula_input)
                .desired_width(theme::FORM_FIELD_WIDTH),
        );

        ui.add_space(8.0);
        ui.label("Senha:");
        let password = ui.add(
            egui::TextEdit::singleline(&mut state.password_input)
                .password(true)
                .desired_width(theme::FORM_FIELD_WIDTH),
        );

        // Enter in either field submits, like the button.
        let enter_pressed = (matricula.lost_focus() || password.lost_focus())
            && ui.input(|i| i.key_pressed(egui::Key::Enter));

        ui.add_space(20.0);
        if ui.button("Login").clicked() || enter_pressed {
            state.login_requested = true;
        }
    });
}
