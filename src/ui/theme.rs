// mctwatch - ui/theme.rs
//
// Colour and layout constants.
// No dependencies on app state or business logic.

use egui::Color32;

/// Colour for stale-result rows (amber, matches the "needs attention" tone).
pub const STALE_ROW: Color32 = Color32::from_rgb(217, 119, 6); // Amber 600

/// Colour for the logged-in operator banner.
pub const OPERATOR_BANNER: Color32 = Color32::from_rgb(209, 213, 219); // Gray 300

/// Colour for error alert titles.
pub const ALERT_ERROR: Color32 = Color32::from_rgb(220, 38, 38); // Red 600

/// Layout constants.
pub const FORM_FIELD_WIDTH: f32 = 220.0;
pub const DISABLE_WINDOW_WIDTH: f32 = 380.0;
pub const DISABLE_TEXT_ROWS: usize = 10;
pub const RESULTS_ROW_HEIGHT: f32 = 20.0;
