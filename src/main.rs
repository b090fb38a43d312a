// mctwatch - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. Configuration loading and logging initialisation
// 3. Session restore (last matricula, last CSV directory)
// 4. eframe GUI launch

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod gui;

// Re-export modules from the library crate so that `gui.rs` and other
// binary-side code can still use `crate::app::...`, `crate::core::...` etc.
pub use mctwatch::app;

pub use mctwatch::core;
pub use mctwatch::db;
pub use mctwatch::platform;
pub use mctwatch::ui;
pub use mctwatch::util;

use clap::Parser;
use std::path::PathBuf;

/// Compile-time-embedded icon PNG bytes.
///
/// `include_bytes!` bakes the asset into the binary so the icon is always
/// available regardless of the working directory at runtime.
static ICON_PNG: &[u8] = include_bytes!("../assets/icon.png");

/// Decode the embedded PNG and return an `eframe`-compatible `IconData`.
///
/// Falls back to a transparent 1x1 placeholder if decoding fails so the
/// application always launches rather than panicking on a missing asset.
fn load_icon() -> egui::IconData {
    use image::ImageDecoder;

    match image::codecs::png::PngDecoder::new(std::io::Cursor::new(ICON_PNG)) {
        Ok(decoder) => {
            let (w, h) = decoder.dimensions();
            match image::DynamicImage::from_decoder(decoder) {
                Ok(img) => {
                    let rgba = img.into_rgba8();
                    egui::IconData {
                        rgba: rgba.into_raw(),
                        width: w,
                        height: h,
                    }
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to decode icon PNG; using placeholder");
                    placeholder_icon()
                }
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, "Failed to open icon PNG decoder; using placeholder");
            placeholder_icon()
        }
    }
}

/// 1x1 transparent RGBA icon used when the real icon cannot be loaded.
fn placeholder_icon() -> egui::IconData {
    egui::IconData {
        rgba: vec![0u8; 4],
        width: 1,
        height: 1,
    }
}

/// mctwatch - MCT tracking-device monitor.
///
/// Loads the fleet system's CSV export, filters out briefcase devices and
/// devices with a recent signal, and lists the MCTs that have gone quiet.
#[derive(Parser, Debug)]
#[command(name = "mctwatch", version, about)]
struct Cli {
    /// Path to the SQLite operadores/mcts extract (overrides config).
    #[arg(long = "db")]
    db: Option<PathBuf>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    // Resolve platform paths and read config before logging starts so the
    // configured level can take effect from the first line.
    let platform_paths = platform::config::PlatformPaths::resolve();
    let (config, config_warnings) = platform::config::load_config(&platform_paths.config_dir);

    util::logging::init(cli.debug, config.log_level.as_deref());

    tracing::info!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        "mctwatch starting"
    );

    for warning in &config_warnings {
        tracing::warn!("{warning}");
    }

    // Database path: CLI override > config > platform default.
    let db_path = cli
        .db
        .clone()
        .or_else(|| config.db_path.clone())
        .unwrap_or_else(|| platform_paths.default_db_path());
    tracing::info!(db = %db_path.display(), "Using operator/device store");

    let mut state = app::state::AppState::new(&config);

    // Restore the previous session, if any.
    let session_path = app::session::session_path(&platform_paths.data_dir);
    if let Some(session) = app::session::load(&session_path) {
        state.matricula_input = session.last_matricula.clone();
        state.last_login_matricula = session.last_matricula;
        state.last_csv_dir = session.last_csv_dir;
    }

    let audit = app::audit::AuditLog::new(platform_paths.audit_log_path());

    // Launch the GUI
    //
    // The icon is applied at two levels:
    //   1. OS-level (Windows EXE resource) — embedded by build.rs via winres.
    //      This covers the taskbar, Alt+Tab, title bar, and Explorer.
    //   2. Runtime (eframe viewport) — loaded here from the PNG asset.
    //      This covers the eframe-managed window icon on all platforms and
    //      acts as the canonical source on Linux/macOS.
    let icon_data = load_icon();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(format!(
                "{} v{}",
                util::constants::APP_NAME,
                util::constants::APP_VERSION
            ))
            .with_inner_size([
                util::constants::WINDOW_WIDTH,
                util::constants::WINDOW_HEIGHT,
            ])
            .with_min_inner_size([400.0, 420.0])
            .with_icon(icon_data),
        ..Default::default()
    };

    let result = eframe::run_native(
        util::constants::APP_NAME,
        native_options,
        Box::new(move |_cc| {
            Ok(Box::new(gui::McTWatchApp::new(
                state,
                db_path,
                audit,
                session_path,
            )))
        }),
    );

    if let Err(e) = result {
        tracing::error!(error = %e, "Failed to launch GUI");
        eprintln!("Error: Failed to launch mctwatch GUI: {e}");
        std::process::exit(1);
    }
}
