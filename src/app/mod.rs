// mctwatch - app/mod.rs
//
// Application layer: state management, activity log, session persistence.
// Dependencies: core layer, platform config.
// Must NOT depend on: ui.

pub mod audit;
pub mod session;
pub mod state;
