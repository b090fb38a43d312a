// mctwatch - core/mod.rs
//
// Core business logic layer.
// Dependencies: standard library, csv, chrono only.
// Must NOT depend on: ui, platform, app, db, or any dialog/GUI crate.

pub mod filter;
pub mod loader;
pub mod model;
pub mod report;
