// mctwatch - ui/panels/mod.rs

pub mod alert;
pub mod disable;
pub mod login;
pub mod main_page;
pub mod results;
