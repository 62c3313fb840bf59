// Library interface for gamesales-treemap.
// The viewer binary and the debug-layout tool both build on these modules.

pub mod chart;
pub mod config;
pub mod data;
pub mod layout;
pub mod render;
pub mod tree;
pub mod ui;
