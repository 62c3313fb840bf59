pub mod input;
pub mod tooltip;
