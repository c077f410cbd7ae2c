//! Report rendering: terminal and JSON.

pub mod json;
mod terminal;

pub use terminal::{format_progress, format_report, format_verdict};
