//! Reporting utilities: text summaries, sweep tables and JSON output.

pub mod format;

pub use format::*;
