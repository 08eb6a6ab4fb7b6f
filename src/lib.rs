//! `clt-means` library crate.
//!
//! The binary (`clt`) is a thin wrapper around this library so that:
//!
//! - the sampling and statistics are testable without spawning processes
//! - renderers (TUI, ASCII, JSON) share one pipeline

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod math;
pub mod plot;
pub mod report;
pub mod tui;
