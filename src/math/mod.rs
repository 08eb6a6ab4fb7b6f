//! Mathematical utilities: descriptive statistics, the normal pdf and histograms.

pub mod histogram;
pub mod stats;

pub use histogram::*;
pub use stats::*;
