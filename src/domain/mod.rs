//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - run parameters (`VisualizerParams`)
//! - run outputs (`SummaryStats`, `Histogram`, `FitCurve`, `SampleMeansRun`)
//! - convergence sweep rows (`SweepRow`)

pub mod types;

pub use types::*;
