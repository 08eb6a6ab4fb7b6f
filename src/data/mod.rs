//! Data generation: exponential draws and sample means.

pub mod sample;

pub use sample::{SampleData, chunk_means, draw_exponential, generate_sample};
