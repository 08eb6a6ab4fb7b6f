//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory by the pipeline and renderers
//! - exported as a JSON summary

use serde::Serialize;

use crate::error::AppError;

pub const DEFAULT_SCALE: f64 = 2.0;
pub const DEFAULT_N_SAMPLES: usize = 1000;
pub const DEFAULT_SAMPLE_SIZE: usize = 30;
pub const DEFAULT_BINS: usize = 50;
pub const DEFAULT_CURVE_POINTS: usize = 100;

/// Upper bound on `n_samples × sample_size` (800 MB of `f64` draws).
pub const MAX_DRAWS: usize = 100_000_000;

/// Sample sizes used by the convergence sweep when none are given.
pub const DEFAULT_SWEEP_SIZES: [usize; 3] = [1, 30, 500];

/// Inputs of a single visualizer run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisualizerParams {
    /// Exponential scale (the population mean).
    pub scale: f64,
    /// Number of sample means to produce.
    pub n_samples: usize,
    /// Number of draws averaged per mean.
    pub sample_size: usize,
    /// RNG seed; `None` draws from OS entropy.
    pub seed: Option<u64>,
    pub bins: usize,
    pub curve_points: usize,
}

impl Default for VisualizerParams {
    fn default() -> Self {
        Self {
            scale: DEFAULT_SCALE,
            n_samples: DEFAULT_N_SAMPLES,
            sample_size: DEFAULT_SAMPLE_SIZE,
            seed: None,
            bins: DEFAULT_BINS,
            curve_points: DEFAULT_CURVE_POINTS,
        }
    }
}

impl VisualizerParams {
    /// Reject parameters the sampler cannot honor.
    ///
    /// Returns the total number of raw draws on success.
    pub fn validate(&self) -> Result<usize, AppError> {
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(AppError::invalid(format!(
                "Scale must be a finite value > 0 (got {}).",
                self.scale
            )));
        }
        if self.n_samples == 0 {
            return Err(AppError::invalid("Number of samples must be > 0."));
        }
        if self.sample_size == 0 {
            return Err(AppError::invalid("Sample size must be > 0."));
        }
        if self.bins == 0 {
            return Err(AppError::invalid("Histogram bin count must be > 0."));
        }
        if self.curve_points < 2 {
            return Err(AppError::invalid("Fitted curve needs at least 2 points."));
        }
        match self.n_samples.checked_mul(self.sample_size) {
            Some(total) if total <= MAX_DRAWS => Ok(total),
            _ => Err(AppError::invalid(format!(
                "n_samples × sample_size must be <= {MAX_DRAWS} (got {} × {}).",
                self.n_samples, self.sample_size
            ))),
        }
    }

    /// Standard error of the mean predicted by the CLT: `scale / √sample_size`.
    pub fn predicted_std(&self) -> f64 {
        self.scale / (self.sample_size as f64).sqrt()
    }
}

/// Summary statistics of the sample means.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryStats {
    /// Mean of the sample means (μ).
    pub mean: f64,
    /// Population standard deviation of the sample means (σ, divisor n).
    pub std: f64,
    pub min_mean: f64,
    pub max_mean: f64,
    /// Largest raw draw.
    pub max_raw: f64,
    /// `scale / √sample_size`.
    pub predicted_std: f64,
}

/// Density-normalized histogram with equal-width bins.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    /// Bin edges, `bins + 1` values.
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
    /// `count / (total · bin_width)` per bin.
    pub density: Vec<f64>,
}

impl Histogram {
    pub fn bin_width(&self) -> f64 {
        match (self.edges.first(), self.edges.last()) {
            (Some(first), Some(last)) if !self.counts.is_empty() => {
                (last - first) / self.counts.len() as f64
            }
            _ => 0.0,
        }
    }

    pub fn max_density(&self) -> f64 {
        self.density.iter().copied().fold(0.0, f64::max)
    }

    /// `(left, right, density)` per bin.
    pub fn bars(&self) -> impl Iterator<Item = (f64, f64, f64)> + '_ {
        self.edges
            .windows(2)
            .zip(self.density.iter())
            .map(|(w, &d)| (w[0], w[1], d))
    }
}

/// Normal pdf evaluated over the observed range of sample means.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FitCurve {
    pub points: Vec<(f64, f64)>,
}

impl FitCurve {
    pub fn max_density(&self) -> f64 {
        self.points.iter().map(|&(_, y)| y).fold(0.0, f64::max)
    }
}

/// All products of a single visualizer run.
#[derive(Debug, Clone, Serialize)]
pub struct SampleMeansRun {
    pub params: VisualizerParams,
    /// Seed actually used (resolved from entropy when `params.seed` is `None`).
    pub seed: u64,
    #[serde(skip)]
    pub raw: Vec<f64>,
    #[serde(skip)]
    pub means: Vec<f64>,
    pub stats: SummaryStats,
    pub histogram: Histogram,
    /// `None` when σ is zero or non-finite (degenerate normal curve).
    pub curve: Option<FitCurve>,
}

/// One row of the convergence sweep.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepRow {
    pub sample_size: usize,
    pub mean: f64,
    pub std: f64,
    pub predicted_std: f64,
    /// `std / predicted_std`; close to 1 when the CLT holds.
    pub ratio: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let params = VisualizerParams::default();
        assert_eq!(params.validate().unwrap(), 30_000);
    }

    #[test]
    fn rejects_bad_params() {
        let base = VisualizerParams::default();
        let bad = [
            VisualizerParams {
                scale: 0.0,
                ..base.clone()
            },
            VisualizerParams {
                scale: -1.0,
                ..base.clone()
            },
            VisualizerParams {
                scale: f64::NAN,
                ..base.clone()
            },
            VisualizerParams {
                scale: f64::INFINITY,
                ..base.clone()
            },
            VisualizerParams {
                n_samples: 0,
                ..base.clone()
            },
            VisualizerParams {
                sample_size: 0,
                ..base.clone()
            },
            VisualizerParams {
                bins: 0,
                ..base.clone()
            },
            VisualizerParams {
                curve_points: 1,
                ..base.clone()
            },
            VisualizerParams {
                n_samples: usize::MAX,
                sample_size: 2,
                ..base.clone()
            },
        ];
        for params in bad {
            let err = params.validate().unwrap_err();
            assert_eq!(err.exit_code(), 2, "{params:?}");
        }
    }

    #[test]
    fn draw_count_is_capped_below_memory_limits() {
        let huge = VisualizerParams {
            n_samples: usize::MAX / 4,
            sample_size: 1,
            ..Default::default()
        };
        assert_eq!(huge.validate().unwrap_err().exit_code(), 2);

        let just_over = VisualizerParams {
            n_samples: MAX_DRAWS / 10 + 1,
            sample_size: 10,
            ..Default::default()
        };
        assert_eq!(just_over.validate().unwrap_err().exit_code(), 2);

        let at_cap = VisualizerParams {
            n_samples: MAX_DRAWS / 10,
            sample_size: 10,
            ..Default::default()
        };
        assert_eq!(at_cap.validate().unwrap(), MAX_DRAWS);
    }

    #[test]
    fn predicted_std_follows_sqrt_n() {
        let params = VisualizerParams {
            scale: 2.0,
            sample_size: 4,
            ..Default::default()
        };
        assert!((params.predicted_std() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn histogram_bars_pair_edges_with_density() {
        let h = Histogram {
            edges: vec![0.0, 1.0, 2.0],
            counts: vec![1, 3],
            density: vec![0.25, 0.75],
        };
        let bars: Vec<_> = h.bars().collect();
        assert_eq!(bars, vec![(0.0, 1.0, 0.25), (1.0, 2.0, 0.75)]);
        assert_eq!(h.bin_width(), 1.0);
        assert_eq!(h.max_density(), 0.75);
    }
}
