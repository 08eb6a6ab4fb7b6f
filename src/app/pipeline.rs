//! Shared pipeline logic used by both CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! exponential draws -> chunk means -> summary stats -> histogram -> fitted curve
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).

use rayon::prelude::*;

use crate::data::sample::{derive_seed, generate_sample, resolve_seed};
use crate::domain::{FitCurve, SampleMeansRun, SummaryStats, SweepRow, VisualizerParams};
use crate::error::AppError;
use crate::math::{density_histogram, linspace, mean, min_max, normal_pdf, population_std};

/// Execute the full pipeline and return every intermediate product.
pub fn run_visualizer(params: &VisualizerParams) -> Result<SampleMeansRun, AppError> {
    params.validate()?;
    let seed = resolve_seed(params);
    log::debug!(
        "sampling: scale={} n_samples={} sample_size={} seed={seed}",
        params.scale,
        params.n_samples,
        params.sample_size
    );

    // 1) + 2) Draw and reduce to chunk means.
    let sample = generate_sample(params, seed)?;

    // 3) Summary statistics.
    let stats = summarize(params, &sample.raw, &sample.means)?;
    log::info!(
        "sample means: n={} mu={:.4} sigma={:.4} (predicted {:.4})",
        sample.means.len(),
        stats.mean,
        stats.std,
        stats.predicted_std
    );

    // 4) Histogram.
    let histogram = density_histogram(&sample.means, params.bins)
        .ok_or_else(|| AppError::runtime("Failed to build histogram of sample means."))?;

    // 5) Fitted normal curve.
    let curve = fit_curve(&stats, params.curve_points);
    if curve.is_none() {
        log::warn!("sigma is {}; normal curve is degenerate and will not be drawn", stats.std);
    }

    Ok(SampleMeansRun {
        params: params.clone(),
        seed,
        raw: sample.raw,
        means: sample.means,
        stats,
        histogram,
        curve,
    })
}

/// Compute μ, σ and ranges of the sample means.
pub fn summarize(
    params: &VisualizerParams,
    raw: &[f64],
    means: &[f64],
) -> Result<SummaryStats, AppError> {
    let empty = || AppError::runtime("No sample means to summarize.");
    let mu = mean(means).ok_or_else(empty)?;
    let sigma = population_std(means).ok_or_else(empty)?;
    let (min_mean, max_mean) = min_max(means).ok_or_else(empty)?;
    let (_, max_raw) = min_max(raw).ok_or_else(empty)?;

    Ok(SummaryStats {
        mean: mu,
        std: sigma,
        min_mean,
        max_mean,
        max_raw,
        predicted_std: params.predicted_std(),
    })
}

/// Normal pdf with the run's μ/σ over `[min_mean, max_mean]`.
///
/// Returns `None` when σ is zero or non-finite.
pub fn fit_curve(stats: &SummaryStats, n: usize) -> Option<FitCurve> {
    if !(stats.std.is_finite() && stats.std > 0.0) {
        return None;
    }
    let points = linspace(stats.min_mean, stats.max_mean, n)
        .into_iter()
        .map(|x| (x, normal_pdf(x, stats.mean, stats.std)))
        .collect();
    Some(FitCurve { points })
}

/// Run steps 1-3 for several sample sizes and compare σ against `scale / √n`.
///
/// Each size gets its own seed derived from `seed`, so results do not depend
/// on how rayon schedules the work.
pub fn run_sweep(
    scale: f64,
    n_samples: usize,
    sizes: &[usize],
    seed: u64,
) -> Result<Vec<SweepRow>, AppError> {
    if sizes.is_empty() {
        return Err(AppError::invalid("Sweep needs at least one sample size."));
    }

    sizes
        .par_iter()
        .map(|&sample_size| {
            let params = VisualizerParams {
                scale,
                n_samples,
                sample_size,
                seed: Some(seed),
                ..Default::default()
            };
            let sample = generate_sample(&params, derive_seed(seed, sample_size))?;
            let stats = summarize(&params, &sample.raw, &sample.means)?;
            log::debug!("sweep: sample_size={sample_size} sigma={:.4}", stats.std);
            Ok(SweepRow {
                sample_size,
                mean: stats.mean,
                std: stats.std,
                predicted_std: stats.predicted_std,
                ratio: stats.std / stats.predicted_std,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(scale: f64, n_samples: usize, sample_size: usize, seed: u64) -> VisualizerParams {
        VisualizerParams {
            scale,
            n_samples,
            sample_size,
            seed: Some(seed),
            ..Default::default()
        }
    }

    #[test]
    fn default_scenario_runs() {
        let run = run_visualizer(&seeded(2.0, 1000, 30, 42)).unwrap();

        assert_eq!(run.raw.len(), 30_000);
        assert_eq!(run.means.len(), 1000);
        assert!(run.raw.iter().all(|&x| x >= 0.0));
        assert!(run.means.iter().all(|&m| m >= 0.0 && m <= run.stats.max_raw));

        assert_eq!(run.histogram.counts.len(), 50);
        assert_eq!(run.histogram.counts.iter().sum::<usize>(), 1000);

        let curve = run.curve.as_ref().expect("non-degenerate run has a curve");
        assert_eq!(curve.points.len(), 100);
        assert_eq!(curve.points.first().map(|p| p.0), Some(run.stats.min_mean));
        assert_eq!(curve.points.last().map(|p| p.0), Some(run.stats.max_mean));
    }

    #[test]
    fn mu_and_sigma_match_direct_computation() {
        let run = run_visualizer(&seeded(2.0, 500, 12, 3)).unwrap();

        let n = run.means.len() as f64;
        let mu = run.means.iter().sum::<f64>() / n;
        let var = run.means.iter().map(|m| (m - mu).powi(2)).sum::<f64>() / n;

        assert!((run.stats.mean - mu).abs() < 1e-12);
        assert!((run.stats.std - var.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn single_mean_is_degenerate() {
        let run = run_visualizer(&seeded(2.0, 1, 30, 5)).unwrap();
        assert_eq!(run.means.len(), 1);
        assert_eq!(run.stats.std, 0.0);
        assert!(run.curve.is_none());
        assert_eq!(run.histogram.counts.iter().sum::<usize>(), 1);
    }

    #[test]
    fn sample_size_one_is_valid() {
        let run = run_visualizer(&seeded(2.0, 200, 1, 5)).unwrap();
        assert_eq!(run.means, run.raw);
        assert!(run.curve.is_some());
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let a = run_visualizer(&seeded(1.0, 100, 5, 8)).unwrap();
        let b = run_visualizer(&seeded(1.0, 100, 5, 8)).unwrap();
        assert_eq!(a.means, b.means);
        assert_eq!(a.stats, b.stats);
        assert_eq!(a.seed, 8);
    }

    #[test]
    fn invalid_params_fail_with_usage_code() {
        let err = run_visualizer(&seeded(0.0, 100, 5, 1)).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn sigma_shrinks_like_inverse_sqrt_n() {
        let rows = run_sweep(2.0, 1000, &[1, 30, 500], 2024).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(
            rows.iter().map(|r| r.sample_size).collect::<Vec<_>>(),
            vec![1, 30, 500]
        );

        for row in &rows {
            // With 1000 means the relative error of σ is a few percent; the
            // exponential's heavy tail widens it at n = 1.
            assert!((row.ratio - 1.0).abs() < 0.2, "{row:?}");
            assert!((row.mean - 2.0).abs() < 0.25, "{row:?}");
        }
        assert!(rows[0].std > rows[1].std);
        assert!(rows[1].std > rows[2].std);
    }

    #[test]
    fn sweep_is_deterministic_for_a_seed() {
        let a = run_sweep(1.0, 200, &[2, 8, 32], 77).unwrap();
        let b = run_sweep(1.0, 200, &[2, 8, 32], 77).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn empty_sweep_is_rejected() {
        assert_eq!(run_sweep(1.0, 10, &[], 1).unwrap_err().exit_code(), 2);
    }
}
