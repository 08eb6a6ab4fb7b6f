//! Formatted terminal output for runs and sweeps.
//!
//! We keep formatting code in one place so:
//! - the math/pipeline code stays clean and testable
//! - output changes are localized (important for snapshot tests)

use crate::domain::{SampleMeansRun, SweepRow};
use crate::error::AppError;

/// Format the run summary (parameters + statistics).
pub fn format_summary(run: &SampleMeansRun) -> String {
    let p = &run.params;
    let s = &run.stats;
    let mut out = String::new();

    out.push_str("=== clt - Distribution of Sample Means ===\n");
    out.push_str(&format!(
        "Population: Exponential(scale={:.2}) | mean={:.2}\n",
        p.scale, p.scale
    ));
    out.push_str(&format!(
        "Samples: n={} × size={} (draws={}) | seed={}\n",
        p.n_samples,
        p.sample_size,
        run.raw.len(),
        run.seed
    ));
    out.push_str(&format!("Means: range=[{:.4}, {:.4}]\n", s.min_mean, s.max_mean));
    out.push_str(&format!("μ = {:.4}\n", s.mean));
    out.push_str(&format!("σ = {:.4} (CLT predicts {:.4})\n", s.std, s.predicted_std));
    if run.curve.is_none() {
        out.push_str("Normal fit: skipped (σ = 0)\n");
    } else {
        out.push_str(&format!(
            "Normal fit: μ={:.2}, σ={:.2} over {} points\n",
            s.mean, s.std, p.curve_points
        ));
    }

    out
}

/// Format the convergence sweep table.
pub fn format_sweep(scale: f64, n_samples: usize, seed: u64, rows: &[SweepRow]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "CLT sweep: Exponential(scale={scale:.2}), {n_samples} means per size | seed={seed}\n"
    ));
    out.push_str(&format!(
        "{:>8} {:>10} {:>10} {:>12} {:>8}\n",
        "size", "μ", "σ", "scale/√size", "ratio"
    ));
    for row in rows {
        out.push_str(&format!(
            "{:>8} {:>10.4} {:>10.4} {:>12.4} {:>8.3}\n",
            row.sample_size, row.mean, row.std, row.predicted_std, row.ratio
        ));
    }
    out
}

/// Pretty JSON of parameters, statistics, histogram and fitted curve.
pub fn to_json(run: &SampleMeansRun) -> Result<String, AppError> {
    serde_json::to_string_pretty(run)
        .map_err(|e| AppError::runtime(format!("Failed to serialize run summary: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Histogram, SummaryStats, VisualizerParams};

    fn tiny_run() -> SampleMeansRun {
        SampleMeansRun {
            params: VisualizerParams {
                scale: 2.0,
                n_samples: 1,
                sample_size: 2,
                seed: Some(1),
                bins: 1,
                curve_points: 100,
            },
            seed: 1,
            raw: vec![1.0, 3.0],
            means: vec![2.0],
            stats: SummaryStats {
                mean: 2.0,
                std: 0.0,
                min_mean: 2.0,
                max_mean: 2.0,
                max_raw: 3.0,
                predicted_std: 2.0 / 2f64.sqrt(),
            },
            histogram: Histogram {
                edges: vec![1.5, 2.5],
                counts: vec![1],
                density: vec![1.0],
            },
            curve: None,
        }
    }

    #[test]
    fn summary_mentions_stats_and_degenerate_fit() {
        let txt = format_summary(&tiny_run());
        assert!(txt.contains("Samples: n=1 × size=2 (draws=2) | seed=1"));
        assert!(txt.contains("μ = 2.0000"));
        assert!(txt.contains("σ = 0.0000 (CLT predicts 1.4142)"));
        assert!(txt.contains("Normal fit: skipped"));
    }

    #[test]
    fn sweep_table_has_one_row_per_size() {
        let rows = vec![
            SweepRow {
                sample_size: 1,
                mean: 2.0,
                std: 2.0,
                predicted_std: 2.0,
                ratio: 1.0,
            },
            SweepRow {
                sample_size: 4,
                mean: 2.0,
                std: 1.1,
                predicted_std: 1.0,
                ratio: 1.1,
            },
        ];
        let txt = format_sweep(2.0, 1000, 2024, &rows);
        assert_eq!(txt.lines().count(), 4);
        assert!(txt.lines().next().unwrap().ends_with("| seed=2024"));
        assert!(txt.lines().nth(3).unwrap().trim_end().ends_with("1.100"));
    }

    #[test]
    fn json_skips_raw_data() {
        let json = to_json(&tiny_run()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["stats"]["mean"], 2.0);
        assert_eq!(value["histogram"]["counts"][0], 1);
        assert!(value["curve"].is_null());
        assert!(value.get("raw").is_none());
        assert!(value.get("means").is_none());
    }
}
