//! Synthetic exponential draws and their chunk means.

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Exp;

use crate::domain::VisualizerParams;
use crate::error::AppError;

/// Raw draws and the per-chunk means derived from them.
#[derive(Debug, Clone)]
pub struct SampleData {
    pub raw: Vec<f64>,
    pub means: Vec<f64>,
}

/// Draw `n_samples × sample_size` exponential values and reduce them to means.
pub fn generate_sample(params: &VisualizerParams, seed: u64) -> Result<SampleData, AppError> {
    let total = params.validate()?;
    let mut rng = StdRng::seed_from_u64(seed);

    let raw = draw_exponential(&mut rng, params.scale, total)?;
    let means = chunk_means(&raw, params.sample_size);

    Ok(SampleData { raw, means })
}

/// `count` independent draws from Exponential(scale), i.e. rate `1 / scale`.
pub fn draw_exponential<R: Rng + ?Sized>(
    rng: &mut R,
    scale: f64,
    count: usize,
) -> Result<Vec<f64>, AppError> {
    let exp = Exp::new(1.0 / scale)
        .map_err(|e| AppError::runtime(format!("Exponential distribution error: {e}")))?;
    Ok(exp.sample_iter(rng).take(count).collect())
}

/// Mean of each contiguous, non-overlapping chunk of `sample_size` values.
///
/// A trailing partial chunk is ignored.
pub fn chunk_means(raw: &[f64], sample_size: usize) -> Vec<f64> {
    if sample_size == 0 {
        return Vec::new();
    }
    raw.chunks_exact(sample_size)
        .map(|chunk| chunk.iter().sum::<f64>() / sample_size as f64)
        .collect()
}

/// Resolve the seed of a run: the configured one, or fresh entropy.
pub fn resolve_seed(params: &VisualizerParams) -> u64 {
    params.seed.unwrap_or_else(rand::random)
}

/// Golden-ratio increment used to spread sample sizes across the seed space.
const SEED_MIX: u64 = 0x9E37_79B9_7F4A_7C15;

/// Derive an independent seed for one sample size of a sweep.
///
/// Fixed arithmetic, so the mapping is identical across builds and platforms;
/// `StdRng::seed_from_u64` scrambles the result further.
pub fn derive_seed(seed: u64, sample_size: usize) -> u64 {
    seed ^ (sample_size as u64).wrapping_mul(SEED_MIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(scale: f64, n_samples: usize, sample_size: usize) -> VisualizerParams {
        VisualizerParams {
            scale,
            n_samples,
            sample_size,
            seed: Some(7),
            ..Default::default()
        }
    }

    #[test]
    fn raw_and_means_have_expected_lengths() {
        let sample = generate_sample(&params(2.0, 1000, 30), 7).unwrap();
        assert_eq!(sample.raw.len(), 30_000);
        assert_eq!(sample.means.len(), 1000);
        assert!(sample.raw.iter().all(|&x| x >= 0.0 && x.is_finite()));

        let max_raw = sample.raw.iter().copied().fold(0.0, f64::max);
        assert!(sample.means.iter().all(|&m| (0.0..=max_raw).contains(&m)));
    }

    #[test]
    fn chunk_means_are_sequential() {
        let raw = [1.0, 3.0, 2.0, 4.0, 10.0, 20.0];
        assert_eq!(chunk_means(&raw, 2), vec![2.0, 3.0, 15.0]);
        assert_eq!(chunk_means(&raw, 3), vec![2.0, 34.0 / 3.0]);
        assert_eq!(chunk_means(&raw, 1), raw.to_vec());
        assert!(chunk_means(&raw, 0).is_empty());
    }

    #[test]
    fn exponential_mean_matches_scale() {
        let mut rng = StdRng::seed_from_u64(11);
        let draws = draw_exponential(&mut rng, 2.0, 200_000).unwrap();
        let mean = draws.iter().sum::<f64>() / draws.len() as f64;
        // Standard error is 2 / sqrt(200k) ≈ 0.0045.
        assert!((mean - 2.0).abs() < 0.03, "mean={mean}");
    }

    #[test]
    fn same_seed_reproduces_sample() {
        let p = params(1.5, 50, 10);
        let a = generate_sample(&p, 99).unwrap();
        let b = generate_sample(&p, 99).unwrap();
        assert_eq!(a.raw, b.raw);
        assert_eq!(a.means, b.means);

        let c = generate_sample(&p, 100).unwrap();
        assert_ne!(a.raw, c.raw);
    }

    #[test]
    fn invalid_params_are_rejected_before_sampling() {
        let err = generate_sample(&params(-1.0, 10, 10), 1).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        let err = generate_sample(&params(1.0, 10, 0), 1).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn derived_seeds_differ_per_size() {
        assert_ne!(derive_seed(42, 1), derive_seed(42, 30));
        assert_eq!(derive_seed(42, 30), derive_seed(42, 30));
        // Pinned values: changing the mix silently changes every sweep.
        assert_eq!(derive_seed(0, 1), 0x9E37_79B9_7F4A_7C15);
        assert_eq!(derive_seed(7, 0), 7);
        assert_eq!(derive_seed(42, 2), 42 ^ 0x3C6E_F372_FE94_F82A);
    }
}
