//! Equal-width, density-normalized histogram.
//!
//! Bins span `[min, max]` of the data. Every bin is half-open except the last,
//! which also takes values equal to `max`. Densities are `count / (n · width)`
//! so the bar areas sum to one.

use crate::domain::Histogram;

/// Build a histogram over `values` with `bins` bins.
///
/// Returns `None` for empty input or zero bins. When every value is equal the
/// range is widened to one unit centred on that value.
pub fn density_histogram(values: &[f64], bins: usize) -> Option<Histogram> {
    if bins == 0 {
        return None;
    }
    let (mut lo, mut hi) = super::min_max(values)?;
    if !(lo.is_finite() && hi.is_finite()) {
        return None;
    }
    if hi <= lo {
        lo -= 0.5;
        hi += 0.5;
    }

    let width = (hi - lo) / bins as f64;
    let edges = super::linspace(lo, hi, bins + 1);

    let mut counts = vec![0usize; bins];
    for &v in values {
        let idx = (((v - lo) / width).floor() as usize).min(bins - 1);
        counts[idx] += 1;
    }

    let total = values.len() as f64;
    let density = counts
        .iter()
        .map(|&c| c as f64 / (total * width))
        .collect();

    Some(Histogram {
        edges,
        counts,
        density,
    })
}
