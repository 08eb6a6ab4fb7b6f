//! ASCII/Unicode plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal or a pipe
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - histogram bars: `#`
//! - fitted normal curve: `*`
//! - mean line: `|`

use crate::domain::{FitCurve, Histogram, SampleMeansRun};

/// Render the histogram of sample means with its normal fit and mean line.
pub fn render_ascii_histogram(run: &SampleMeansRun, width: usize, height: usize) -> String {
    render_plot(
        &run.histogram,
        run.curve.as_ref(),
        run.stats.mean,
        run.stats.std,
        width,
        height,
    )
}

fn render_plot(
    histogram: &Histogram,
    curve: Option<&FitCurve>,
    mean: f64,
    std: f64,
    width: usize,
    height: usize,
) -> String {
    let width = width.max(10);
    let height = height.max(4);

    let (x_min, x_max) = match (histogram.edges.first(), histogram.edges.last()) {
        (Some(&lo), Some(&hi)) if hi > lo => (lo, hi),
        _ => (0.0, 1.0),
    };

    let mut y_max = histogram.max_density();
    if let Some(curve) = curve {
        y_max = y_max.max(curve.max_density());
    }
    if !(y_max.is_finite() && y_max > 0.0) {
        y_max = 1.0;
    }

    let mut grid = vec![vec![' '; width]; height];

    // Bars: sample each column at its centre.
    for col in 0..width {
        let x = x_min + (col as f64 + 0.5) / width as f64 * (x_max - x_min);
        let density = density_at(histogram, x);
        let bar = ((density / y_max) * height as f64).round() as usize;
        for row in height.saturating_sub(bar.min(height))..height {
            grid[row][col] = '#';
        }
    }

    // Mean line over the bars.
    if mean.is_finite() && mean >= x_min && mean <= x_max {
        let col = map_x(mean, x_min, x_max, width);
        for row in grid.iter_mut() {
            row[col] = '|';
        }
    }

    // Curve last so it stays visible.
    if let Some(curve) = curve {
        draw_curve(&mut grid, &curve.points, x_min, x_max, y_max);
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Sample means: μ={mean:.2} σ={std:.2} | x=[{x_min:.3}, {x_max:.3}] | density max={y_max:.3}\n"
    ));
    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }
    out.push_str("# sample means  * normal fit  | mean\n");

    out
}

fn density_at(histogram: &Histogram, x: f64) -> f64 {
    histogram
        .bars()
        .find(|&(lo, hi, _)| x >= lo && x < hi)
        .map(|(_, _, d)| d)
        .unwrap_or(0.0)
}

fn map_x(x: f64, x_min: f64, x_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((x - x_min) / (x_max - x_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = (y / y_max).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_curve(grid: &mut [Vec<char>], curve: &[(f64, f64)], x_min: f64, x_max: f64, y_max: f64) {
    if curve.len() < 2 {
        return;
    }
    let height = grid.len();
    let width = grid[0].len();

    let mut prev = None;
    for &(x, y) in curve {
        if !y.is_finite() {
            continue;
        }
        let cx = map_x(x, x_min, x_max, width);
        let cy = map_y(y, y_max, height);
        if let Some((x0, y0)) = prev {
            draw_line(grid, x0, y0, cx, cy, '*');
        } else {
            grid[cy][cx] = '*';
        }
        prev = Some((cx, cy));
    }
}

/// Integer line drawing (Bresenham-ish).
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0 && (y0 as usize) < grid.len() && x0 >= 0 && (x0 as usize) < grid[0].len() {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}
