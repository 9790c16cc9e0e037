/// Numeric helpers shared by the analyses.
///
/// Pure functions over slices — no database, no I/O — so the statistical
/// behavior is testable in isolation. Degenerate inputs (empty slices,
/// zero variance) return `None` rather than dividing by zero; the calling
/// analysis decides how to report that.

// ---------------------------------------------------------------------------
// Percentile
// ---------------------------------------------------------------------------

/// Percentile of `values` at quantile `q` (0.0..=1.0), using linear
/// interpolation between the two nearest order statistics.
///
/// With sorted values v[0..n] the position is `q * (n - 1)`; a fractional
/// position interpolates between the bracketing values. This matches the
/// default quantile of the dataframe libraries the warehouse reports were
/// originally validated against.
///
/// Returns `None` for an empty slice or a `q` outside [0, 1].
pub fn percentile(values: &[f64], q: f64) -> Option<f64> {
    if values.is_empty() || !(0.0..=1.0).contains(&q) {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let pos = q * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;

    if lower == upper {
        return Some(sorted[lower]);
    }

    let frac = pos - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * frac)
}

// ---------------------------------------------------------------------------
// Pearson correlation
// ---------------------------------------------------------------------------

/// Pearson correlation coefficient between paired samples.
///
/// Returns `None` when the slices differ in length, hold fewer than two
/// points, or either sample has zero variance (the coefficient is
/// undefined in all three cases).
pub fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    if xs.len() != ys.len() || xs.len() < 2 {
        return None;
    }

    let n = xs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in xs.iter().zip(ys.iter()) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    let denom = (var_x * var_y).sqrt();
    if denom == 0.0 {
        return None;
    }

    Some(cov / denom)
}
