//! Order statistics for the IQR outlier rule.

/// Quantile `p ∈ [0, 1]` with linear interpolation between order statistics.
///
/// With sorted values `v` and `h = (n - 1)·p`, the result is
/// `v[⌊h⌋] + (h - ⌊h⌋)·(v[⌊h⌋ + 1] - v[⌊h⌋])`.
///
/// Returns `None` for an empty slice.
pub fn quantile(values: &[f64], p: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    Some(quantile_sorted(&sorted, p))
}

fn quantile_sorted(sorted: &[f64], p: f64) -> f64 {
    let n = sorted.len();
    let h = (n as f64 - 1.0) * p.clamp(0.0, 1.0);
    let lo = h.floor() as usize;
    let hi = (lo + 1).min(n - 1);
    sorted[lo] + (h - lo as f64) * (sorted[hi] - sorted[lo])
}

/// Inclusive Tukey fences `[Q1 - k·IQR, Q3 + k·IQR]`.
pub fn iqr_fences(values: &[f64], k: f64) -> Option<(f64, f64)> {
    let q1 = quantile(values, 0.25)?;
    let q3 = quantile(values, 0.75)?;
    let iqr = q3 - q1;
    Some((q1 - k * iqr, q3 + k * iqr))
}
