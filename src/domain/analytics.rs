//! Cross-stock aggregate analytics.

/// n-th root of the product of `values`, or `None` for an empty slice.
///
/// Computed as `exp(mean(ln v))` so long catalogs cannot overflow the running
/// product. A zero value yields 0.
pub fn geometric_mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    if values.iter().any(|&v| v == 0.0) {
        return Some(0.0);
    }
    let log_sum: f64 = values.iter().map(|v| v.ln()).sum();
    Some((log_sum / values.len() as f64).exp())
}
