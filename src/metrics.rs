//! Shared numeric helpers for growth and consistency measurement.
//!
//! All series arguments follow the crate convention of newest-first ordering
//! (index 0 = most recent fiscal year).

use statrs::statistics::Statistics;

/// Compound Annual Growth Rate: (end / start)^(1/years) − 1.
///
/// Returns `None` unless both endpoints are strictly positive and the span
/// covers at least one year; a CAGR between non-positive values is
/// meaningless and must never degrade to zero.
pub fn cagr(start: f64, end: f64, years: f64) -> Option<f64> {
    if start <= 0.0 || end <= 0.0 || years <= 0.0 {
        return None;
    }
    Some((end / start).powf(1.0 / years) - 1.0)
}

/// CAGR over a newest-first series, looking back at most `max_span` years.
///
/// Uses the most recent value as the end point and the value `span` years
/// earlier as the start, where span = min(len − 1, max_span).
pub fn series_cagr(values: &[f64], max_span: usize) -> Option<f64> {
    if values.len() < 2 || max_span == 0 {
        return None;
    }
    let span = (values.len() - 1).min(max_span);
    cagr(values[span], values[0], span as f64)
}

/// Consistency of a series as 1 − coefficient of variation, clamped [0, 1].
///
/// A flat series scores 1.0, a wildly swinging one approaches 0.0. Defined
/// as 1.0 for fewer than two data points or a zero mean.
pub fn stability(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 1.0;
    }
    let mean = values.iter().mean();
    if mean.abs() < f64::EPSILON {
        return 1.0;
    }
    let std_dev = values.iter().std_dev();
    (1.0 - std_dev / mean.abs()).clamp(0.0, 1.0)
}

/// Median of a set of values; `None` when empty.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}
