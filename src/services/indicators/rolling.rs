//! Rolling-window primitives shared by the indicator families.
//!
//! Every function materializes the full column. Index `i` of a `W`-window
//! result is defined only when the `W` inputs ending at `i` are all defined.

use crate::types::Bar;

/// A computed column; `None` where the value is undefined.
pub type Column = Vec<Option<f64>>;

/// Lift a raw column.
pub fn defined(values: &[f64]) -> Column {
    values.iter().map(|v| Some(*v)).collect()
}

/// Last value of a column, if defined.
pub fn latest(column: &[Option<f64>]) -> Option<f64> {
    column.last().copied().flatten()
}

/// Value one bar before the last, if defined.
pub fn previous(column: &[Option<f64>]) -> Option<f64> {
    if column.len() < 2 {
        return None;
    }
    column[column.len() - 2]
}

/// `a / b`, undefined on a zero denominator or non-finite result.
pub fn ratio(a: f64, b: f64) -> Option<f64> {
    if b == 0.0 {
        return None;
    }
    let value = a / b;
    value.is_finite().then_some(value)
}

/// Apply `f` to each complete window.
pub fn rolling<F>(values: &[Option<f64>], window: usize, f: F) -> Column
where
    F: Fn(&[f64]) -> Option<f64>,
{
    let mut out = vec![None; values.len()];
    if window == 0 {
        return out;
    }
    let mut buf = Vec::with_capacity(window);
    for end in (window - 1)..values.len() {
        buf.clear();
        for value in &values[end + 1 - window..=end] {
            match value {
                Some(v) => buf.push(*v),
                None => break,
            }
        }
        if buf.len() == window {
            out[end] = f(&buf);
        }
    }
    out
}

pub fn mean(window: &[f64]) -> Option<f64> {
    if window.is_empty() {
        return None;
    }
    Some(window.iter().sum::<f64>() / window.len() as f64)
}

/// Sample standard deviation (n - 1).
pub fn sample_std(window: &[f64]) -> Option<f64> {
    if window.len() < 2 {
        return None;
    }
    let m = mean(window)?;
    let var = window.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (window.len() - 1) as f64;
    Some(var.sqrt())
}

/// Mean absolute deviation around the window mean.
pub fn mean_abs_dev(window: &[f64]) -> Option<f64> {
    let m = mean(window)?;
    mean(&window.iter().map(|v| (v - m).abs()).collect::<Vec<_>>())
}

/// Quantile with linear interpolation between closest ranks.
pub fn quantile(window: &[f64], q: f64) -> Option<f64> {
    if window.is_empty() {
        return None;
    }
    let mut sorted = window.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    let frac = pos - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * frac)
}

pub fn rolling_mean(values: &[Option<f64>], window: usize) -> Column {
    rolling(values, window, mean)
}

pub fn rolling_sum(values: &[Option<f64>], window: usize) -> Column {
    rolling(values, window, |w| Some(w.iter().sum()))
}

pub fn rolling_std(values: &[Option<f64>], window: usize) -> Column {
    rolling(values, window, sample_std)
}

pub fn rolling_max(values: &[Option<f64>], window: usize) -> Column {
    rolling(values, window, |w| w.iter().copied().reduce(f64::max))
}

pub fn rolling_min(values: &[Option<f64>], window: usize) -> Column {
    rolling(values, window, |w| w.iter().copied().reduce(f64::min))
}

/// Exponentially weighted mean with bias-adjusted weights.
///
/// `y[t] = Σ (1-α)^i x[t-i] / Σ (1-α)^i` with `α = 2 / (span + 1)`, defined
/// from the first bar.
pub fn ewm(values: &[f64], span: usize) -> Vec<f64> {
    let alpha = 2.0 / (span as f64 + 1.0);
    let decay = 1.0 - alpha;
    let mut mean = 0.0;
    let mut den = 0.0;
    values
        .iter()
        .map(|x| {
            // Recursive form of the weighted ratio; exact on constant input.
            den = 1.0 + decay * den;
            mean += (x - mean) / den;
            mean
        })
        .collect()
}

/// `ewm` gated so that index `i` is defined only when `i + 1 >= span`.
pub fn ewm_gated(values: &[f64], span: usize) -> Column {
    ewm(values, span)
        .into_iter()
        .enumerate()
        .map(|(i, v)| (i + 1 >= span).then_some(v))
        .collect()
}

/// Percent change over `periods` bars, as a fraction.
pub fn pct_change(values: &[f64], periods: usize) -> Column {
    (0..values.len())
        .map(|i| {
            if i < periods || periods == 0 {
                None
            } else {
                ratio(values[i] - values[i - periods], values[i - periods])
            }
        })
        .collect()
}

/// True range; the first bar uses high - low.
pub fn true_range(bars: &[Bar]) -> Vec<f64> {
    bars.iter()
        .enumerate()
        .map(|(i, bar)| {
            let hl = bar.high - bar.low;
            if i == 0 {
                return hl;
            }
            let prev_close = bars[i - 1].close;
            hl.max((bar.high - prev_close).abs())
                .max((bar.low - prev_close).abs())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_approx(actual: f64, expected: f64, tol: f64) {
        assert!(
            (actual - expected).abs() < tol,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_rolling_mean_gates_on_window() {
        let col = rolling_mean(&defined(&[1.0, 2.0, 3.0, 4.0]), 3);
        assert_eq!(col, vec![None, None, Some(2.0), Some(3.0)]);
    }

    #[test]
    fn test_rolling_skips_windows_with_gaps() {
        let col = rolling_sum(&[None, Some(1.0), Some(2.0), Some(3.0)], 3);
        assert_eq!(col, vec![None, None, None, Some(6.0)]);
    }

    #[test]
    fn test_sample_std() {
        assert_approx(sample_std(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap(), 2.138089935, 1e-9);
        assert!(sample_std(&[1.0]).is_none());
    }

    #[test]
    fn test_quantile_linear_interpolation() {
        let values: Vec<f64> = (1..=5).map(|v| v as f64).collect();
        assert_approx(quantile(&values, 0.95).unwrap(), 4.8, 1e-12);
        assert_approx(quantile(&values, 0.5).unwrap(), 3.0, 1e-12);
    }

    #[test]
    fn test_ewm_adjusted_weights() {
        // span 3 => alpha 0.5: y1 = (2 + 0.5*1) / 1.5
        let out = ewm(&[1.0, 2.0], 3);
        assert_approx(out[0], 1.0, 1e-12);
        assert_approx(out[1], 2.5 / 1.5, 1e-12);
    }

    #[test]
    fn test_ewm_exact_on_constant() {
        let out = ewm(&[100.0; 60], 12);
        assert!(out.iter().all(|v| *v == 100.0));
        let out = ewm(&[0.1; 40], 26);
        assert!(out.iter().all(|v| *v == 0.1));
    }

    #[test]
    fn test_ewm_gated() {
        let out = ewm_gated(&[1.0, 2.0, 3.0], 3);
        assert!(out[0].is_none() && out[1].is_none());
        assert!(out[2].is_some());
    }

    #[test]
    fn test_true_range_uses_previous_close() {
        let bars = vec![
            Bar::new(0, 10.0, 11.0, 9.0, 10.0, 1.0),
            Bar::new(1, 13.0, 14.0, 12.5, 13.0, 1.0),
        ];
        assert_eq!(true_range(&bars), vec![2.0, 4.0]);
    }

    #[test]
    fn test_ratio_rejects_zero_denominator() {
        assert_eq!(ratio(1.0, 0.0), None);
        assert_eq!(ratio(1.0, 2.0), Some(0.5));
    }
}
