//! Exponential Moving Average (EMA).
//!
//! Recursive: EMA[t] = alpha * x[t] + (1 - alpha) * EMA[t-1], alpha = 2 / (period + 1).
//! Seed: EMA[0] = x[0]. There is no SMA warmup; every index has a value.

use super::Indicator;

#[derive(Debug, Clone)]
pub struct Ema {
    period: usize,
    name: String,
}

impl Ema {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "EMA period must be >= 1");
        Self {
            period,
            name: format!("ema_{period}"),
        }
    }

    /// Full EMA series, same length as `values`.
    pub fn series(&self, values: &[f64]) -> Vec<f64> {
        ema_of_series(values, self.period)
    }
}

impl Indicator for Ema {
    type Output = f64;

    fn name(&self) -> &str {
        &self.name
    }

    fn period(&self) -> usize {
        self.period
    }

    /// Last EMA value, or 0.0 when `values` is empty.
    fn compute(&self, values: &[f64]) -> f64 {
        self.series(values).last().copied().unwrap_or(0.0)
    }
}

/// Compute raw EMA values from an arbitrary f64 slice.
/// Used by MACD for both the price EMAs and the signal line.
pub fn ema_of_series(values: &[f64], period: usize) -> Vec<f64> {
    let mut result = Vec::with_capacity(values.len());
    let Some(&first) = values.first() else {
        return result;
    };

    let alpha = 2.0 / (period.max(1) as f64 + 1.0);
    let mut prev = first;
    result.push(prev);
    for &v in &values[1..] {
        prev = alpha * v + (1.0 - alpha) * prev;
        result.push(prev);
    }
    result
}
