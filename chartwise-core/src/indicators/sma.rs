//! Simple Moving Average (SMA).
//!
//! Mean of the trailing `min(period, n)` values. With no values at all the
//! reading is 0.0 over a zero-length window.

use super::{mean, trailing, Indicator, Windowed};

#[derive(Debug, Clone)]
pub struct Sma {
    period: usize,
    name: String,
}

impl Sma {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "SMA period must be >= 1");
        Self {
            period,
            name: format!("sma_{period}"),
        }
    }
}

impl Indicator for Sma {
    type Output = Windowed;

    fn name(&self) -> &str {
        &self.name
    }

    fn period(&self) -> usize {
        self.period
    }

    fn compute(&self, values: &[f64]) -> Windowed {
        let window = trailing(values, self.period);
        Windowed {
            value: mean(window),
            window: window.len(),
        }
    }
}
