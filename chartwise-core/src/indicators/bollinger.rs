//! Bollinger Bands: moving average +/- standard deviation multiplier.
//!
//! - Middle: SMA(close, period)
//! - Upper: middle + mult * stddev(close, period)
//! - Lower: middle - mult * stddev(close, period)
//!
//! Uses population stddev (divide by N) over the trailing `min(period, n)` values.

use serde::{Deserialize, Serialize};

use super::{mean, trailing, Indicator};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bands {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
    pub window: usize,
}

#[derive(Debug, Clone)]
pub struct Bollinger {
    period: usize,
    multiplier: f64,
    name: String,
}

impl Bollinger {
    pub fn new(period: usize, multiplier: f64) -> Self {
        assert!(period >= 1, "Bollinger period must be >= 1");
        assert!(multiplier >= 0.0, "Bollinger multiplier must be non-negative");
        Self {
            period,
            multiplier,
            name: format!("bollinger_{period}_{multiplier}"),
        }
    }
}

impl Indicator for Bollinger {
    type Output = Bands;

    fn name(&self) -> &str {
        &self.name
    }

    fn period(&self) -> usize {
        self.period
    }

    fn compute(&self, values: &[f64]) -> Bands {
        let window = trailing(values, self.period);
        let middle = mean(window);
        let variance = if window.is_empty() {
            0.0
        } else {
            window
                .iter()
                .map(|v| {
                    let diff = v - middle;
                    diff * diff
                })
                .sum::<f64>()
                / window.len() as f64
        };
        let band = self.multiplier * variance.sqrt();

        Bands {
            upper: middle + band,
            middle,
            lower: middle - band,
            window: window.len(),
        }
    }
}
