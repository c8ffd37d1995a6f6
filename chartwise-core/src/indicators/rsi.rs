//! Relative Strength Index (RSI).
//!
//! Simple (non-smoothed) means of gains and losses over the trailing
//! `min(period, n - 1)` close-to-close deltas.
//! RSI = 100 - 100 / (1 + avg_gain / avg_loss)
//! Edge case: avg_loss == 0 → RSI = 100, including the flat-price case.

use super::{trailing, Indicator, Windowed};

#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
    name: String,
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "RSI period must be >= 1");
        Self {
            period,
            name: format!("rsi_{period}"),
        }
    }
}

impl Indicator for Rsi {
    type Output = Windowed;

    fn name(&self) -> &str {
        &self.name
    }

    fn period(&self) -> usize {
        self.period
    }

    /// `window` counts deltas, not prices.
    fn compute(&self, values: &[f64]) -> Windowed {
        let changes: Vec<f64> = values.windows(2).map(|w| w[1] - w[0]).collect();
        let window = trailing(&changes, self.period);

        let (gains, losses) = window.iter().fold((0.0, 0.0), |(g, l), &ch| {
            if ch > 0.0 {
                (g + ch, l)
            } else {
                (g, l - ch)
            }
        });

        let len = window.len().max(1) as f64;
        Windowed {
            value: compute_rsi(gains / len, losses / len),
            window: window.len(),
        }
    }
}

fn compute_rsi(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        100.0
    } else {
        100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
    }
}
