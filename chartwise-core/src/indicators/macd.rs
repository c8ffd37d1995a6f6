//! Moving Average Convergence/Divergence (MACD).
//!
//! MACD line = EMA(fast) - EMA(slow) of the input, both over the whole series.
//! Signal line = EMA(signal) of the MACD line. Histogram = MACD - signal.

use serde::{Deserialize, Serialize};

use super::ema::ema_of_series;
use super::Indicator;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacdReading {
    pub value: f64,
    pub signal_line: f64,
    pub histogram: f64,
}

#[derive(Debug, Clone)]
pub struct Macd {
    fast: usize,
    slow: usize,
    signal: usize,
    name: String,
}

impl Macd {
    pub fn new(fast: usize, slow: usize, signal: usize) -> Self {
        assert!(fast >= 1 && slow >= 1 && signal >= 1, "MACD periods must be >= 1");
        assert!(fast < slow, "MACD fast period must be shorter than slow period");
        Self {
            fast,
            slow,
            signal,
            name: format!("macd_{fast}_{slow}_{signal}"),
        }
    }
}

impl Indicator for Macd {
    type Output = MacdReading;

    fn name(&self) -> &str {
        &self.name
    }

    fn period(&self) -> usize {
        self.slow
    }

    fn compute(&self, values: &[f64]) -> MacdReading {
        let fast = ema_of_series(values, self.fast);
        let slow = ema_of_series(values, self.slow);
        let line: Vec<f64> = fast.iter().zip(&slow).map(|(f, s)| f - s).collect();
        let signal = ema_of_series(&line, self.signal);

        let value = line.last().copied().unwrap_or(0.0);
        let signal_line = signal.last().copied().unwrap_or(0.0);
        MacdReading {
            value,
            signal_line,
            histogram: value - signal_line,
        }
    }
}
