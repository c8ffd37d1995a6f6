//! Concrete indicator implementations.
//!
//! Every indicator reads a single column (close or volume) and reports its
//! value at the last element only. When the column is shorter than the
//! nominal period the indicator shrinks its window to what is available and
//! says so through [`Windowed::window`], instead of failing or pretending the
//! full window was used.

pub mod bollinger;
pub mod ema;
pub mod macd;
pub mod rsi;
pub mod sma;
pub mod volume;

pub use bollinger::{Bands, Bollinger};
pub use ema::{ema_of_series, Ema};
pub use macd::Macd;
pub use rsi::Rsi;
pub use sma::Sma;
pub use volume::{VolumeLevel, VolumeProfile, VolumeStats};

use serde::{Deserialize, Serialize};

/// Trait for snapshot indicators.
///
/// Indicators are pure functions: column in, reading out. No look-ahead is
/// possible since only the trailing end of the column is consulted.
pub trait Indicator: Send + Sync {
    type Output;

    /// Human-readable name (e.g., "sma_20", "rsi_14").
    fn name(&self) -> &str;

    /// Nominal number of values the indicator wants.
    fn period(&self) -> usize;

    /// Compute the reading at the last element of `values`.
    fn compute(&self, values: &[f64]) -> Self::Output;
}

/// A value together with the number of samples it was computed from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Windowed {
    pub value: f64,
    pub window: usize,
}

impl Windowed {
    /// True when fewer samples than `nominal` were available.
    pub fn is_truncated(&self, nominal: usize) -> bool {
        self.window < nominal
    }
}

/// The last `min(period, values.len())` values.
pub(crate) fn trailing(values: &[f64], period: usize) -> &[f64] {
    &values[values.len().saturating_sub(period)..]
}

/// Arithmetic mean; 0.0 for an empty slice.
pub(crate) fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}
