//! Series: a validated, time-ordered sequence of bars.
//!
//! A `Series` can only be built through [`Series::new`], so every value of the
//! type satisfies the ordering and per-bar invariants. Components downstream
//! never re-check them.

use serde::Serialize;
use thiserror::Error;

use super::bar::Bar;
use super::ids::SeriesHash;

/// Structural violations of the series invariants.
///
/// These are input errors: retrying on the same series cannot succeed, so the
/// engine never retries and the caller decides whether to re-fetch.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DataError {
    #[error("too few bars: need at least {required}, got {actual}")]
    TooFewBars { required: usize, actual: usize },

    #[error("timestamps not strictly ascending at bar {index}")]
    NonMonotonicTimestamps { index: usize },

    #[error("negative volume {volume} at bar {index}")]
    NegativeVolume { index: usize, volume: f64 },

    #[error("invalid bar at {index}: {reason}")]
    InvalidBar { index: usize, reason: &'static str },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Series {
    bars: Vec<Bar>,
}

impl Series {
    /// Validate and wrap a chronological bar list.
    ///
    /// Rejects (first violation wins, scanning from the oldest bar):
    /// - non-finite fields or inconsistent OHLC → `InvalidBar`
    /// - volume < 0 → `NegativeVolume`
    /// - timestamp not strictly greater than the previous one → `NonMonotonicTimestamps`
    ///
    /// Empty and short series are accepted; minimum lengths are a per-component concern.
    pub fn new(bars: Vec<Bar>) -> Result<Self, DataError> {
        for (index, bar) in bars.iter().enumerate() {
            if bar.is_void() {
                return Err(DataError::InvalidBar {
                    index,
                    reason: "non-finite field",
                });
            }
            if !bar.is_sane() {
                return Err(DataError::InvalidBar {
                    index,
                    reason: "high/low inconsistent with open/close",
                });
            }
            if bar.volume < 0.0 {
                return Err(DataError::NegativeVolume {
                    index,
                    volume: bar.volume,
                });
            }
            if index > 0 && bar.timestamp <= bars[index - 1].timestamp {
                return Err(DataError::NonMonotonicTimestamps { index });
            }
        }
        Ok(Self { bars })
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn last(&self) -> Option<&Bar> {
        self.bars.last()
    }

    /// Close prices, oldest first.
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    pub fn highs(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.high).collect()
    }

    pub fn lows(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.low).collect()
    }

    pub fn volumes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.volume).collect()
    }

    /// Content hash of the bars, stable across runs and platforms.
    pub fn content_hash(&self) -> SeriesHash {
        SeriesHash::of_bars(&self.bars)
    }

    pub fn into_bars(self) -> Vec<Bar> {
        self.bars
    }
}

impl TryFrom<Vec<Bar>> for Series {
    type Error = DataError;

    fn try_from(bars: Vec<Bar>) -> Result<Self, Self::Error> {
        Self::new(bars)
    }
}
