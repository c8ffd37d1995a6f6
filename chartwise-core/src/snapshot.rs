//! Indicator snapshot: every indicator's reading at the last bar.
//!
//! The snapshot is the only input to signal generation and trend assessment.
//! All fields are plain numbers; short history narrows windows (reported per
//! reading) but never leaves a field empty.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{DataError, Series};
use crate::indicators::macd::MacdReading;
use crate::indicators::{Bollinger, Indicator, Macd, Rsi, Sma, VolumeProfile, VolumeStats};
use crate::params;

/// RSI zone as reported next to the raw value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RsiZone {
    Oversold,
    Overbought,
    Neutral,
}

impl RsiZone {
    pub fn from_value(rsi: f64) -> Self {
        if rsi < 30.0 {
            Self::Oversold
        } else if rsi > 70.0 {
            Self::Overbought
        } else {
            Self::Neutral
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RsiReading {
    pub value: f64,
    pub zone: RsiZone,
    /// Number of deltas averaged.
    pub window: usize,
}

/// Effective window of each moving average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaWindows {
    pub sma_20: usize,
    pub sma_50: usize,
    pub sma_200: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MovingAverages {
    pub sma_20: f64,
    pub sma_50: f64,
    pub sma_200: f64,
    pub price: f64,
    pub windows: MaWindows,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BollingerReading {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
    pub price: f64,
    pub window: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    pub rsi: RsiReading,
    pub moving_averages: MovingAverages,
    pub macd: MacdReading,
    pub bollinger: BollingerReading,
    pub volume: VolumeStats,
}

impl IndicatorSnapshot {
    /// Latest close.
    pub fn price(&self) -> f64 {
        self.moving_averages.price
    }
}

/// Compute the indicator snapshot for the last bar of `series`.
///
/// Fails only with `DataError::TooFewBars` when fewer than `MIN_BARS` bars exist;
/// the other structural checks already happened in `Series::new`.
pub fn compute_snapshot(series: &Series) -> Result<IndicatorSnapshot, DataError> {
    let Some(last) = series.last().filter(|_| series.len() >= params::MIN_BARS) else {
        return Err(DataError::TooFewBars {
            required: params::MIN_BARS,
            actual: series.len(),
        });
    };
    let price = last.close;
    let closes = series.closes();

    let rsi = Rsi::new(params::RSI_PERIOD).compute(&closes);
    let sma_20 = Sma::new(params::SMA_SHORT).compute(&closes);
    let sma_50 = Sma::new(params::SMA_MEDIUM).compute(&closes);
    let sma_200 = Sma::new(params::SMA_LONG).compute(&closes);
    let macd = Macd::new(params::MACD_FAST, params::MACD_SLOW, params::MACD_SIGNAL).compute(&closes);
    let bands = Bollinger::new(params::BOLLINGER_PERIOD, params::BOLLINGER_MULTIPLIER).compute(&closes);
    let volume = VolumeProfile::new(params::VOLUME_PERIOD).compute(&series.volumes());

    if sma_200.is_truncated(params::SMA_LONG) {
        debug!(
            bars = series.len(),
            sma_20 = sma_20.window,
            sma_50 = sma_50.window,
            sma_200 = sma_200.window,
            rsi = rsi.window,
            "short history, moving-average windows narrowed"
        );
    }

    Ok(IndicatorSnapshot {
        rsi: RsiReading {
            value: rsi.value,
            zone: RsiZone::from_value(rsi.value),
            window: rsi.window,
        },
        moving_averages: MovingAverages {
            sma_20: sma_20.value,
            sma_50: sma_50.value,
            sma_200: sma_200.value,
            price,
            windows: MaWindows {
                sma_20: sma_20.window,
                sma_50: sma_50.window,
                sma_200: sma_200.window,
            },
        },
        macd,
        bollinger: BollingerReading {
            upper: bands.upper,
            middle: bands.middle,
            lower: bands.lower,
            price,
            window: bands.window,
        },
        volume,
    })
}
