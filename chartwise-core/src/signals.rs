//! Signal generation: per-indicator buy/sell calls and their aggregate.
//!
//! Thresholds are fixed. Every rule resolves; when none fires the reading is
//! `Neutral` with `Moderate` strength.

use serde::{Deserialize, Serialize};

use crate::snapshot::IndicatorSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorSignal {
    Buy,
    Sell,
    Neutral,
    Bullish,
    Bearish,
    High,
    Low,
    Normal,
}

impl IndicatorSignal {
    pub fn is_buy(self) -> bool {
        matches!(self, Self::Buy | Self::Bullish)
    }

    pub fn is_sell(self) -> bool {
        matches!(self, Self::Sell | Self::Bearish)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strength {
    Weak,
    Moderate,
    Strong,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalReading {
    pub signal: IndicatorSignal,
    pub strength: Strength,
}

impl SignalReading {
    fn new(signal: IndicatorSignal, strong: bool) -> Self {
        Self {
            signal,
            strength: if strong {
                Strength::Strong
            } else {
                Strength::Moderate
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverallSignal {
    StrongBuy,
    Buy,
    Neutral,
    Sell,
    StrongSell,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Overall {
    pub signal: OverallSignal,
    pub buy_count: usize,
    pub sell_count: usize,
    pub neutral_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalSet {
    pub rsi: SignalReading,
    pub moving_averages: SignalReading,
    pub macd: SignalReading,
    pub bollinger: SignalReading,
    pub volume: SignalReading,
    pub overall: Overall,
}

impl SignalSet {
    /// The five per-indicator readings, in a fixed order.
    pub fn readings(&self) -> [SignalReading; 5] {
        [
            self.rsi,
            self.moving_averages,
            self.macd,
            self.bollinger,
            self.volume,
        ]
    }
}

/// Map an indicator snapshot to signals.
pub fn generate_signals(snapshot: &IndicatorSnapshot) -> SignalSet {
    let rsi = rsi_signal(snapshot.rsi.value);
    let moving_averages = ma_signal(
        snapshot.moving_averages.price,
        snapshot.moving_averages.sma_20,
        snapshot.moving_averages.sma_50,
    );
    let macd = macd_signal(snapshot.macd.value, snapshot.macd.signal_line);
    let bollinger = bollinger_signal(
        snapshot.bollinger.price,
        snapshot.bollinger.upper,
        snapshot.bollinger.lower,
    );
    let volume = volume_signal(snapshot.volume.ratio);

    let overall = aggregate(&[rsi, moving_averages, macd, bollinger, volume]);

    SignalSet {
        rsi,
        moving_averages,
        macd,
        bollinger,
        volume,
        overall,
    }
}

fn rsi_signal(rsi: f64) -> SignalReading {
    let signal = if rsi < 30.0 {
        IndicatorSignal::Buy
    } else if rsi > 70.0 {
        IndicatorSignal::Sell
    } else {
        IndicatorSignal::Neutral
    };
    SignalReading::new(signal, rsi < 20.0 || rsi > 80.0)
}

fn ma_signal(price: f64, sma_20: f64, sma_50: f64) -> SignalReading {
    let signal = if price > sma_20 && sma_20 > sma_50 {
        IndicatorSignal::Buy
    } else if price < sma_20 && sma_20 < sma_50 {
        IndicatorSignal::Sell
    } else {
        IndicatorSignal::Neutral
    };
    SignalReading::new(signal, distance_ratio(price, sma_50) > 0.05)
}

fn macd_signal(macd: f64, signal_line: f64) -> SignalReading {
    let signal = if macd > signal_line {
        IndicatorSignal::Buy
    } else {
        IndicatorSignal::Sell
    };
    SignalReading::new(signal, (macd - signal_line).abs() > 1.0)
}

fn bollinger_signal(price: f64, upper: f64, lower: f64) -> SignalReading {
    let signal = if price <= lower {
        IndicatorSignal::Buy
    } else if price >= upper {
        IndicatorSignal::Sell
    } else {
        IndicatorSignal::Neutral
    };
    SignalReading::new(signal, price <= lower * 0.98 || price >= upper * 1.02)
}

fn volume_signal(ratio: f64) -> SignalReading {
    let signal = if ratio > 1.5 {
        IndicatorSignal::Bullish
    } else if ratio < 0.5 {
        IndicatorSignal::Bearish
    } else {
        IndicatorSignal::Neutral
    };
    SignalReading::new(signal, ratio > 2.0 || ratio < 0.3)
}

/// |price - reference| / reference, or 0.0 for a zero reference.
pub(crate) fn distance_ratio(price: f64, reference: f64) -> f64 {
    if reference == 0.0 {
        0.0
    } else {
        (price - reference).abs() / reference.abs()
    }
}

/// Buy thresholds are checked before sell thresholds, so a 2-2 tie reads `Buy`.
fn aggregate(readings: &[SignalReading]) -> Overall {
    let buy_count = readings.iter().filter(|r| r.signal.is_buy()).count();
    let sell_count = readings.iter().filter(|r| r.signal.is_sell()).count();
    let neutral_count = readings.len() - buy_count - sell_count;

    let signal = if buy_count >= 3 {
        OverallSignal::StrongBuy
    } else if buy_count >= 2 {
        OverallSignal::Buy
    } else if sell_count >= 3 {
        OverallSignal::StrongSell
    } else if sell_count >= 2 {
        OverallSignal::Sell
    } else {
        OverallSignal::Neutral
    };

    Overall {
        signal,
        buy_count,
        sell_count,
        neutral_count,
    }
}
