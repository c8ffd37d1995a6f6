//! Fixed indicator parameters.
//!
//! These are not configurable: the snapshot names its fields after them
//! (`sma_20`, `sma_50`, `sma_200`), and the signal thresholds assume them.

pub const RSI_PERIOD: usize = 14;

pub const SMA_SHORT: usize = 20;
pub const SMA_MEDIUM: usize = 50;
pub const SMA_LONG: usize = 200;

pub const MACD_FAST: usize = 12;
pub const MACD_SLOW: usize = 26;
pub const MACD_SIGNAL: usize = 9;

pub const BOLLINGER_PERIOD: usize = 20;
pub const BOLLINGER_MULTIPLIER: f64 = 2.0;

pub const VOLUME_PERIOD: usize = 20;

/// Minimum history for the indicator snapshot.
///
/// Series below this are an input error for the snapshot but only an empty
/// result for the locator, which needs `2 * LEVEL_RADIUS + 1` bars before it
/// reports anything.
pub const MIN_BARS: usize = 4;

/// Bars compared on each side of a support/resistance candidate.
pub const LEVEL_RADIUS: usize = 2;

/// Cap on reported support and resistance levels, each.
pub const MAX_LEVELS: usize = 5;
