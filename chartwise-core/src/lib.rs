//! Chartwise Core: technical-analysis engine over OHLCV series.
//!
//! Turns a validated, chronological bar series into:
//! - an indicator snapshot at the last bar (RSI, SMA 20/50/200, MACD, Bollinger, volume)
//! - per-indicator signals and an overall buy/sell call
//! - a trend assessment (direction, strength, stage, recommendation)
//! - support and resistance levels from local extrema
//!
//! The engine performs no I/O and keeps no state between calls.

pub mod analysis;
pub mod domain;
pub mod indicators;
pub mod levels;
pub mod params;
pub mod report;
pub mod signals;
pub mod snapshot;
pub mod trend;

#[cfg(test)]
pub(crate) mod test_support;

pub use analysis::{analyze, analyze_batch, analyze_batch_sequential, analyze_bars, Analysis};
pub use domain::{Bar, DataError, Series, SeriesHash};
pub use levels::{find_levels, Levels};
pub use report::{AnalysisReport, ReportMeta};
pub use signals::{generate_signals, IndicatorSignal, OverallSignal, SignalSet, Strength};
pub use snapshot::{compute_snapshot, IndicatorSnapshot};
pub use trend::{assess_trend, Recommendation, Stage, TrendAssessment, TrendDirection};
