//! The `analyze` entry point: snapshot, signals, trend, and levels for one series.
//!
//! Pure and stateless. Independent series can be analyzed concurrently; the
//! batch helpers spread them across the rayon pool.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{Bar, DataError, Series};
use crate::levels::{find_levels, Levels};
use crate::signals::{generate_signals, SignalSet};
use crate::snapshot::{compute_snapshot, IndicatorSnapshot};
use crate::trend::{assess_trend, TrendAssessment};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub indicators: IndicatorSnapshot,
    pub signals: SignalSet,
    pub trend: TrendAssessment,
    pub support_resistance: Levels,
}

/// Analyze a validated series.
///
/// # Errors
/// `DataError::TooFewBars` when the series holds fewer than `params::MIN_BARS` bars.
pub fn analyze(series: &Series) -> Result<Analysis, DataError> {
    let indicators = compute_snapshot(series)?;
    let signals = generate_signals(&indicators);
    let trend = assess_trend(&indicators);
    let support_resistance = find_levels(series);

    debug!(
        bars = series.len(),
        overall = ?signals.overall.signal,
        direction = ?trend.direction,
        support = support_resistance.support.len(),
        resistance = support_resistance.resistance.len(),
        "analysis complete"
    );

    Ok(Analysis {
        indicators,
        signals,
        trend,
        support_resistance,
    })
}

/// Validate raw bars and analyze them in one step.
pub fn analyze_bars(bars: Vec<Bar>) -> Result<Analysis, DataError> {
    analyze(&Series::new(bars)?)
}

/// Analyze many independent series in parallel.
///
/// Results are returned in input order; one failing series does not affect
/// the others.
pub fn analyze_batch(series: &[Series]) -> Vec<Result<Analysis, DataError>> {
    series.par_iter().map(analyze).collect()
}

/// Sequential counterpart of [`analyze_batch`], for callers that manage their
/// own threads.
pub fn analyze_batch_sequential(series: &[Series]) -> Vec<Result<Analysis, DataError>> {
    series.iter().map(analyze).collect()
}
