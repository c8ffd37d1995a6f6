//! Serializable analysis report: the engine output plus caller metadata.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::analysis::Analysis;
use crate::domain::{Series, SeriesHash};

/// Pass-through metadata supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportMeta {
    pub symbol: String,
    pub timeframe: String,
}

/// Everything a caller needs to publish or cache one analysis.
///
/// `generated_at` comes from the caller so that building a report stays
/// deterministic; the engine never reads the clock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub symbol: String,
    pub timeframe: String,
    pub generated_at: DateTime<Utc>,
    pub series_hash: SeriesHash,
    pub bars: usize,
    pub last_timestamp: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub analysis: Analysis,
}

impl AnalysisReport {
    pub fn new(
        meta: ReportMeta,
        series: &Series,
        analysis: Analysis,
        generated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            symbol: meta.symbol,
            timeframe: meta.timeframe,
            generated_at,
            series_hash: series.content_hash(),
            bars: series.len(),
            last_timestamp: series.last().map(|b| b.timestamp),
            analysis,
        }
    }
}
