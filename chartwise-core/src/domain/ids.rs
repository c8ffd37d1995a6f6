use serde::{Deserialize, Serialize};
use std::fmt;

use super::bar::Bar;

/// Deterministic series hash (content hash of the validated bars).
///
/// Lets callers key their own result caches by content instead of by
/// symbol/timeframe alone.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeriesHash(pub String);

impl SeriesHash {
    /// BLAKE3 over the canonical little-endian encoding of every bar.
    ///
    /// Timestamps are encoded as Unix nanoseconds (falling back to microseconds
    /// outside the i64 nanosecond range); floats by their IEEE-754 bits, so
    /// `-0.0` and `0.0` hash differently.
    pub fn of_bars(bars: &[Bar]) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&(bars.len() as u64).to_le_bytes());
        for bar in bars {
            let ts = bar
                .timestamp
                .timestamp_nanos_opt()
                .unwrap_or_else(|| bar.timestamp.timestamp_micros());
            hasher.update(&ts.to_le_bytes());
            for v in [bar.open, bar.high, bar.low, bar.close, bar.volume] {
                hasher.update(&v.to_bits().to_le_bytes());
            }
        }
        Self(hasher.finalize().to_hex().to_string())
    }
}

impl fmt::Display for SeriesHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
