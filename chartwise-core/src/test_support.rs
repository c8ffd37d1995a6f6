//! Shared fixtures for unit tests.

use crate::domain::{Bar, Series};
use chrono::{DateTime, Duration, TimeZone, Utc};

fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap()
}

/// Create synthetic daily bars from close prices.
///
/// Generates plausible OHLV: open = prev_close (or close for first bar),
/// high = max(open,close) + 1.0, low = min(open,close) - 1.0, volume = 1000.
pub fn make_bars(closes: &[f64]) -> Vec<Bar> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            Bar {
                timestamp: base_time() + Duration::days(i as i64),
                open,
                high: open.max(close) + 1.0,
                low: open.min(close) - 1.0,
                close,
                volume: 1000.0,
            }
        })
        .collect()
}

/// Bars with explicit highs and lows; open and close sit at the midpoint.
pub fn make_hl_bars(highs: &[f64], lows: &[f64]) -> Vec<Bar> {
    assert_eq!(highs.len(), lows.len());
    highs
        .iter()
        .zip(lows)
        .enumerate()
        .map(|(i, (&high, &low))| {
            let mid = (high + low) / 2.0;
            Bar {
                timestamp: base_time() + Duration::days(i as i64),
                open: mid,
                high,
                low,
                close: mid,
                volume: 1000.0,
            }
        })
        .collect()
}

pub fn make_series(closes: &[f64]) -> Series {
    Series::new(make_bars(closes)).unwrap()
}

/// Assert two f64 values are approximately equal (within epsilon).
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
pub const DEFAULT_EPSILON: f64 = 1e-10;
