//! End-to-end scenarios for `analyze` and the support/resistance locator.
//!
//! 1. Rising 60-bar series → strong uptrend, overall buy.
//! 2. Flat closes → RSI 100, collapsed Bollinger bands.
//! 3. 3-bar series → snapshot refuses, locator returns empty levels.
//! 4. A lone peak at index 10 → its high is reported as resistance.
//! 5. Falling series mirrors the rising one.
//! 6. Repeated calls are bit-identical.

use chartwise_core::params::MIN_BARS;
use chartwise_core::{
    analyze, find_levels, Bar, DataError, IndicatorSignal, OverallSignal, Recommendation, Series,
    Stage, Strength, TrendDirection,
};
use chrono::{Duration, TimeZone, Utc};

// ──────────────────────────────────────────────
// Helpers
// ──────────────────────────────────────────────

fn bar(i: usize, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Bar {
    Bar {
        timestamp: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::hours(i as i64),
        open,
        high,
        low,
        close,
        volume,
    }
}

/// Hourly bars from closes with constant volume.
fn series_from_closes(closes: &[f64]) -> Series {
    let bars = closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            bar(i, open, open.max(close) + 0.5, open.min(close) - 0.5, close, 1000.0)
        })
        .collect();
    Series::new(bars).unwrap()
}

// ──────────────────────────────────────────────
// Scenarios
// ──────────────────────────────────────────────

#[test]
fn rising_series_is_strong_uptrend() {
    let closes: Vec<f64> = (0..60).map(|i| 100.0 + i as f64).collect();
    let analysis = analyze(&series_from_closes(&closes)).unwrap();

    assert_eq!(analysis.trend.direction, TrendDirection::StrongUptrend);
    assert!(matches!(
        analysis.signals.overall.signal,
        OverallSignal::Buy | OverallSignal::StrongBuy
    ));

    // No losses at all → RSI pinned at 100, overbought, late stage.
    assert_eq!(analysis.indicators.rsi.value, 100.0);
    assert_eq!(analysis.signals.rsi.signal, IndicatorSignal::Sell);
    assert_eq!(analysis.trend.stage, Stage::Late);
    assert_eq!(analysis.trend.recommendation, Recommendation::Hold);
    // 159 vs SMA50 134.5 is ~18% away.
    assert_eq!(analysis.trend.strength, Strength::Strong);
    assert_eq!(analysis.signals.moving_averages.signal, IndicatorSignal::Buy);
    assert_eq!(analysis.signals.macd.signal, IndicatorSignal::Buy);
    assert_eq!(analysis.signals.volume.signal, IndicatorSignal::Neutral);
}

#[test]
fn falling_series_is_strong_downtrend() {
    let closes: Vec<f64> = (0..60).map(|i| 200.0 - i as f64).collect();
    let analysis = analyze(&series_from_closes(&closes)).unwrap();

    assert_eq!(analysis.indicators.rsi.value, 0.0);
    assert_eq!(analysis.trend.direction, TrendDirection::StrongDowntrend);
    assert_eq!(analysis.trend.stage, Stage::Late);
    // RSI 0 reads oversold (buy), MA and MACD read sell.
    assert_eq!(analysis.signals.rsi.signal, IndicatorSignal::Buy);
    assert_eq!(analysis.signals.overall.signal, OverallSignal::Sell);
    assert_eq!(analysis.signals.moving_averages.signal, IndicatorSignal::Sell);
    assert_eq!(analysis.signals.macd.signal, IndicatorSignal::Sell);
}

#[test]
fn flat_series_rsi_is_100_and_bands_collapse() {
    let analysis = analyze(&series_from_closes(&[42.0; 20])).unwrap();
    let bb = analysis.indicators.bollinger;

    assert_eq!(analysis.indicators.rsi.value, 100.0);
    assert_eq!(bb.upper, bb.middle);
    assert_eq!(bb.middle, bb.lower);
    // Price sits on both bands at once; the lower band is checked first.
    assert_eq!(analysis.signals.bollinger.signal, IndicatorSignal::Buy);
    assert_eq!(analysis.trend.direction, TrendDirection::Neutral);
    assert_eq!(analysis.trend.stage, Stage::Unknown);
    assert_eq!(analysis.trend.recommendation, Recommendation::Neutral);
}

#[test]
fn three_bars_error_for_snapshot_but_not_for_levels() {
    let series = series_from_closes(&[10.0, 11.0, 12.0]);

    assert_eq!(
        analyze(&series).unwrap_err(),
        DataError::TooFewBars {
            required: MIN_BARS,
            actual: 3
        }
    );
    let levels = find_levels(&series);
    assert!(levels.support.is_empty());
    assert!(levels.resistance.is_empty());
}

#[test]
fn lone_peak_at_index_10_is_resistance() {
    let mut highs = vec![10.0; 21];
    highs[10] = 20.0;
    let bars = highs
        .iter()
        .enumerate()
        .map(|(i, &h)| bar(i, 9.0, h, 8.0, 9.0, 500.0))
        .collect();
    let series = Series::new(bars).unwrap();

    let levels = analyze(&series).unwrap().support_resistance;
    assert_eq!(levels.resistance, vec![20.0]);
    assert!(levels.support.is_empty());
}

#[test]
fn volume_spike_reads_bullish() {
    let closes: Vec<f64> = (0..30).map(|i| 100.0 + (i % 3) as f64).collect();
    let mut bars = series_from_closes(&closes).into_bars();
    if let Some(last) = bars.last_mut() {
        last.volume = 5000.0;
    }
    let analysis = analyze(&Series::new(bars).unwrap()).unwrap();

    // average = (19 * 1000 + 5000) / 20 = 1200 → ratio ≈ 4.17
    assert!(analysis.indicators.volume.ratio > 2.0);
    assert_eq!(analysis.signals.volume.signal, IndicatorSignal::Bullish);
    assert_eq!(analysis.signals.volume.strength, Strength::Strong);
}

#[test]
fn analyze_is_idempotent() {
    let closes: Vec<f64> = (0..120)
        .map(|i| 100.0 + (i as f64 * 0.3).sin() * 7.0 + i as f64 * 0.05)
        .collect();
    let series = series_from_closes(&closes);

    let first = serde_json::to_string(&analyze(&series).unwrap()).unwrap();
    let second = serde_json::to_string(&analyze(&series).unwrap()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn structural_errors_surface_before_computation() {
    let mut bars = series_from_closes(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).into_bars();
    bars[4].timestamp = bars[2].timestamp;
    assert_eq!(
        Series::new(bars),
        Err(DataError::NonMonotonicTimestamps { index: 4 })
    );
}
