//! Unit tests for candle/indicator index alignment

use fnoedge::config::EngineConfig;
use fnoedge::error::SignalError;
use fnoedge::indicators::{closes, IndicatorSeries, IndicatorSet};
use fnoedge::models::indicators::MacdPoint;
use fnoedge::signals::alignment::{align_recent, AlignedBar};

use crate::fixtures::{candles_from_closes, leg_closes, linear_closes};

fn aligned(count: usize) -> Result<Vec<AlignedBar>, SignalError> {
    let config = EngineConfig::default();
    let candles = candles_from_closes(&linear_closes(count, 100.0, 0.25));
    let indicators = IndicatorSet::compute(&closes(&candles), &config);
    align_recent(&candles, &indicators, &config)
}

#[test]
fn test_below_candle_floor_is_insufficient() {
    assert_eq!(
        aligned(29),
        Err(SignalError::InsufficientData {
            available: 29,
            required: 30
        })
    );
}

#[test]
fn test_macd_not_warmed_up_is_insufficient() {
    // 30..=33 candles pass the floor but MACD's signal line needs 34.
    for count in 30..=33 {
        assert_eq!(
            aligned(count),
            Err(SignalError::InsufficientData {
                available: count,
                required: 34
            }),
            "count {count}"
        );
    }
}

#[test]
fn test_single_aligned_bar_at_warmup() {
    let bars = aligned(34).unwrap();
    assert_eq!(bars.len(), 1);
    assert_eq!(bars[0].index, 33);
}

#[test]
fn test_window_clipped_to_macd_start() {
    let bars = aligned(40).unwrap();
    let indices: Vec<usize> = bars.iter().map(|b| b.index).collect();
    assert_eq!(indices, (33..40).rev().collect::<Vec<_>>());
}

#[test]
fn test_full_window_newest_first() {
    let bars = aligned(100).unwrap();
    assert_eq!(bars.len(), 20);
    assert_eq!(bars.first().unwrap().index, 99);
    assert_eq!(bars.last().unwrap().index, 80);
    assert!(bars.windows(2).all(|w| w[0].index == w[1].index + 1));
}

#[test]
fn test_bar_values_share_candle_index() {
    let config = EngineConfig::default();
    let candles = candles_from_closes(&leg_closes(200.0, &[(13, -3.0), (18, 1.0), (12, -1.0)]));
    let indicators = IndicatorSet::compute(&closes(&candles), &config);
    let bars = align_recent(&candles, &indicators, &config).unwrap();

    assert!(!bars.is_empty());
    for bar in &bars {
        assert_eq!(bar.candle, candles[bar.index]);
        assert_eq!(Some(bar.rsi), indicators.rsi.get(bar.index));
        assert_eq!(Some(bar.macd), indicators.macd.get(bar.index));
        assert_eq!(Some(bar.ema_fast), indicators.ema_fast.get(bar.index));
        assert_eq!(Some(bar.ema_slow), indicators.ema_slow.get(bar.index));
    }
}

#[test]
fn test_positions_without_every_indicator_are_skipped() {
    let config = EngineConfig::default();
    let candles = candles_from_closes(&linear_closes(100, 100.0, 0.25));
    let mut indicators = IndicatorSet::compute(&closes(&candles), &config);

    // An RSI that only starts at 95 leaves five usable bars in the window.
    indicators.rsi = IndicatorSeries::new(95, vec![50.0; 5]);
    let bars = align_recent(&candles, &indicators, &config).unwrap();
    let indices: Vec<usize> = bars.iter().map(|b| b.index).collect();
    assert_eq!(indices, vec![99, 98, 97, 96, 95]);
}

#[test]
fn test_empty_indicator_is_insufficient() {
    let config = EngineConfig::default();
    let candles = candles_from_closes(&linear_closes(100, 100.0, 0.25));
    let mut indicators = IndicatorSet::compute(&closes(&candles), &config);
    indicators.macd = IndicatorSeries::<MacdPoint>::empty();

    assert!(matches!(
        align_recent(&candles, &indicators, &config),
        Err(SignalError::InsufficientData { available: 100, .. })
    ));
}

#[test]
fn test_aligned_bar_at_rejects_warmup_index() {
    let config = EngineConfig::default();
    let candles = candles_from_closes(&linear_closes(60, 100.0, 0.25));
    let indicators = IndicatorSet::compute(&closes(&candles), &config);

    assert!(AlignedBar::at(32, &candles, &indicators).is_none());
    assert!(AlignedBar::at(33, &candles, &indicators).is_some());
    assert!(AlignedBar::at(60, &candles, &indicators).is_none());
    assert_eq!(indicators.warmup_index(), 33);
}

#[test]
fn test_custom_scan_window() {
    let config = EngineConfig {
        scan_window: 5,
        ..EngineConfig::default()
    };
    let candles = candles_from_closes(&linear_closes(100, 100.0, 0.25));
    let indicators = IndicatorSet::compute(&closes(&candles), &config);
    let bars = align_recent(&candles, &indicators, &config).unwrap();
    assert_eq!(bars.len(), 5);
    assert_eq!(bars[4].index, 95);
}
