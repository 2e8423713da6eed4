//! Unit tests for RSI indicator

use fnoedge::indicators::momentum::{calculate_rsi, rsi_series};

use crate::fixtures::linear_closes;

// Wilder's worked example, 14 periods.
const WILDER_CLOSES: [f64; 20] = [
    44.34, 44.09, 44.15, 43.61, 44.33, 44.83, 45.10, 45.42, 45.84, 46.08, 45.89, 46.03, 45.61,
    46.28, 46.28, 46.00, 46.03, 46.41, 46.22, 45.64,
];

#[test]
fn test_rsi_insufficient_data() {
    let closes = linear_closes(14, 100.0, 1.0);
    assert!(rsi_series(&closes, 14).is_empty());
    assert!(calculate_rsi(&closes, 14).is_none());
}

#[test]
fn test_rsi_first_value_needs_period_plus_one_closes() {
    let closes = linear_closes(15, 100.0, 1.0);
    let series = rsi_series(&closes, 14);
    assert_eq!(series.len(), 1);
    assert_eq!(series.first_index(), 14);
    assert_eq!(series.end_index(), closes.len());
}

#[test]
fn test_rsi_zero_period() {
    let closes = linear_closes(50, 100.0, 1.0);
    assert!(rsi_series(&closes, 0).is_empty());
}

#[test]
fn test_rsi_matches_wilder_reference() {
    let series = rsi_series(&WILDER_CLOSES, 14);
    assert_eq!(series.first_index(), 14);
    assert_eq!(series.len(), 6);

    let first = series.get(14).unwrap();
    assert!((first - 70.464135).abs() < 1e-5, "got {first}");
    let second = series.get(15).unwrap();
    assert!((second - 66.249619).abs() < 1e-5, "got {second}");
    let last = series.last().unwrap();
    assert!((last - 57.915021).abs() < 1e-5, "got {last}");
}

#[test]
fn test_rsi_only_gains_is_100() {
    let closes = linear_closes(30, 100.0, 0.5);
    let series = rsi_series(&closes, 14);
    assert!(series.values().iter().all(|&v| v == 100.0));
}

#[test]
fn test_rsi_only_losses_is_0() {
    let closes = linear_closes(30, 100.0, -0.5);
    let series = rsi_series(&closes, 14);
    assert!(series.values().iter().all(|&v| v == 0.0));
}

#[test]
fn test_rsi_flat_prices_is_100() {
    // No losses at all: the average loss is zero.
    let closes = vec![250.0; 40];
    assert_eq!(calculate_rsi(&closes, 14), Some(100.0));
}

#[test]
fn test_rsi_stays_in_range() {
    let closes: Vec<f64> = (0..120)
        .map(|i| 100.0 + ((i as f64) * 0.7).sin() * 5.0 + (i % 7) as f64)
        .collect();
    let series = rsi_series(&closes, 14);
    assert_eq!(series.len(), closes.len() - 14);
    for &value in series.values() {
        assert!((0.0..=100.0).contains(&value), "RSI out of range: {value}");
    }
}
