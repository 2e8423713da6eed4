//! Unit tests for EMA indicator

use fnoedge::indicators::trend::{calculate_ema, ema_series};

use crate::fixtures::linear_closes;

#[test]
fn test_ema_insufficient_data() {
    let closes = linear_closes(10, 100.0, 0.1);
    assert!(calculate_ema(&closes, 20).is_none());
    assert!(ema_series(&closes, 20).is_empty());
}

#[test]
fn test_ema_zero_period() {
    let closes = linear_closes(10, 100.0, 0.1);
    assert!(ema_series(&closes, 0).is_empty());
}

#[test]
fn test_ema_seeded_with_simple_average() {
    let closes = vec![2.0, 4.0, 6.0, 8.0];
    let series = ema_series(&closes, 2);
    assert_eq!(series.first_index(), 1);
    assert_eq!(series.len(), 3);
    assert!((series.get(1).unwrap() - 3.0).abs() < 1e-12);
    assert!((series.get(2).unwrap() - 5.0).abs() < 1e-12);
    assert!((series.get(3).unwrap() - 7.0).abs() < 1e-12);
}

#[test]
fn test_ema_recurrence() {
    let closes = vec![10.0, 11.0, 12.0, 13.0, 14.0];
    let series = ema_series(&closes, 3);
    assert_eq!(series.first_index(), 2);

    // seed = (10 + 11 + 12) / 3, k = 0.5
    let values = series.values();
    assert!((values[0] - 11.0).abs() < 1e-12);
    assert!((values[1] - 12.0).abs() < 1e-12);
    assert!((values[2] - 13.0).abs() < 1e-12);
}

#[test]
fn test_ema_length_matches_warmup() {
    let closes = linear_closes(50, 100.0, 0.1);
    for period in [12, 26] {
        let series = ema_series(&closes, period);
        assert_eq!(series.first_index(), period - 1);
        assert_eq!(series.len(), closes.len() - period + 1);
        assert_eq!(series.end_index(), closes.len());
    }
}

#[test]
fn test_fast_ema_leads_in_uptrend() {
    let closes = linear_closes(50, 100.0, 0.5);
    let fast = calculate_ema(&closes, 12).unwrap();
    let slow = calculate_ema(&closes, 26).unwrap();
    assert!(fast > slow);
}

#[test]
fn test_ema_of_constant_is_constant() {
    let closes = vec![42.5; 30];
    assert_eq!(calculate_ema(&closes, 12), Some(42.5));
}
