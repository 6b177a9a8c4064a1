//! Integration tests for indicators, scoring and levels through the public API

use sextant::services::{AnalysisContext, IndicatorBank, LevelPredictor, Series, TrendScorer};
use sextant::types::{Bar, IndicatorSet, ScoringProfile, Strength, Timeframe, Trend};

fn zigzag(count: usize, amplitude: f64) -> Vec<Bar> {
    (0..count)
        .map(|i| {
            let close = 100.0 + ((i as f64) * 0.45).sin() * amplitude + (i % 3) as f64 * 0.4;
            let open = close - 0.5;
            Bar::new(
                1_000_000 + i as i64 * 60_000,
                open,
                close.max(open) + 1.2,
                close.min(open) - 1.1,
                close,
                800.0 + (i % 7) as f64 * 90.0,
            )
        })
        .collect()
}

fn compute(bars: Vec<Bar>, timeframe: Timeframe) -> IndicatorSet {
    let series = Series::new(bars).unwrap();
    let ctx = AnalysisContext::new("NDX");
    IndicatorBank::for_timeframe(timeframe).compute(&series, &ctx, timeframe)
}

#[test]
fn test_oscillator_ranges() {
    for amplitude in [0.5, 4.0, 12.0] {
        let set = compute(zigzag(220, amplitude), Timeframe::OneDay);

        let rsi = set.rsi.unwrap();
        assert!((0.0..=100.0).contains(&rsi), "rsi {rsi}");
        let k = set.stoch_k.unwrap();
        let d = set.stoch_d.unwrap();
        assert!((0.0..=100.0).contains(&k), "%K {k}");
        assert!((0.0..=100.0).contains(&d), "%D {d}");
        let r = set.williams_r.unwrap();
        assert!((-100.0..=0.0).contains(&r), "%R {r}");
        let mfi = set.mfi.unwrap();
        assert!((0.0..=100.0).contains(&mfi), "mfi {mfi}");
    }
}

#[test]
fn test_macd_histogram_identity() {
    let set = compute(zigzag(120, 6.0), Timeframe::FiveMinutes);
    let (macd, signal, histogram) = (
        set.macd.unwrap(),
        set.macd_signal.unwrap(),
        set.macd_histogram.unwrap(),
    );
    assert!((histogram - (macd - signal)).abs() < 1e-9);
    assert_eq!(set.macd_bullish, Some(macd > signal));
}

#[test]
fn test_short_series_yields_undefined() {
    let set = compute(zigzag(10, 3.0), Timeframe::OneDay);
    assert_eq!(set.bar_count, 10);
    assert!(set.last_close.is_some());
    assert!(set.rsi.is_none());
    assert!(set.sma_20.is_none());
    assert!(set.macd.is_none());
    assert!(set.bb_upper.is_none());
    assert!(set.adx.is_none());
}

#[test]
fn test_confidence_and_strength_consistent() {
    for profile in [ScoringProfile::Canonical, ScoringProfile::Enhanced] {
        let scorer = TrendScorer::new(profile);
        for amplitude in [0.5, 3.0, 9.0] {
            let verdict = scorer.score(&compute(zigzag(240, amplitude), Timeframe::OneDay));
            assert!((0.0..=95.0).contains(&verdict.confidence()));
            assert_eq!(verdict.strength(), Strength::from_confidence(verdict.confidence()));
            if verdict.trend() == Trend::Neutral {
                assert_eq!(verdict.bullish_weight(), verdict.bearish_weight());
            }
        }
    }
}

#[test]
fn test_flat_series_collapses_fibonacci() {
    let bars: Vec<Bar> = (0..30)
        .map(|i| Bar::new(1_000_000 + i * 60_000, 250.0, 250.0, 250.0, 250.0, 500.0))
        .collect();
    let series = Series::new(bars).unwrap();
    let ctx = AnalysisContext::new("NDX");
    let set = IndicatorBank::for_timeframe(Timeframe::OneDay).compute(&series, &ctx, Timeframe::OneDay);
    let levels = LevelPredictor::new().predict(&series, &set);

    for fib in [
        levels.fibonacci_23_6,
        levels.fibonacci_38_2,
        levels.fibonacci_50_0,
        levels.fibonacci_61_8,
        levels.fibonacci_78_6,
    ] {
        assert_eq!(fib, Some(250.0));
    }
    assert_eq!(levels.current_price, Some(250.0));
}

#[test]
fn test_psychological_levels_near_price() {
    let bars = zigzag(120, 5.0);
    let series = Series::new(bars).unwrap();
    let ctx = AnalysisContext::new("NDX");
    let set = IndicatorBank::for_timeframe(Timeframe::OneDay).compute(&series, &ctx, Timeframe::OneDay);
    let levels = LevelPredictor::new().predict(&series, &set);
    let price = levels.current_price.unwrap();

    assert!(levels.resistances().iter().all(Option::is_some));
    assert!(levels.supports().iter().all(Option::is_some));
    assert!(levels.psychological_levels.windows(2).all(|w| w[0] < w[1]));
    assert!(levels
        .psychological_levels
        .iter()
        .all(|l| (l - price).abs() <= price * 0.05));
}
