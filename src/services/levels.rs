//! Support and resistance level prediction.
//!
//! Candidate levels come from Bollinger bands, recent extremes, Fibonacci
//! retracements, classic pivots, ATR bands and moving averages. Candidates
//! above the current price feed the resistance ladder, those below feed the
//! support ladder, and the three nearest on each side are reported.

use tracing::debug;

use crate::services::indicators::rolling::ratio;
use crate::services::indicators::Vwap;
use crate::services::series::Series;
use crate::types::{Bar, IndicatorSet, LevelSet, VwapLevels};

/// Retracement fractions measured down from the range high.
const FIB_23_6: f64 = 0.236;
const FIB_38_2: f64 = 0.382;
const FIB_50_0: f64 = 0.5;
const FIB_61_8: f64 = 0.618;
const FIB_78_6: f64 = 0.786;

/// Psychological levels further than this fraction from price are dropped.
const PSYCHOLOGICAL_RANGE: f64 = 0.05;

/// Highest high and lowest low over a window.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Extremes {
    high: f64,
    low: f64,
}

impl Extremes {
    fn over(bars: &[Bar]) -> Option<Self> {
        let high = bars.iter().map(|b| b.high).reduce(f64::max)?;
        let low = bars.iter().map(|b| b.low).reduce(f64::min)?;
        Some(Self { high, low })
    }

    fn retracement(&self, fraction: f64) -> f64 {
        self.high - (self.high - self.low) * fraction
    }
}

/// Classic floor-trader pivots from one bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pivots {
    pub point: f64,
    pub r1: f64,
    pub r2: f64,
    pub r3: f64,
    pub s1: f64,
    pub s2: f64,
    pub s3: f64,
}

impl Pivots {
    pub fn from_bar(bar: &Bar) -> Self {
        let (h, l, c) = (bar.high, bar.low, bar.close);
        let point = (h + l + c) / 3.0;
        Self {
            point,
            r1: 2.0 * point - l,
            r2: point + (h - l),
            r3: h + 2.0 * (point - l),
            s1: 2.0 * point - h,
            s2: point - (h - l),
            s3: l - 2.0 * (h - point),
        }
    }
}

/// Round-number levels within 5% of `price`, ascending and deduplicated.
pub fn psychological_levels(price: f64) -> Vec<f64> {
    if price <= 0.0 || !price.is_finite() {
        return Vec::new();
    }
    let base_100 = (price / 100.0).trunc() * 100.0;
    let base_50 = (price / 50.0).trunc() * 50.0;

    let mut levels: Vec<f64> = (-2..=2)
        .map(|i| base_100 + i as f64 * 100.0)
        .chain((-1..=1).map(|i| base_50 + i as f64 * 50.0))
        .filter(|level| (level - price).abs() / price <= PSYCHOLOGICAL_RANGE)
        .collect();
    levels.sort_by(|a, b| a.total_cmp(b));
    levels.dedup();
    levels
}

/// Builds a [`LevelSet`] for a series and its indicator snapshot.
#[derive(Debug, Clone, Copy, Default)]
pub struct LevelPredictor;

impl LevelPredictor {
    pub fn new() -> Self {
        Self
    }

    /// Predict levels. Returns an empty set for an empty series.
    ///
    /// Recent extremes use [`Series::tail`], so short series fall back to
    /// whatever bars exist.
    pub fn predict(&self, series: &Series, indicators: &IndicatorSet) -> LevelSet {
        let Some(last) = series.last() else {
            return LevelSet::default();
        };
        let price = last.close;

        let (Some(e5), Some(e10), Some(e20)) = (
            Extremes::over(series.tail(5)),
            Extremes::over(series.tail(10)),
            Extremes::over(series.tail(20)),
        ) else {
            return LevelSet::default();
        };

        let pivots = Pivots::from_bar(last);
        let atr = indicators.atr;
        let vwap_data = Self::vwap_levels(series.tail(20), price);
        let vwap = vwap_data.vwap_20;

        let fib_23_6 = e5.retracement(FIB_23_6);
        let fib_38_2 = e5.retracement(FIB_38_2);
        let fib_61_8 = e5.retracement(FIB_61_8);
        let fib_78_6 = e5.retracement(FIB_78_6);
        let fib_38_2_20 = e20.retracement(FIB_38_2);
        let fib_61_8_20 = e20.retracement(FIB_61_8);

        let resistance_candidates = [
            indicators.bb_upper,
            Some(e5.high),
            Some(e10.high),
            Some(e20.high),
            Some(fib_23_6),
            Some(fib_38_2),
            Some(fib_38_2_20),
            Some(pivots.r1),
            Some(pivots.r2),
            atr.map(|a| price + a),
            atr.map(|a| price + 2.0 * a),
        ];
        let support_candidates = [
            indicators.bb_lower,
            Some(e5.low),
            Some(e10.low),
            Some(e20.low),
            Some(fib_61_8),
            Some(fib_78_6),
            Some(fib_61_8_20),
            Some(pivots.s1),
            Some(pivots.s2),
            atr.map(|a| price - a),
            atr.map(|a| price - 2.0 * a),
        ];

        let mut resistances: Vec<f64> = resistance_candidates
            .into_iter()
            .flatten()
            .filter(|level| *level > price)
            .collect();
        let mut supports: Vec<f64> = support_candidates
            .into_iter()
            .flatten()
            .filter(|level| *level < price)
            .collect();

        let moving_averages = [
            indicators.sma_10,
            indicators.sma_20,
            indicators.sma_50,
            indicators.ema_12,
            indicators.ema_26,
            vwap,
        ];
        for level in moving_averages.into_iter().flatten() {
            if level > price {
                resistances.push(level);
            } else if level < price {
                supports.push(level);
            }
        }
        resistances.sort_by(|a, b| a.total_cmp(b));
        supports.sort_by(|a, b| b.total_cmp(a));

        debug!(
            resistances = resistances.len(),
            supports = supports.len(),
            "Collected level candidates"
        );

        let [r1, r2, r3] = fill_ladder(&resistances, [e5.high, e10.high, pivots.r2]);
        let [s1, s2, s3] = fill_ladder(&supports, [e5.low, e10.low, pivots.s2]);

        LevelSet {
            resistance_1: Some(r1),
            resistance_2: Some(r2),
            resistance_3: Some(r3),
            support_1: Some(s1),
            support_2: Some(s2),
            support_3: Some(s3),

            recent_high_5: Some(e5.high),
            recent_low_5: Some(e5.low),
            recent_high_10: Some(e10.high),
            recent_low_10: Some(e10.low),
            recent_high_20: Some(e20.high),
            recent_low_20: Some(e20.low),

            fibonacci_23_6: Some(fib_23_6),
            fibonacci_38_2: Some(fib_38_2),
            fibonacci_50_0: Some(e5.retracement(FIB_50_0)),
            fibonacci_61_8: Some(fib_61_8),
            fibonacci_78_6: Some(fib_78_6),
            fibonacci_38_2_20: Some(fib_38_2_20),
            fibonacci_61_8_20: Some(fib_61_8_20),

            pivot_point: Some(pivots.point),
            pivot_r1: Some(pivots.r1),
            pivot_r2: Some(pivots.r2),
            pivot_r3: Some(pivots.r3),
            pivot_s1: Some(pivots.s1),
            pivot_s2: Some(pivots.s2),
            pivot_s3: Some(pivots.s3),

            atr_resistance: atr.map(|a| price + a),
            atr_support: atr.map(|a| price - a),
            atr_resistance_2: atr.map(|a| price + 2.0 * a),
            atr_support_2: atr.map(|a| price - 2.0 * a),

            bb_upper: indicators.bb_upper,
            bb_middle: indicators.bb_middle,
            bb_lower: indicators.bb_lower,

            vwap,
            vwap_data: Some(vwap_data),
            psychological_levels: psychological_levels(price),

            current_price: Some(price),
            daily_range: Some(last.high - last.low),
            atr_value: atr,
            volatility_adjusted_range: atr.map(|a| a * 2.0),
        }
    }

    /// VWAP over the last 20/10/5 of `recent`. Without any volume the
    /// current price stands in for the 20-bar VWAP.
    fn vwap_levels(recent: &[Bar], price: f64) -> VwapLevels {
        let tail = |n: usize| &recent[recent.len().saturating_sub(n)..];
        let Some(vwap_20) = Vwap::over(recent) else {
            return VwapLevels {
                vwap_20: Some(price),
                vwap_10: None,
                vwap_5: None,
                vwap_deviation_pct: 0.0,
                above_vwap: true,
            };
        };
        let deviation = ratio(price - vwap_20, vwap_20).map(|d| d * 100.0).unwrap_or(0.0);
        VwapLevels {
            vwap_20: Some(vwap_20),
            vwap_10: (recent.len() >= 10).then(|| Vwap::over(tail(10))).flatten(),
            vwap_5: (recent.len() >= 5).then(|| Vwap::over(tail(5))).flatten(),
            vwap_deviation_pct: (deviation * 100.0).round() / 100.0,
            above_vwap: price > vwap_20,
        }
    }
}

/// First three rungs of a sorted ladder. Each missing rung takes the
/// fallback for its own slot.
fn fill_ladder(ladder: &[f64], fallbacks: [f64; 3]) -> [f64; 3] {
    std::array::from_fn(|i| ladder.get(i).copied().unwrap_or(fallbacks[i]))
}
