//! Technical indicator families.
//!
//! Each family implements [`Indicator`] and writes its own fields of an
//! [`IndicatorSet`]. The [`IndicatorBank`] runs them in order and isolates
//! failures so one family cannot blank out another.

pub mod adx;
pub mod atr;
pub mod bank;
pub mod bollinger;
pub mod cci;
pub mod ema;
pub mod gap;
pub mod macd;
pub mod mfi;
pub mod obv;
pub mod price;
pub mod rolling;
pub mod rsi;
pub mod sma;
pub mod stochastic;
pub mod volume;
pub mod vwap;
pub mod williams;

pub use adx::Adx;
pub use atr::Atr;
pub use bank::IndicatorBank;
pub use bollinger::BollingerBands;
pub use cci::Cci;
pub use ema::Ema;
pub use gap::GapDetector;
pub use macd::Macd;
pub use mfi::Mfi;
pub use obv::Obv;
pub use price::PriceSnapshot;
pub use rsi::Rsi;
pub use sma::Sma;
pub use stochastic::Stochastic;
pub use volume::RelativeVolume;
pub use vwap::Vwap;
pub use williams::WilliamsR;

use crate::error::{AnalysisError, Result};
use crate::services::series::Series;
use crate::types::{IndicatorCategory, IndicatorSet, TimeframeProfile};

/// Trait for implementing an indicator family.
pub trait Indicator: Send + Sync {
    /// Unique identifier for this family.
    fn id(&self) -> &str;

    /// Category this family belongs to.
    fn category(&self) -> IndicatorCategory;

    /// Bars needed before the family's primary value is defined.
    fn min_periods(&self) -> usize;

    /// Write this family's fields into `set`.
    ///
    /// Short series leave fields `None`; an `Err` means the family failed
    /// and none of its writes are kept.
    fn apply(&self, series: &Series, set: &mut IndicatorSet) -> Result<()>;
}

/// Reject a non-finite value produced inside a family.
pub(crate) fn checked(family: &str, value: Option<f64>) -> Result<Option<f64>> {
    match value {
        Some(v) if !v.is_finite() => Err(AnalysisError::computation(
            family,
            format!("non-finite value {}", v),
        )),
        other => Ok(other),
    }
}

/// All families for a timeframe profile, in report order.
pub fn all_indicators(profile: &TimeframeProfile) -> Vec<Box<dyn Indicator>> {
    vec![
        Box::new(PriceSnapshot),
        // Momentum
        Box::new(Rsi::new(profile.rsi)),
        // Trend
        Box::new(Sma::new(profile.sma_fast, profile.sma_slow)),
        Box::new(Ema::new(profile.ema_fast, profile.ema_slow)),
        Box::new(Macd::new(profile.macd_fast, profile.macd_slow, profile.macd_signal)),
        // Volatility
        Box::new(BollingerBands::new(profile.bollinger)),
        // Oscillators
        Box::new(Stochastic::default()),
        Box::new(WilliamsR::default()),
        Box::new(Atr::new(profile.atr)),
        Box::new(Adx::default()),
        // Volume
        Box::new(RelativeVolume::default()),
        Box::new(Obv),
        Box::new(Cci::default()),
        Box::new(Mfi::default()),
        Box::new(GapDetector::default()),
    ]
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::services::series::Series;
    use crate::types::Bar;

    pub fn create_uptrend_bars(count: usize) -> Vec<Bar> {
        (0..count)
            .map(|i| {
                let base = 100.0 + i as f64 * 1.5;
                Bar::new(1_000_000 + i as i64 * 60_000, base, base + 2.0, base - 1.0, base + 1.0, 1000.0)
            })
            .collect()
    }

    pub fn create_downtrend_bars(count: usize) -> Vec<Bar> {
        (0..count)
            .map(|i| {
                let base = 200.0 - i as f64 * 1.5;
                Bar::new(1_000_000 + i as i64 * 60_000, base, base + 1.0, base - 2.0, base - 1.0, 1000.0)
            })
            .collect()
    }

    pub fn create_flat_bars(count: usize, price: f64) -> Vec<Bar> {
        (0..count)
            .map(|i| Bar::new(1_000_000 + i as i64 * 60_000, price, price, price, price, 1000.0))
            .collect()
    }

    /// Deterministic zig-zag so gains and losses both occur.
    pub fn create_choppy_bars(count: usize) -> Vec<Bar> {
        (0..count)
            .map(|i| {
                let wave = if i % 2 == 0 { 1.5 } else { -1.0 };
                let base = 100.0 + i as f64 * 0.2 + wave;
                let volume = 1000.0 + (i % 5) as f64 * 150.0;
                Bar::new(1_000_000 + i as i64 * 60_000, base - 0.3, base + 1.0, base - 1.0, base, volume)
            })
            .collect()
    }

    pub fn series(bars: Vec<Bar>) -> Series {
        Series::new(bars).unwrap()
    }

    pub fn assert_approx(actual: f64, expected: f64, tol: f64) {
        assert!(
            (actual - expected).abs() < tol,
            "expected {expected}, got {actual}"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_indicators_unique_ids() {
        let indicators = all_indicators(&TimeframeProfile::default());
        let mut ids: Vec<&str> = indicators.iter().map(|i| i.id()).collect();
        let count = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), count);
    }

    #[test]
    fn test_checked_rejects_non_finite() {
        assert!(checked("x", Some(f64::INFINITY)).is_err());
        assert_eq!(checked("x", None).unwrap(), None);
        assert_eq!(checked("x", Some(1.0)).unwrap(), Some(1.0));
    }
}
