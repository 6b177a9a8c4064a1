//! Average Directional Index (ADX) indicator.

use crate::error::Result;
use crate::services::indicators::rolling::{defined, latest, ratio, rolling_mean, true_range};
use crate::services::indicators::{checked, Indicator};
use crate::services::series::Series;
use crate::types::{AdxTrendStrength, IndicatorCategory, IndicatorSet};

/// ADX (Average Directional Index) indicator.
///
/// Measures trend strength regardless of direction:
/// - +DM/-DM from high/low differences, each kept only on its own side
/// - +DI/-DI = 100 × rolling mean of DM / rolling mean of TR
/// - DX = 100 × |+DI - -DI| / (+DI + -DI)
/// - ADX = rolling mean of DX
///
/// Two derived flags: a strength label (ADX > 25) and `trend_is_strong`
/// (ADX > 20).
pub struct Adx {
    period: usize,
}

impl Default for Adx {
    fn default() -> Self {
        Self { period: 14 }
    }
}

impl Indicator for Adx {
    fn id(&self) -> &str {
        "adx"
    }

    fn category(&self) -> IndicatorCategory {
        IndicatorCategory::Trend
    }

    fn min_periods(&self) -> usize {
        self.period * 2
    }

    fn apply(&self, series: &Series, set: &mut IndicatorSet) -> Result<()> {
        let bars = series.bars();
        let mut plus_dm = Vec::with_capacity(bars.len());
        let mut minus_dm = Vec::with_capacity(bars.len());
        for i in 0..bars.len() {
            if i == 0 {
                plus_dm.push(None);
                minus_dm.push(None);
                continue;
            }
            let up = bars[i].high - bars[i - 1].high;
            let down = bars[i].low - bars[i - 1].low;
            plus_dm.push(Some(up.max(0.0)));
            minus_dm.push(Some(down.min(0.0).abs()));
        }

        let tr = rolling_mean(&defined(&true_range(bars)), self.period);
        let plus = rolling_mean(&plus_dm, self.period);
        let minus = rolling_mean(&minus_dm, self.period);

        let mut plus_di = Vec::with_capacity(bars.len());
        let mut minus_di = Vec::with_capacity(bars.len());
        let mut dx = Vec::with_capacity(bars.len());
        for i in 0..bars.len() {
            let p = tr[i].zip(plus[i]).and_then(|(t, p)| ratio(p, t)).map(|v| v * 100.0);
            let m = tr[i].zip(minus[i]).and_then(|(t, m)| ratio(m, t)).map(|v| v * 100.0);
            dx.push(p.zip(m).and_then(|(p, m)| ratio((p - m).abs(), p + m)).map(|v| v * 100.0));
            plus_di.push(p);
            minus_di.push(m);
        }
        let adx = rolling_mean(&dx, self.period);

        set.adx = checked(self.id(), latest(&adx))?;
        set.plus_di = checked(self.id(), latest(&plus_di))?;
        set.minus_di = checked(self.id(), latest(&minus_di))?;
        set.adx_trend_strength = AdxTrendStrength::from_adx(set.adx);
        set.trend_is_strong = set.adx.map(|v| v > 20.0);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::indicators::test_support::*;

    fn adx_of(bars: Vec<crate::types::Bar>) -> IndicatorSet {
        let mut set = IndicatorSet::default();
        Adx::default().apply(&series(bars), &mut set).unwrap();
        set
    }

    #[test]
    fn test_adx_insufficient_data() {
        let set = adx_of(create_uptrend_bars(27));
        assert!(set.adx.is_none());
        assert!(set.plus_di.is_some());
        assert_eq!(set.adx_trend_strength, AdxTrendStrength::Unknown);
        assert!(set.trend_is_strong.is_none());
    }

    #[test]
    fn test_adx_strong_uptrend() {
        let set = adx_of(create_uptrend_bars(28));
        // Every bar moves up: -DM is zero so DX is 100
        assert_approx(set.adx.unwrap(), 100.0, 1e-9);
        assert_eq!(set.adx_trend_strength, AdxTrendStrength::Strong);
        assert_eq!(set.trend_is_strong, Some(true));
        assert!(set.plus_di.unwrap() > set.minus_di.unwrap());
    }

    #[test]
    fn test_adx_flat_series_undefined() {
        let set = adx_of(create_flat_bars(60, 10.0));
        assert!(set.adx.is_none());
        assert_eq!(set.adx_trend_strength, AdxTrendStrength::Unknown);
    }

    #[test]
    fn test_adx_value_range() {
        let set = adx_of(create_choppy_bars(90));
        let adx = set.adx.unwrap();
        assert!((0.0..=100.0).contains(&adx));
    }
}
