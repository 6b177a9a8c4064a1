//! Bollinger Bands indicator.

use crate::error::Result;
use crate::services::indicators::rolling::{defined, latest, ratio, rolling_mean, rolling_std};
use crate::services::indicators::{checked, Indicator};
use crate::services::series::Series;
use crate::types::{IndicatorCategory, IndicatorSet};

/// Bollinger Bands indicator.
///
/// - Middle Band = SMA(period)
/// - Upper/Lower Band = Middle ± (std_dev × sample standard deviation)
/// - Width = (Upper - Lower) / Middle × 100, a squeeze when below 10
pub struct BollingerBands {
    period: usize,
    std_dev: f64,
}

impl Default for BollingerBands {
    fn default() -> Self {
        Self {
            period: 20,
            std_dev: 2.0,
        }
    }
}

/// Latest band values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bands {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

impl BollingerBands {
    pub fn new(period: usize) -> Self {
        Self {
            period,
            ..Self::default()
        }
    }

    pub fn calculate(&self, closes: &[f64]) -> Option<Bands> {
        let column = defined(closes);
        let middle = latest(&rolling_mean(&column, self.period))?;
        let std = latest(&rolling_std(&column, self.period))?;
        Some(Bands {
            upper: middle + self.std_dev * std,
            middle,
            lower: middle - self.std_dev * std,
        })
    }
}

impl Indicator for BollingerBands {
    fn id(&self) -> &str {
        "bollinger"
    }

    fn category(&self) -> IndicatorCategory {
        IndicatorCategory::Volatility
    }

    fn min_periods(&self) -> usize {
        self.period
    }

    fn apply(&self, series: &Series, set: &mut IndicatorSet) -> Result<()> {
        let Some(bands) = self.calculate(&series.closes()) else {
            return Ok(());
        };
        set.bb_upper = checked(self.id(), Some(bands.upper))?;
        set.bb_middle = checked(self.id(), Some(bands.middle))?;
        set.bb_lower = checked(self.id(), Some(bands.lower))?;
        set.bb_width = checked(
            self.id(),
            ratio(bands.upper - bands.lower, bands.middle).map(|r| r * 100.0),
        )?;
        set.bb_squeeze = set.bb_width.map(|w| w < 10.0);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::indicators::test_support::*;

    #[test]
    fn test_bollinger_insufficient_data() {
        let mut set = IndicatorSet::default();
        BollingerBands::default()
            .apply(&series(create_uptrend_bars(19)), &mut set)
            .unwrap();
        assert!(set.bb_middle.is_none());
        assert!(set.bb_squeeze.is_none());
    }

    #[test]
    fn test_bollinger_band_order() {
        let bands = BollingerBands::default()
            .calculate(&series(create_choppy_bars(40)).closes())
            .unwrap();
        assert!(bands.upper > bands.middle);
        assert!(bands.middle > bands.lower);
        assert_approx(bands.upper - bands.middle, bands.middle - bands.lower, 1e-9);
    }

    #[test]
    fn test_bollinger_flat_series_squeeze() {
        let mut set = IndicatorSet::default();
        BollingerBands::default()
            .apply(&series(create_flat_bars(25, 100.0)), &mut set)
            .unwrap();
        assert_eq!(set.bb_width, Some(0.0));
        assert_eq!(set.bb_squeeze, Some(true));
    }
}
