//! Simple Moving Average (SMA) indicator.

use crate::error::Result;
use crate::services::indicators::rolling::{defined, latest, rolling_mean};
use crate::services::indicators::{checked, Indicator};
use crate::services::series::Series;
use crate::types::{IndicatorCategory, IndicatorSet};

/// Simple moving averages at the fixed 10/20/50/200 spans plus the
/// timeframe's fast and slow spans.
pub struct Sma {
    fast: usize,
    slow: usize,
}

impl Default for Sma {
    fn default() -> Self {
        Self { fast: 20, slow: 50 }
    }
}

impl Sma {
    pub fn new(fast: usize, slow: usize) -> Self {
        Self { fast, slow }
    }

    /// Latest SMA over `period` closes.
    pub fn latest(closes: &[f64], period: usize) -> Option<f64> {
        latest(&rolling_mean(&defined(closes), period))
    }
}

impl Indicator for Sma {
    fn id(&self) -> &str {
        "sma"
    }

    fn category(&self) -> IndicatorCategory {
        IndicatorCategory::Trend
    }

    fn min_periods(&self) -> usize {
        10.min(self.fast)
    }

    fn apply(&self, series: &Series, set: &mut IndicatorSet) -> Result<()> {
        let closes = series.closes();
        set.sma_10 = checked(self.id(), Self::latest(&closes, 10))?;
        set.sma_20 = checked(self.id(), Self::latest(&closes, 20))?;
        set.sma_50 = checked(self.id(), Self::latest(&closes, 50))?;
        set.sma_200 = checked(self.id(), Self::latest(&closes, 200))?;
        set.sma_fast = checked(self.id(), Self::latest(&closes, self.fast))?;
        set.sma_slow = checked(self.id(), Self::latest(&closes, self.slow))?;
        Ok(())
    }
}
