//! Exponential Moving Average (EMA) indicator.

use crate::error::Result;
use crate::services::indicators::rolling::{ewm_gated, latest, Column};
use crate::services::indicators::{checked, Indicator};
use crate::services::series::Series;
use crate::types::{IndicatorCategory, IndicatorSet};

/// Exponential moving averages at 12/26/50/100 plus the timeframe's fast
/// and slow spans.
///
/// Weighted over the whole history with `α = 2 / (span + 1)` and reported
/// once the series is at least `span` bars long.
pub struct Ema {
    fast: usize,
    slow: usize,
}

impl Default for Ema {
    fn default() -> Self {
        Self { fast: 12, slow: 26 }
    }
}

impl Ema {
    pub fn new(fast: usize, slow: usize) -> Self {
        Self { fast, slow }
    }

    /// Full gated EMA column.
    pub fn column(closes: &[f64], span: usize) -> Column {
        ewm_gated(closes, span)
    }
}

impl Indicator for Ema {
    fn id(&self) -> &str {
        "ema"
    }

    fn category(&self) -> IndicatorCategory {
        IndicatorCategory::Trend
    }

    fn min_periods(&self) -> usize {
        self.fast.min(12)
    }

    fn apply(&self, series: &Series, set: &mut IndicatorSet) -> Result<()> {
        let closes = series.closes();
        let ema = |span: usize| checked("ema", latest(&Self::column(&closes, span)));
        set.ema_12 = ema(12)?;
        set.ema_26 = ema(26)?;
        set.ema_50 = ema(50)?;
        set.ema_100 = ema(100)?;
        set.ema_fast = ema(self.fast)?;
        set.ema_slow = ema(self.slow)?;
        Ok(())
    }
}
