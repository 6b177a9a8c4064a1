//! Average True Range (ATR) indicator.

use crate::error::Result;
use crate::services::indicators::rolling::{
    defined, latest, pct_change, rolling_mean, sample_std, true_range, Column,
};
use crate::services::indicators::{checked, Indicator};
use crate::services::series::Series;
use crate::types::{IndicatorCategory, IndicatorSet};

/// ATR (Average True Range) indicator.
///
/// Simple rolling mean of the true range. Also reports whether the latest
/// ATR sits above its own `baseline`-bar average, and the standard deviation
/// of the last `baseline` percentage close changes.
pub struct Atr {
    period: usize,
    baseline: usize,
}

impl Default for Atr {
    fn default() -> Self {
        Self {
            period: 14,
            baseline: 20,
        }
    }
}

impl Atr {
    pub fn new(period: usize) -> Self {
        Self {
            period,
            ..Self::default()
        }
    }

    /// Full ATR column.
    pub fn column(series: &Series, period: usize) -> Column {
        rolling_mean(&defined(&true_range(series.bars())), period)
    }
}

impl Indicator for Atr {
    fn id(&self) -> &str {
        "atr"
    }

    fn category(&self) -> IndicatorCategory {
        IndicatorCategory::Volatility
    }

    fn min_periods(&self) -> usize {
        self.period
    }

    fn apply(&self, series: &Series, set: &mut IndicatorSet) -> Result<()> {
        let atr = Self::column(series, self.period);
        let atr_baseline = rolling_mean(&atr, self.baseline);
        set.atr = checked(self.id(), latest(&atr))?;
        set.volatility_high = match (set.atr, latest(&atr_baseline)) {
            (Some(current), Some(baseline)) => Some(current > baseline),
            _ => None,
        };

        let changes: Vec<f64> = pct_change(&series.closes(), 1).into_iter().flatten().collect();
        if changes.len() > self.baseline {
            let recent = &changes[changes.len() - self.baseline..];
            set.volatility_std = checked(self.id(), sample_std(recent).map(|s| s * 100.0))?;
        }
        Ok(())
    }
}
