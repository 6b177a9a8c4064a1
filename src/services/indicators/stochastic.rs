//! Stochastic Oscillator indicator.

use crate::error::Result;
use crate::services::indicators::rolling::{defined, latest, rolling_max, rolling_mean, rolling_min, Column};
use crate::services::indicators::{checked, Indicator};
use crate::services::series::Series;
use crate::types::{IndicatorCategory, IndicatorSet};

/// Stochastic Oscillator.
///
/// %K = 100 × (Close - Lowest Low) / (Highest High - Lowest Low) over
/// `k_period` bars; %D is the `d_period` SMA of %K. %K is undefined when the
/// window has no range.
pub struct Stochastic {
    k_period: usize,
    d_period: usize,
}

impl Default for Stochastic {
    fn default() -> Self {
        Self {
            k_period: 14,
            d_period: 3,
        }
    }
}

impl Stochastic {
    /// Full %K column.
    pub fn k_column(series: &Series, period: usize) -> Column {
        let highest = rolling_max(&defined(&series.highs()), period);
        let lowest = rolling_min(&defined(&series.lows()), period);
        series
            .bars()
            .iter()
            .enumerate()
            .map(|(i, bar)| {
                let (hh, ll) = (highest[i]?, lowest[i]?);
                if hh == ll {
                    return None;
                }
                Some(100.0 * (bar.close - ll) / (hh - ll))
            })
            .collect()
    }
}

impl Indicator for Stochastic {
    fn id(&self) -> &str {
        "stochastic"
    }

    fn category(&self) -> IndicatorCategory {
        IndicatorCategory::Momentum
    }

    fn min_periods(&self) -> usize {
        self.k_period
    }

    fn apply(&self, series: &Series, set: &mut IndicatorSet) -> Result<()> {
        let k = Self::k_column(series, self.k_period);
        let d = rolling_mean(&k, self.d_period);
        set.stoch_k = checked(self.id(), latest(&k))?;
        set.stoch_d = checked(self.id(), latest(&d))?;
        Ok(())
    }
}
