//! Williams %R indicator.

use crate::error::Result;
use crate::services::indicators::rolling::{defined, latest, rolling_max, rolling_min};
use crate::services::indicators::{checked, Indicator};
use crate::services::series::Series;
use crate::types::{IndicatorCategory, IndicatorSet};

/// Williams %R = -100 × (Highest High - Close) / (Highest High - Lowest Low).
///
/// Ranges from -100 to 0; below -80 is oversold, above -20 overbought.
pub struct WilliamsR {
    period: usize,
}

impl Default for WilliamsR {
    fn default() -> Self {
        Self { period: 14 }
    }
}

impl Indicator for WilliamsR {
    fn id(&self) -> &str {
        "williams_r"
    }

    fn category(&self) -> IndicatorCategory {
        IndicatorCategory::Momentum
    }

    fn min_periods(&self) -> usize {
        self.period
    }

    fn apply(&self, series: &Series, set: &mut IndicatorSet) -> Result<()> {
        let hh = latest(&rolling_max(&defined(&series.highs()), self.period));
        let ll = latest(&rolling_min(&defined(&series.lows()), self.period));
        let (Some(hh), Some(ll), Some(last)) = (hh, ll, series.last()) else {
            return Ok(());
        };
        if hh == ll {
            return Ok(());
        }
        set.williams_r = checked(self.id(), Some(-100.0 * (hh - last.close) / (hh - ll)))?;
        Ok(())
    }
}
