//! Commodity Channel Index (CCI) indicator.

use crate::error::Result;
use crate::services::indicators::rolling::{defined, latest, mean_abs_dev, rolling, rolling_mean};
use crate::services::indicators::{checked, Indicator};
use crate::services::series::Series;
use crate::types::{IndicatorCategory, IndicatorSet};

/// CCI = (TP - SMA(TP)) / (0.015 × mean absolute deviation of TP).
///
/// Undefined when the window has no deviation.
pub struct Cci {
    period: usize,
}

impl Default for Cci {
    fn default() -> Self {
        Self { period: 20 }
    }
}

impl Indicator for Cci {
    fn id(&self) -> &str {
        "cci"
    }

    fn category(&self) -> IndicatorCategory {
        IndicatorCategory::Momentum
    }

    fn min_periods(&self) -> usize {
        self.period
    }

    fn apply(&self, series: &Series, set: &mut IndicatorSet) -> Result<()> {
        let tp = series.typical_prices();
        let column = defined(&tp);
        let sma = latest(&rolling_mean(&column, self.period));
        let mad = latest(&rolling(&column, self.period, mean_abs_dev));
        let (Some(sma), Some(mad), Some(current)) = (sma, mad, tp.last().copied()) else {
            return Ok(());
        };
        if mad == 0.0 {
            return Ok(());
        }
        set.cci = checked(self.id(), Some((current - sma) / (0.015 * mad)))?;
        Ok(())
    }
}
