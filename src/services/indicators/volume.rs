//! Relative volume and big-print detection.

use crate::error::Result;
use crate::services::indicators::rolling::{defined, latest, quantile, rolling, rolling_mean, rolling_std};
use crate::services::indicators::{checked, Indicator};
use crate::services::series::Series;
use crate::types::{IndicatorCategory, IndicatorSet};

/// Relative volume (RVOL) against the `average_period` mean.
///
/// - RVOL > 1.5: above average
/// - RVOL > 2.0: spike
/// - Volume above the `percentile_period` 95th percentile: big print
///
/// A zero average volume gives RVOL 1.0.
pub struct RelativeVolume {
    average_period: usize,
    percentile_period: usize,
}

impl Default for RelativeVolume {
    fn default() -> Self {
        Self {
            average_period: 20,
            percentile_period: 50,
        }
    }
}

impl Indicator for RelativeVolume {
    fn id(&self) -> &str {
        "volume"
    }

    fn category(&self) -> IndicatorCategory {
        IndicatorCategory::Volume
    }

    fn min_periods(&self) -> usize {
        self.average_period
    }

    fn apply(&self, series: &Series, set: &mut IndicatorSet) -> Result<()> {
        let volumes = defined(&series.volumes());
        let Some(current) = series.last().map(|b| b.volume) else {
            return Ok(());
        };

        let average = checked(self.id(), latest(&rolling_mean(&volumes, self.average_period)))?;
        set.average_volume = average;
        set.volume_std_dev = checked(self.id(), latest(&rolling_std(&volumes, self.average_period)))?;
        set.rvol = average.map(|avg| if avg > 0.0 { current / avg } else { 1.0 });
        set.rvol = checked(self.id(), set.rvol)?;
        set.volume_above_average = set.rvol.map(|r| r > 1.5);
        set.volume_spike = set.rvol.map(|r| r > 2.0);

        let p95 = latest(&rolling(&volumes, self.percentile_period, |w| quantile(w, 0.95)));
        set.volume_percentile_95 = checked(self.id(), p95)?;
        set.big_print_detected = p95.map(|p| current > p);
        Ok(())
    }
}
