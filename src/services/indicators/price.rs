//! Latest-bar fields and day-over-day change.

use crate::error::Result;
use crate::services::indicators::rolling::ratio;
use crate::services::indicators::{checked, Indicator};
use crate::services::series::Series;
use crate::types::{IndicatorCategory, IndicatorSet};

/// Copies the last bar into the set and measures its change versus the
/// previous close.
pub struct PriceSnapshot;

impl Indicator for PriceSnapshot {
    fn id(&self) -> &str {
        "price"
    }

    fn category(&self) -> IndicatorCategory {
        IndicatorCategory::Price
    }

    fn min_periods(&self) -> usize {
        1
    }

    fn apply(&self, series: &Series, set: &mut IndicatorSet) -> Result<()> {
        let Some(last) = series.last() else {
            return Ok(());
        };

        set.last_open = Some(last.open);
        set.last_close = Some(last.close);
        set.last_high = Some(last.high);
        set.last_low = Some(last.low);
        set.last_volume = Some(last.volume);
        set.daily_range = Some(last.range());
        set.daily_range_pct = checked(self.id(), ratio(last.range(), last.close).map(|r| r * 100.0))?;

        if let Ok(pair) = series.tail_exact(2) {
            let change = pair[1].close - pair[0].close;
            set.daily_change = Some(change);
            set.daily_change_pct = checked(self.id(), ratio(change, pair[0].close).map(|r| r * 100.0))?;
        }
        Ok(())
    }
}
