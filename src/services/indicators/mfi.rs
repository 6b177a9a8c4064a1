//! Money Flow Index (MFI) indicator.

use crate::error::Result;
use crate::services::indicators::rolling::{latest, rolling_sum};
use crate::services::indicators::rsi::strength_index;
use crate::services::indicators::{checked, Indicator};
use crate::services::series::Series;
use crate::types::{IndicatorCategory, IndicatorSet};

/// MFI, a volume-weighted RSI over typical price.
///
/// Money flow (TP × volume) counts as positive when TP rises versus the
/// previous bar and negative when it falls. Flows are summed over `period`
/// bars; the first bar contributes nothing to either side.
pub struct Mfi {
    period: usize,
}

impl Default for Mfi {
    fn default() -> Self {
        Self { period: 14 }
    }
}

impl Indicator for Mfi {
    fn id(&self) -> &str {
        "mfi"
    }

    fn category(&self) -> IndicatorCategory {
        IndicatorCategory::Volume
    }

    fn min_periods(&self) -> usize {
        self.period
    }

    fn apply(&self, series: &Series, set: &mut IndicatorSet) -> Result<()> {
        let bars = series.bars();
        let mut positive = Vec::with_capacity(bars.len());
        let mut negative = Vec::with_capacity(bars.len());
        for (i, bar) in bars.iter().enumerate() {
            let tp = bar.typical_price();
            let flow = tp * bar.volume;
            let prev = if i == 0 { tp } else { bars[i - 1].typical_price() };
            positive.push(Some(if tp > prev { flow } else { 0.0 }));
            negative.push(Some(if tp < prev { flow } else { 0.0 }));
        }
        let pos = latest(&rolling_sum(&positive, self.period));
        let neg = latest(&rolling_sum(&negative, self.period));
        set.mfi = checked(self.id(), strength_index(pos, neg))?;
        Ok(())
    }
}
