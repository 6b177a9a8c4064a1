//! On-Balance Volume (OBV) indicator.

use crate::error::Result;
use crate::services::indicators::{checked, Indicator};
use crate::services::series::Series;
use crate::types::{IndicatorCategory, IndicatorSet, ObvTrend};

/// OBV = cumulative sum of sign(close change) × volume.
///
/// The trend compares the latest OBV with the value four bars earlier and
/// needs more than five bars; shorter series are neutral.
pub struct Obv;

impl Obv {
    pub fn column(series: &Series) -> Vec<f64> {
        let bars = series.bars();
        let mut total = 0.0;
        bars.iter()
            .enumerate()
            .map(|(i, bar)| {
                if i > 0 {
                    let change = bar.close - bars[i - 1].close;
                    if change > 0.0 {
                        total += bar.volume;
                    } else if change < 0.0 {
                        total -= bar.volume;
                    }
                }
                total
            })
            .collect()
    }
}

impl Indicator for Obv {
    fn id(&self) -> &str {
        "obv"
    }

    fn category(&self) -> IndicatorCategory {
        IndicatorCategory::Volume
    }

    fn min_periods(&self) -> usize {
        1
    }

    fn apply(&self, series: &Series, set: &mut IndicatorSet) -> Result<()> {
        let obv = Self::column(series);
        set.obv = checked(self.id(), obv.last().copied())?;
        set.obv_trend = if obv.len() > 5 {
            if obv[obv.len() - 1] > obv[obv.len() - 5] {
                ObvTrend::Bullish
            } else {
                ObvTrend::Bearish
            }
        } else {
            ObvTrend::Neutral
        };
        Ok(())
    }
}
