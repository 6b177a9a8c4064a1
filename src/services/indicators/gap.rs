//! Opening gap detection.

use crate::error::Result;
use crate::services::indicators::{checked, Indicator};
use crate::services::series::Series;
use crate::types::{GapDirection, GapInfo, IndicatorCategory, IndicatorSet};

/// Flags a gap when the latest open is more than `threshold_pct` percent away
/// from the previous close. The gap midpoint is recorded as a synthetic
/// support (up gaps) or resistance (down gaps).
pub struct GapDetector {
    threshold_pct: f64,
}

impl Default for GapDetector {
    fn default() -> Self {
        Self { threshold_pct: 0.5 }
    }
}

impl GapDetector {
    pub fn detect(&self, series: &Series) -> Option<GapInfo> {
        // Needs the previous close; shorter series have no gap.
        let pair = series.tail_exact(2).ok()?;
        let prev_close = pair[0].close;
        let open = pair[1].open;
        let size = (open - prev_close).abs();
        let percentage = size / prev_close * 100.0;
        if percentage <= self.threshold_pct {
            return None;
        }
        Some(GapInfo {
            direction: if open > prev_close {
                GapDirection::Up
            } else {
                GapDirection::Down
            },
            size,
            percentage,
            support_resistance_level: (prev_close + open) / 2.0,
        })
    }
}

impl Indicator for GapDetector {
    fn id(&self) -> &str {
        "gap"
    }

    fn category(&self) -> IndicatorCategory {
        IndicatorCategory::Price
    }

    fn min_periods(&self) -> usize {
        2
    }

    fn apply(&self, series: &Series, set: &mut IndicatorSet) -> Result<()> {
        let gap = self.detect(series);
        if let Some(info) = &gap {
            checked(self.id(), Some(info.percentage))?;
        }
        set.gap_detected = gap.is_some();
        set.gap = gap;
        Ok(())
    }
}
