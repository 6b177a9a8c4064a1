//! Indicator bank: runs every family over one series.

use crate::services::context::AnalysisContext;
use crate::services::indicators::{all_indicators, Indicator};
use crate::services::series::Series;
use crate::types::{IndicatorSet, Timeframe, TimeframeProfile};

/// Ordered collection of indicator families for one timeframe profile.
pub struct IndicatorBank {
    indicators: Vec<Box<dyn Indicator>>,
    profile: TimeframeProfile,
}

impl IndicatorBank {
    pub fn new(profile: TimeframeProfile) -> Self {
        Self {
            indicators: all_indicators(&profile),
            profile,
        }
    }

    /// Bank tuned for a timeframe.
    pub fn for_timeframe(timeframe: Timeframe) -> Self {
        Self::new(timeframe.profile())
    }

    pub fn profile(&self) -> &TimeframeProfile {
        &self.profile
    }

    /// Compute the indicator snapshot for `series`.
    ///
    /// Each family writes into a scratch copy of the set that is only
    /// committed when the family succeeds. A failing family leaves its own
    /// fields undefined and records a diagnostic.
    pub fn compute(
        &self,
        series: &Series,
        ctx: &AnalysisContext,
        timeframe: Timeframe,
    ) -> IndicatorSet {
        if series.is_empty() {
            ctx.warn("indicators", Some(timeframe), "no bars, indicators undefined");
            return IndicatorSet::empty();
        }

        ctx.debug(
            "indicators",
            Some(timeframe),
            format!("computing {} families over {} bars", self.indicators.len(), series.len()),
        );

        let mut set = IndicatorSet {
            bar_count: series.len(),
            ..IndicatorSet::default()
        };

        for indicator in &self.indicators {
            if series.len() < indicator.min_periods() {
                ctx.debug(
                    indicator.id(),
                    Some(timeframe),
                    format!(
                        "{} family short of data: {} of {} bars",
                        indicator.category().name(),
                        series.len(),
                        indicator.min_periods()
                    ),
                );
            }

            let mut scratch = set.clone();
            match indicator.apply(series, &mut scratch) {
                Ok(()) => set = scratch,
                Err(e) => ctx.degraded(indicator.id(), Some(timeframe), &e),
            }
        }

        set
    }
}
