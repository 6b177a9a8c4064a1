//! Relative Strength Index (RSI) indicator.

use crate::error::Result;
use crate::services::indicators::rolling::{latest, rolling_mean, Column};
use crate::services::indicators::{checked, Indicator};
use crate::services::series::Series;
use crate::types::{IndicatorCategory, IndicatorSet};

/// RSI (Relative Strength Index) indicator.
///
/// Gains and losses are averaged with a simple rolling mean, so the value is
/// defined once the series holds `period` bars (the first delta counts as
/// zero movement). Values range from 0-100:
/// - Below 30: Oversold
/// - Above 70: Overbought
pub struct Rsi {
    period: usize,
}

impl Default for Rsi {
    fn default() -> Self {
        Self { period: 14 }
    }
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        Self { period }
    }

    /// Full RSI column.
    pub fn column(closes: &[f64], period: usize) -> Column {
        let mut gains = Vec::with_capacity(closes.len());
        let mut losses = Vec::with_capacity(closes.len());
        for i in 0..closes.len() {
            let change = if i == 0 { 0.0 } else { closes[i] - closes[i - 1] };
            gains.push(Some(change.max(0.0)));
            losses.push(Some((-change).max(0.0)));
        }
        let avg_gain = rolling_mean(&gains, period);
        let avg_loss = rolling_mean(&losses, period);
        avg_gain
            .iter()
            .zip(&avg_loss)
            .map(|(g, l)| strength_index(*g, *l))
            .collect()
    }
}

/// `100 - 100 / (1 + up/down)`. Zero downside saturates at 100; no movement
/// at all is undefined.
pub(crate) fn strength_index(up: Option<f64>, down: Option<f64>) -> Option<f64> {
    let (up, down) = (up?, down?);
    if down == 0.0 {
        return (up > 0.0).then_some(100.0);
    }
    Some(100.0 - 100.0 / (1.0 + up / down))
}

impl Indicator for Rsi {
    fn id(&self) -> &str {
        "rsi"
    }

    fn category(&self) -> IndicatorCategory {
        IndicatorCategory::Momentum
    }

    fn min_periods(&self) -> usize {
        self.period
    }

    fn apply(&self, series: &Series, set: &mut IndicatorSet) -> Result<()> {
        let rsi = checked(self.id(), latest(&Self::column(&series.closes(), self.period)))?;
        set.rsi = rsi;
        set.rsi_oversold = rsi.map(|v| v < 30.0);
        set.rsi_overbought = rsi.map(|v| v > 70.0);
        Ok(())
    }
}
