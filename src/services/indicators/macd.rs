//! Moving Average Convergence Divergence (MACD) indicator.

use crate::error::Result;
use crate::services::indicators::rolling::ewm;
use crate::services::indicators::{checked, Indicator};
use crate::services::series::Series;
use crate::types::{IndicatorCategory, IndicatorSet};

/// MACD line, signal line and histogram.
///
/// - MACD = EMA(fast) - EMA(slow)
/// - Signal = EMA of the MACD line over `signal` bars
/// - Histogram = MACD - Signal
///
/// Reported once the series covers the slow span.
pub struct Macd {
    fast: usize,
    slow: usize,
    signal: usize,
}

impl Default for Macd {
    fn default() -> Self {
        Self {
            fast: 12,
            slow: 26,
            signal: 9,
        }
    }
}

/// Latest MACD values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacdValues {
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
}

impl Macd {
    pub fn new(fast: usize, slow: usize, signal: usize) -> Self {
        Self { fast, slow, signal }
    }

    /// Latest values, or `None` when the series is shorter than the slow span.
    pub fn calculate(&self, closes: &[f64]) -> Option<MacdValues> {
        if closes.is_empty() || closes.len() < self.slow {
            return None;
        }
        let fast = ewm(closes, self.fast);
        let slow = ewm(closes, self.slow);
        let line: Vec<f64> = fast.iter().zip(&slow).map(|(f, s)| f - s).collect();
        let signal = ewm(&line, self.signal);
        let macd = *line.last()?;
        let signal = *signal.last()?;
        Some(MacdValues {
            macd,
            signal,
            histogram: macd - signal,
        })
    }
}

impl Indicator for Macd {
    fn id(&self) -> &str {
        "macd"
    }

    fn category(&self) -> IndicatorCategory {
        IndicatorCategory::Trend
    }

    fn min_periods(&self) -> usize {
        self.slow
    }

    fn apply(&self, series: &Series, set: &mut IndicatorSet) -> Result<()> {
        let Some(values) = self.calculate(&series.closes()) else {
            return Ok(());
        };
        set.macd = checked(self.id(), Some(values.macd))?;
        set.macd_signal = checked(self.id(), Some(values.signal))?;
        set.macd_histogram = checked(self.id(), Some(values.histogram))?;
        set.macd_bullish = Some(values.macd > values.signal);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::indicators::test_support::*;

    #[test]
    fn test_macd_insufficient_data() {
        let macd = Macd::default();
        assert!(macd.calculate(&series(create_uptrend_bars(25)).closes()).is_none());
        assert!(macd.calculate(&series(create_uptrend_bars(26)).closes()).is_some());
    }

    #[test]
    fn test_macd_histogram_identity() {
        let macd = Macd::default();
        for count in [26, 40, 77] {
            let values = macd.calculate(&series(create_choppy_bars(count)).closes()).unwrap();
            assert_eq!(values.histogram, values.macd - values.signal);
        }
    }

    #[test]
    fn test_macd_uptrend_bullish() {
        let mut set = IndicatorSet::default();
        Macd::default().apply(&series(create_uptrend_bars(60)), &mut set).unwrap();
        assert!(set.macd.unwrap() > 0.0);
        assert_eq!(set.macd_bullish, Some(true));
    }

    #[test]
    fn test_macd_flat_is_zero() {
        let values = Macd::default()
            .calculate(&series(create_flat_bars(40, 10.0)).closes())
            .unwrap();
        assert_eq!(values.macd, 0.0);
        assert_eq!(values.signal, 0.0);
        assert_eq!(values.histogram, 0.0);
    }
}
