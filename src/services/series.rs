//! In-memory OHLCV series.

use crate::error::{AnalysisError, Result};
use crate::types::Bar;

/// Validated, time-ordered bars for one instrument and timeframe.
///
/// Read-only once built. Column accessors allocate a fresh `Vec`; `tail`
/// hands out a borrowed slice.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Series {
    bars: Vec<Bar>,
}

impl Series {
    /// Build a series, rejecting non-positive prices, negative volume,
    /// inverted ranges and non-increasing timestamps.
    pub fn new(bars: Vec<Bar>) -> Result<Self> {
        for (index, bar) in bars.iter().enumerate() {
            if let Some(reason) = bar.violation() {
                return Err(AnalysisError::InvalidBar { index, reason });
            }
            if index > 0 && bar.timestamp <= bars[index - 1].timestamp {
                return Err(AnalysisError::InvalidBar {
                    index,
                    reason: format!(
                        "timestamp {} does not follow {}",
                        bar.timestamp,
                        bars[index - 1].timestamp
                    ),
                });
            }
        }
        Ok(Self { bars })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn last(&self) -> Option<&Bar> {
        self.bars.last()
    }

    pub fn opens(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.open).collect()
    }

    pub fn highs(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.high).collect()
    }

    pub fn lows(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.low).collect()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    pub fn volumes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.volume).collect()
    }

    pub fn typical_prices(&self) -> Vec<f64> {
        self.bars.iter().map(Bar::typical_price).collect()
    }

    /// Last `min(n, len)` bars.
    pub fn tail(&self, n: usize) -> &[Bar] {
        let start = self.bars.len().saturating_sub(n);
        &self.bars[start..]
    }

    /// Last `n` bars, or `InsufficientData` when fewer exist.
    pub fn tail_exact(&self, n: usize) -> Result<&[Bar]> {
        if n > self.bars.len() {
            return Err(AnalysisError::InsufficientData {
                required: n,
                available: self.bars.len(),
            });
        }
        Ok(self.tail(n))
    }
}
