use serde::{Deserialize, Serialize};

/// One OHLCV bar. Timestamps are unix milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    #[serde(alias = "time")]
    pub timestamp: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(default)]
    pub volume: f64,
}

impl Bar {
    pub fn new(timestamp: i64, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Typical price, (H + L + C) / 3.
    pub fn typical_price(&self) -> f64 {
        (self.high + self.low + self.close) / 3.0
    }

    /// High minus low.
    pub fn range(&self) -> f64 {
        self.high - self.low
    }

    /// Returns a reason string when the bar violates a price/volume invariant.
    pub fn violation(&self) -> Option<String> {
        let prices = [
            ("open", self.open),
            ("high", self.high),
            ("low", self.low),
            ("close", self.close),
        ];
        for (name, value) in prices {
            if !value.is_finite() || value <= 0.0 {
                return Some(format!("{} must be a positive finite price, got {}", name, value));
            }
        }
        if !self.volume.is_finite() || self.volume < 0.0 {
            return Some(format!("volume must be non-negative, got {}", self.volume));
        }
        if self.high < self.low {
            return Some(format!("high {} is below low {}", self.high, self.low));
        }
        for (name, value) in [("open", self.open), ("close", self.close)] {
            if value < self.low || value > self.high {
                return Some(format!(
                    "{} {} is outside the range {}..={}",
                    name, value, self.low, self.high
                ));
            }
        }
        None
    }
}
