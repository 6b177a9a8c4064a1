use serde::{Deserialize, Serialize};

/// Nominal bar interval of a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Timeframe {
    #[serde(rename = "1m")]
    OneMinute,
    #[serde(rename = "5m")]
    FiveMinutes,
    #[serde(rename = "15m")]
    FifteenMinutes,
    #[serde(rename = "4h")]
    FourHours,
    #[serde(rename = "1d")]
    OneDay,
}

impl Timeframe {
    /// All timeframes, finest first.
    pub const ALL: [Timeframe; 5] = [
        Timeframe::OneMinute,
        Timeframe::FiveMinutes,
        Timeframe::FifteenMinutes,
        Timeframe::FourHours,
        Timeframe::OneDay,
    ];

    /// Parse from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "1m" | "1min" => Some(Self::OneMinute),
            "5m" | "5min" => Some(Self::FiveMinutes),
            "15m" | "15min" => Some(Self::FifteenMinutes),
            "4h" => Some(Self::FourHours),
            "1d" | "daily" => Some(Self::OneDay),
            _ => None,
        }
    }

    /// Short label used as report key.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OneMinute => "1m",
            Self::FiveMinutes => "5m",
            Self::FifteenMinutes => "15m",
            Self::FourHours => "4h",
            Self::OneDay => "1d",
        }
    }

    pub fn is_intraday(&self) -> bool {
        !matches!(self, Self::OneDay)
    }

    /// Window lengths used for this timeframe.
    pub fn profile(&self) -> TimeframeProfile {
        match self {
            Self::OneMinute => TimeframeProfile::scalping(),
            _ => TimeframeProfile::default(),
        }
    }
}

impl std::fmt::Display for Timeframe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bundle of window lengths by indicator family.
///
/// Only the moving-average spans differ between profiles; the oscillator
/// windows are shared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeframeProfile {
    pub rsi: usize,
    pub sma_fast: usize,
    pub sma_slow: usize,
    pub ema_fast: usize,
    pub ema_slow: usize,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    pub bollinger: usize,
    pub atr: usize,
}

impl TimeframeProfile {
    /// Profile for 1-minute bars.
    pub fn scalping() -> Self {
        Self {
            sma_fast: 9,
            sma_slow: 21,
            ema_fast: 8,
            ema_slow: 13,
            ..Self::default()
        }
    }
}

impl Default for TimeframeProfile {
    fn default() -> Self {
        Self {
            rsi: 14,
            sma_fast: 20,
            sma_slow: 50,
            ema_fast: 12,
            ema_slow: 26,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            bollinger: 20,
            atr: 14,
        }
    }
}
