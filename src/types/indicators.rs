use serde::{Deserialize, Serialize};

/// Family an indicator belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorCategory {
    Price,
    Trend,
    Momentum,
    Volatility,
    Volume,
}

impl IndicatorCategory {
    /// Get display name for this category.
    pub fn name(&self) -> &'static str {
        match self {
            IndicatorCategory::Price => "Price",
            IndicatorCategory::Trend => "Trend",
            IndicatorCategory::Momentum => "Momentum",
            IndicatorCategory::Volatility => "Volatility",
            IndicatorCategory::Volume => "Volume",
        }
    }
}

/// Direction of the on-balance-volume slope over the last five bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObvTrend {
    Bullish,
    Bearish,
    #[default]
    Neutral,
}

impl ObvTrend {
    /// Numeric encoding used as a heuristic feature.
    pub fn as_feature(&self) -> f64 {
        match self {
            ObvTrend::Bullish => 1.0,
            ObvTrend::Bearish => -1.0,
            ObvTrend::Neutral => 0.0,
        }
    }
}

/// ADX trend-strength label (ADX > 25 is strong).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdxTrendStrength {
    Strong,
    Weak,
    #[default]
    Unknown,
}

impl AdxTrendStrength {
    pub fn from_adx(adx: Option<f64>) -> Self {
        match adx {
            Some(v) if v > 25.0 => Self::Strong,
            Some(_) => Self::Weak,
            None => Self::Unknown,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GapDirection {
    Up,
    Down,
}

/// Opening gap between the previous close and the latest open.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GapInfo {
    pub direction: GapDirection,
    /// Absolute price distance.
    pub size: f64,
    /// Distance as a percentage of the previous close.
    pub percentage: f64,
    /// Midpoint of the gap, acting as support (up gaps) or resistance (down gaps).
    pub support_resistance_level: f64,
}

/// Snapshot of every indicator for one (series, timeframe) pair.
///
/// `None` means the indicator could not be produced: the series was shorter
/// than the window, the value was undefined (0/0), or its family failed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSet {
    pub bar_count: usize,

    // Latest bar
    pub last_open: Option<f64>,
    pub last_close: Option<f64>,
    pub last_high: Option<f64>,
    pub last_low: Option<f64>,
    pub last_volume: Option<f64>,
    pub daily_range: Option<f64>,
    pub daily_range_pct: Option<f64>,
    pub daily_change: Option<f64>,
    pub daily_change_pct: Option<f64>,

    // Momentum
    pub rsi: Option<f64>,
    pub rsi_oversold: Option<bool>,
    pub rsi_overbought: Option<bool>,
    pub stoch_k: Option<f64>,
    pub stoch_d: Option<f64>,
    pub williams_r: Option<f64>,
    pub cci: Option<f64>,
    pub mfi: Option<f64>,

    // Trend
    pub sma_10: Option<f64>,
    pub sma_20: Option<f64>,
    pub sma_50: Option<f64>,
    pub sma_200: Option<f64>,
    pub sma_fast: Option<f64>,
    pub sma_slow: Option<f64>,
    pub ema_12: Option<f64>,
    pub ema_26: Option<f64>,
    pub ema_50: Option<f64>,
    pub ema_100: Option<f64>,
    pub ema_fast: Option<f64>,
    pub ema_slow: Option<f64>,
    pub macd: Option<f64>,
    pub macd_signal: Option<f64>,
    pub macd_histogram: Option<f64>,
    pub macd_bullish: Option<bool>,
    pub adx: Option<f64>,
    pub plus_di: Option<f64>,
    pub minus_di: Option<f64>,
    pub adx_trend_strength: AdxTrendStrength,
    pub trend_is_strong: Option<bool>,

    // Volatility
    pub bb_upper: Option<f64>,
    pub bb_middle: Option<f64>,
    pub bb_lower: Option<f64>,
    pub bb_width: Option<f64>,
    pub bb_squeeze: Option<bool>,
    pub atr: Option<f64>,
    pub volatility_high: Option<bool>,
    pub volatility_std: Option<f64>,

    // Volume
    pub average_volume: Option<f64>,
    pub volume_std_dev: Option<f64>,
    pub rvol: Option<f64>,
    pub volume_spike: Option<bool>,
    pub volume_above_average: Option<bool>,
    pub volume_percentile_95: Option<f64>,
    pub big_print_detected: Option<bool>,
    pub obv: Option<f64>,
    pub obv_trend: ObvTrend,

    pub gap_detected: bool,
    pub gap: Option<GapInfo>,
}

impl IndicatorSet {
    /// An empty set for a series with no bars.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.bar_count == 0
    }
}
