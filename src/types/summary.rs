use serde::{Deserialize, Serialize};

use super::{BreadthStrength, FlowSentiment, Strength, TickSentiment, Timeframe, Trend, VixSentiment};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MainTrend {
    pub direction: Trend,
    pub confidence: f64,
    pub strength: Strength,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct KeyLevels {
    pub resistance: Option<f64>,
    pub support: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RsiStatus {
    Oversold,
    Overbought,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolumeStatus {
    High,
    Normal,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorDigest {
    pub rsi: Option<f64>,
    pub rsi_status: RsiStatus,
    pub macd_bullish: Option<bool>,
    pub adx: Option<f64>,
    /// ADX > 25 strong, < 20 weak, otherwise moderate.
    pub adx_strength: Option<Strength>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VolumeDigest {
    pub rvol: Option<f64>,
    pub status: VolumeStatus,
    pub big_prints_detected: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SentimentDigest {
    pub vix_value: Option<f64>,
    pub vix_change: Option<f64>,
    pub vix_sentiment: Option<VixSentiment>,
    pub tick_value: Option<i64>,
    pub tick_sentiment: Option<TickSentiment>,
    pub market_breadth: Option<BreadthStrength>,
    pub buy_pressure_pct: Option<f64>,
    pub order_flow_sentiment: Option<FlowSentiment>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntradayCallKind {
    ScalpBuy,
    ScalpSell,
    RangeTrading,
    EmaBullishCross,
    EmaBearishCross,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntradayCall {
    pub timeframe: Timeframe,
    pub signal: IntradayCallKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionDigest {
    pub prediction: Trend,
    pub bullish_probability: f64,
    pub bearish_probability: f64,
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExecutiveSummary {
    pub bias: Trend,
    pub bullish_signals: Vec<String>,
    pub bearish_signals: Vec<String>,
    /// At most three, bullish factors first.
    pub key_factors: Vec<String>,
    pub recommendation: String,
}

/// Condensed, presentation-ready digest of the report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub main_trend: MainTrend,
    pub key_levels: KeyLevels,
    pub technical_indicators: IndicatorDigest,
    pub volume_analysis: VolumeDigest,
    pub market_sentiment: SentimentDigest,
    pub intraday_signals: Vec<IntradayCall>,
    pub probabilistic_prediction: Option<PredictionDigest>,
    pub executive_summary: ExecutiveSummary,
}
