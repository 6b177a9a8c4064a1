use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{
    HeuristicPrediction, IndicatorSet, LevelSet, MarketSentiment, NewsItem, OrderFlowMetrics,
    Summary, Timeframe, TimeframeAnalysis, TrendVerdict,
};

/// Severity of a pipeline event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventLevel {
    Debug,
    Info,
    Warn,
}

/// Structured event emitted while a run progresses.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AnalysisEvent {
    pub level: EventLevel,
    pub stage: String,
    pub timeframe: Option<Timeframe>,
    pub message: String,
}

/// Last bar of the primary series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YesterdayData {
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    VeryLow,
    Low,
    Moderate,
    High,
    VeryHigh,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskAssessment {
    pub risk_level: RiskLevel,
    /// 0..=100, neutral at 50.
    pub risk_score: u8,
    pub risk_factors: Vec<String>,
    pub recommendation: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalAction {
    Buy,
    Sell,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalHorizon {
    ShortTerm,
    MediumTerm,
    LongTerm,
}

/// Discrete buy/sell call derived from indicators and the verdict.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradingSignal {
    pub action: SignalAction,
    pub strength: super::Strength,
    pub reason: String,
    pub horizon: SignalHorizon,
}

/// Terminal aggregate of one run. Serialized once and handed off.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub date: String,
    pub symbol: String,
    pub primary_timeframe: Timeframe,
    /// True when the primary series had no bars.
    pub no_data: bool,
    pub yesterday_data: Option<YesterdayData>,
    pub technical_indicators: IndicatorSet,
    pub trend_analysis: TrendVerdict,
    pub daily_levels: LevelSet,
    pub trading_signals: Vec<TradingSignal>,
    pub probabilistic_analysis: Option<HeuristicPrediction>,
    pub market_sentiment: MarketSentiment,
    pub order_flow: Option<OrderFlowMetrics>,
    pub risk_assessment: RiskAssessment,
    pub intraday_analysis: BTreeMap<Timeframe, TimeframeAnalysis>,
    pub news: Vec<NewsItem>,
    pub summary: Summary,
    pub diagnostics: Vec<AnalysisEvent>,
}
