use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Volatility-index reading supplied by the market-data adapter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VixInput {
    pub value: f64,
    #[serde(default)]
    pub previous: Option<f64>,
    /// Recent closes, oldest first, used for percentile and extremes.
    #[serde(default)]
    pub history: Vec<f64>,
    /// Broad index level for the index/VIX ratio.
    #[serde(default)]
    pub spx: Option<f64>,
}

/// Advancing/declining counts over a sample of index members.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreadthInput {
    pub advancing: u32,
    pub declining: u32,
    #[serde(default)]
    pub unchanged: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VixSentiment {
    Fear,
    Greed,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FearLevel {
    Extreme,
    High,
    Moderate,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VixAnalysis {
    pub vix_value: f64,
    pub vix_change_1d: f64,
    pub vix_change_1d_pct: f64,
    pub vix_30d_percentile: Option<f64>,
    pub sentiment: VixSentiment,
    pub sentiment_score: i8,
    pub spx_vix_ratio: Option<f64>,
    pub vix_extreme_high: Option<bool>,
    pub vix_extreme_low: Option<bool>,
    pub market_fear_level: FearLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TickSentiment {
    ExtremelyBullish,
    Bullish,
    Neutral,
    Bearish,
    ExtremelyBearish,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreadthStrength {
    Strong,
    Moderate,
    Weak,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreadthAnalysis {
    pub tick_approximation: i64,
    pub advancing_stocks: u32,
    pub declining_stocks: u32,
    pub unchanged_stocks: u32,
    pub total_stocks_sampled: u32,
    pub advance_decline_ratio: f64,
    pub tick_sentiment: TickSentiment,
    pub market_breadth: BreadthStrength,
}

/// Sentiment section of the report.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MarketSentiment {
    pub vix: Option<VixAnalysis>,
    pub breadth: Option<BreadthAnalysis>,
    /// Adapter-supplied payloads passed through untouched apart from sanitization.
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// Headline supplied by the news adapter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
}
