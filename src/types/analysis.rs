use serde::{Deserialize, Serialize};

use super::{IndicatorSet, LevelSet, Timeframe, Trend, TrendVerdict};

/// Short-horizon signals derived from one timeframe's bars.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IntradaySignals {
    pub ema_bullish_cross: bool,
    pub ema_bearish_cross: bool,
    pub rsi_oversold_scalp: bool,
    pub rsi_overbought_scalp: bool,
    /// Band width below 2% of the middle band.
    pub bb_squeeze: Option<bool>,
    pub price_near_upper_bb: bool,
    pub price_near_lower_bb: bool,
    pub price_above_middle_band: Option<bool>,
    pub atr_stop_long: Option<f64>,
    pub atr_stop_short: Option<f64>,
    pub stoch_oversold: bool,
    pub stoch_overbought: bool,
    pub momentum_5: Option<f64>,
    pub momentum_10: Option<f64>,
    pub resistance_level: Option<f64>,
    pub support_level: Option<f64>,
    pub volume_ratio: Option<f64>,
    pub volume_spike: bool,
    pub trend_short: Option<Trend>,
    pub scalp_buy_signal: bool,
    pub scalp_sell_signal: bool,
    pub range_trading: bool,
    /// Cumulative VWAP over the whole series.
    pub vwap: Option<f64>,
    pub vwap_distance_pct: Option<f64>,
    pub price_above_vwap: Option<bool>,
}

/// Everything computed for a single timeframe.
#[derive(Debug, Clone, Serialize)]
pub struct TimeframeAnalysis {
    pub timeframe: Timeframe,
    pub total_bars: usize,
    pub indicators: IndicatorSet,
    pub signals: IntradaySignals,
    pub trend: TrendVerdict,
    pub levels: LevelSet,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowSentiment {
    Bullish,
    Bearish,
    Neutral,
}

/// Buy/sell pressure approximated from bar-to-bar price moves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderFlowMetrics {
    pub buy_pressure: f64,
    pub sell_pressure: f64,
    /// 999 when there is buying and no selling.
    pub buy_sell_ratio: f64,
    pub buy_pressure_pct: f64,
    pub sell_pressure_pct: f64,
    pub avg_trade_size: f64,
    pub large_trades_count: usize,
    pub large_trade_ratio: f64,
    pub bid_ask_imbalance: f64,
    pub order_flow_sentiment: FlowSentiment,
}

/// Output of the synthetic breakout heuristic.
///
/// This is not a trained model. The fit runs on seeded synthetic samples
/// around the current feature values and is fully reproducible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeuristicPrediction {
    pub trend_prediction: Trend,
    pub bullish_probability: f64,
    pub bearish_probability: f64,
    pub prediction_confidence: f64,
    pub features_used: Vec<String>,
    /// R² of the fit on the synthetic samples.
    pub model_score: f64,
    pub seed: u64,
}
