//! Discrete buy/sell calls derived from the indicator snapshot and verdict.

use crate::types::{
    IndicatorSet, SignalAction, SignalHorizon, Strength, Trend, TradingSignal, TrendVerdict,
};

/// Verdicts above this confidence produce a long-term call.
const TREND_CONFIDENCE_THRESHOLD: f64 = 70.0;

/// Generate trading calls in RSI, MACD, trend order.
pub fn generate_trading_signals(indicators: &IndicatorSet, trend: &TrendVerdict) -> Vec<TradingSignal> {
    let mut signals = Vec::new();

    if let Some(rsi) = indicators.rsi {
        if rsi < 30.0 {
            signals.push(TradingSignal {
                action: SignalAction::Buy,
                strength: Strength::Strong,
                reason: format!("RSI oversold at {:.1}", rsi),
                horizon: SignalHorizon::ShortTerm,
            });
        } else if rsi > 70.0 {
            signals.push(TradingSignal {
                action: SignalAction::Sell,
                strength: Strength::Strong,
                reason: format!("RSI overbought at {:.1}", rsi),
                horizon: SignalHorizon::ShortTerm,
            });
        }
    }

    if let (Some(macd), Some(signal)) = (indicators.macd, indicators.macd_signal) {
        if macd > signal && macd > 0.0 {
            signals.push(TradingSignal {
                action: SignalAction::Buy,
                strength: Strength::Moderate,
                reason: "MACD bullish crossover above zero".to_string(),
                horizon: SignalHorizon::MediumTerm,
            });
        } else if macd < signal && macd < 0.0 {
            signals.push(TradingSignal {
                action: SignalAction::Sell,
                strength: Strength::Moderate,
                reason: "MACD bearish crossover below zero".to_string(),
                horizon: SignalHorizon::MediumTerm,
            });
        }
    }

    if trend.confidence() > TREND_CONFIDENCE_THRESHOLD {
        let action = match trend.trend() {
            Trend::Bullish => Some(SignalAction::Buy),
            Trend::Bearish => Some(SignalAction::Sell),
            Trend::Neutral => None,
        };
        if let Some(action) = action {
            signals.push(TradingSignal {
                action,
                strength: trend.strength(),
                reason: format!(
                    "Strong {} trend with {:.1}% confidence",
                    trend.trend().label(),
                    trend.confidence()
                ),
                horizon: SignalHorizon::LongTerm,
            });
        }
    }

    signals
}
