//! Presentation digest of a finished analysis.

use std::collections::BTreeMap;

use crate::types::{
    ExecutiveSummary, HeuristicPrediction, IndicatorDigest, IndicatorSet, IntradayCall,
    IntradayCallKind, KeyLevels, LevelSet, MainTrend, MarketSentiment, OrderFlowMetrics,
    PredictionDigest, RsiStatus, SentimentDigest, Strength, Summary, Timeframe, TimeframeAnalysis,
    Trend, TrendVerdict, VixSentiment, VolumeDigest, VolumeStatus,
};

const MAX_KEY_FACTORS: usize = 3;

/// Borrowed view of the report sections the summary is built from.
pub struct SummaryInputs<'a> {
    pub trend: &'a TrendVerdict,
    pub levels: &'a LevelSet,
    pub indicators: &'a IndicatorSet,
    pub intraday: &'a BTreeMap<Timeframe, TimeframeAnalysis>,
    pub prediction: Option<&'a HeuristicPrediction>,
    pub sentiment: &'a MarketSentiment,
    pub order_flow: Option<&'a OrderFlowMetrics>,
}

pub fn build_summary(inputs: &SummaryInputs<'_>) -> Summary {
    let indicators = inputs.indicators;
    let technical_indicators = indicator_digest(indicators);
    let volume_analysis = volume_digest(indicators);

    Summary {
        main_trend: MainTrend {
            direction: inputs.trend.trend(),
            confidence: inputs.trend.confidence(),
            strength: inputs.trend.strength(),
        },
        key_levels: KeyLevels {
            resistance: inputs.levels.resistance_1,
            support: inputs.levels.support_1,
        },
        market_sentiment: sentiment_digest(inputs.sentiment, inputs.order_flow),
        intraday_signals: intraday_calls(inputs.intraday),
        probabilistic_prediction: inputs.prediction.map(|p| PredictionDigest {
            prediction: p.trend_prediction,
            bullish_probability: p.bullish_probability,
            bearish_probability: p.bearish_probability,
            confidence: p.prediction_confidence,
        }),
        executive_summary: executive_summary(
            &technical_indicators,
            &volume_analysis,
            inputs.sentiment,
        ),
        technical_indicators,
        volume_analysis,
    }
}

fn indicator_digest(indicators: &IndicatorSet) -> IndicatorDigest {
    let rsi_status = match indicators.rsi {
        Some(rsi) if rsi < 30.0 => RsiStatus::Oversold,
        Some(rsi) if rsi > 70.0 => RsiStatus::Overbought,
        _ => RsiStatus::Neutral,
    };
    IndicatorDigest {
        rsi: indicators.rsi,
        rsi_status,
        macd_bullish: indicators.macd_bullish,
        adx: indicators.adx,
        adx_strength: indicators.adx.map(|adx| {
            if adx > 25.0 {
                Strength::Strong
            } else if adx < 20.0 {
                Strength::Weak
            } else {
                Strength::Moderate
            }
        }),
    }
}

fn volume_digest(indicators: &IndicatorSet) -> VolumeDigest {
    let status = match indicators.rvol {
        Some(rvol) if rvol > 1.5 => VolumeStatus::High,
        Some(rvol) if rvol < 0.8 => VolumeStatus::Low,
        _ => VolumeStatus::Normal,
    };
    VolumeDigest {
        rvol: indicators.rvol,
        status,
        big_prints_detected: indicators.big_print_detected.unwrap_or(false),
    }
}

fn sentiment_digest(sentiment: &MarketSentiment, flow: Option<&OrderFlowMetrics>) -> SentimentDigest {
    let mut digest = SentimentDigest::default();
    if let Some(vix) = &sentiment.vix {
        digest.vix_value = Some(vix.vix_value);
        digest.vix_change = Some(vix.vix_change_1d);
        digest.vix_sentiment = Some(vix.sentiment);
    }
    if let Some(breadth) = &sentiment.breadth {
        digest.tick_value = Some(breadth.tick_approximation);
        digest.tick_sentiment = Some(breadth.tick_sentiment);
        digest.market_breadth = Some(breadth.market_breadth);
    }
    if let Some(flow) = flow {
        digest.buy_pressure_pct = Some(flow.buy_pressure_pct);
        digest.order_flow_sentiment = Some(flow.order_flow_sentiment);
    }
    digest
}

/// Scalp and range calls from the 1m timeframe, EMA crosses from the 5m.
fn intraday_calls(intraday: &BTreeMap<Timeframe, TimeframeAnalysis>) -> Vec<IntradayCall> {
    let mut calls = Vec::new();

    if let Some(one_minute) = intraday.get(&Timeframe::OneMinute) {
        let signals = &one_minute.signals;
        if signals.scalp_buy_signal {
            calls.push(IntradayCall {
                timeframe: Timeframe::OneMinute,
                signal: IntradayCallKind::ScalpBuy,
            });
        } else if signals.scalp_sell_signal {
            calls.push(IntradayCall {
                timeframe: Timeframe::OneMinute,
                signal: IntradayCallKind::ScalpSell,
            });
        }
        if signals.range_trading {
            calls.push(IntradayCall {
                timeframe: Timeframe::OneMinute,
                signal: IntradayCallKind::RangeTrading,
            });
        }
    }

    if let Some(five_minutes) = intraday.get(&Timeframe::FiveMinutes) {
        let signals = &five_minutes.signals;
        let cross = if signals.ema_bullish_cross {
            Some(IntradayCallKind::EmaBullishCross)
        } else if signals.ema_bearish_cross {
            Some(IntradayCallKind::EmaBearishCross)
        } else {
            None
        };
        if let Some(signal) = cross {
            calls.push(IntradayCall {
                timeframe: Timeframe::FiveMinutes,
                signal,
            });
        }
    }

    calls
}

fn executive_summary(
    indicators: &IndicatorDigest,
    volume: &VolumeDigest,
    sentiment: &MarketSentiment,
) -> ExecutiveSummary {
    let mut bullish = Vec::new();
    let mut bearish = Vec::new();

    match indicators.rsi_status {
        RsiStatus::Oversold => bullish.push("RSI oversold".to_string()),
        RsiStatus::Overbought => bearish.push("RSI overbought".to_string()),
        RsiStatus::Neutral => {}
    }

    match indicators.macd_bullish {
        Some(true) => bullish.push("MACD bullish".to_string()),
        Some(false) => bearish.push("MACD bearish".to_string()),
        None => {}
    }

    match volume.status {
        VolumeStatus::High => bullish.push("High volume".to_string()),
        VolumeStatus::Low => bearish.push("Low volume".to_string()),
        VolumeStatus::Normal => {}
    }

    match sentiment.vix.as_ref().map(|v| v.sentiment) {
        Some(VixSentiment::Fear) => bullish.push("VIX in fear zone".to_string()),
        Some(VixSentiment::Greed) => bearish.push("VIX in greed zone".to_string()),
        _ => {}
    }

    let (bias, recommendation) = if bullish.len() > bearish.len() {
        (Trend::Bullish, "Look for buying opportunities on pullbacks")
    } else if bearish.len() > bullish.len() {
        (Trend::Bearish, "Consider selling into rallies")
    } else {
        (Trend::Neutral, "Wait for directional confirmation")
    };

    let key_factors = bullish
        .iter()
        .take(2)
        .chain(bearish.iter().take(2))
        .take(MAX_KEY_FACTORS)
        .cloned()
        .collect();

    ExecutiveSummary {
        bias,
        bullish_signals: bullish,
        bearish_signals: bearish,
        key_factors,
        recommendation: recommendation.to_string(),
    }
}
