//! Classification of externally supplied market-sentiment readings.

use std::collections::BTreeMap;

use crate::error::{AnalysisError, Result};
use crate::services::indicators::rolling::quantile;
use crate::types::{
    BreadthAnalysis, BreadthInput, BreadthStrength, FearLevel, MarketSentiment, TickSentiment,
    VixAnalysis, VixInput, VixSentiment,
};

const PERCENTILE_WINDOW: usize = 30;

/// Classify a VIX reading against its own recent history.
pub fn classify_vix(input: &VixInput) -> Result<VixAnalysis> {
    let value = input.value;
    if !value.is_finite() || value <= 0.0 {
        return Err(AnalysisError::computation("vix", format!("invalid reading {}", value)));
    }

    let previous = input.previous.unwrap_or(value);
    let change = value - previous;
    let change_pct = if previous > 0.0 { change / previous * 100.0 } else { 0.0 };

    let window = &input.history[input.history.len().saturating_sub(PERCENTILE_WINDOW)..];
    let percentile = (!window.is_empty()).then(|| {
        window.iter().filter(|v| **v < value).count() as f64 / window.len() as f64 * 100.0
    });

    let (sentiment, sentiment_score) = if value > 30.0 {
        (VixSentiment::Fear, -2)
    } else if value < 15.0 {
        (VixSentiment::Greed, 2)
    } else {
        (VixSentiment::Neutral, 0)
    };

    let market_fear_level = if value > 40.0 {
        FearLevel::Extreme
    } else if value > 25.0 {
        FearLevel::High
    } else if value > 15.0 {
        FearLevel::Moderate
    } else {
        FearLevel::Low
    };

    Ok(VixAnalysis {
        vix_value: value,
        vix_change_1d: change,
        vix_change_1d_pct: change_pct,
        vix_30d_percentile: percentile,
        sentiment,
        sentiment_score,
        spx_vix_ratio: input.spx.map(|spx| spx / value),
        vix_extreme_high: quantile(&input.history, 0.95).map(|q| value > q),
        vix_extreme_low: quantile(&input.history, 0.05).map(|q| value < q),
        market_fear_level,
    })
}

/// Classify advance/decline counts as a TICK approximation.
pub fn classify_breadth(input: &BreadthInput) -> Result<BreadthAnalysis> {
    let total = input.advancing + input.declining + input.unchanged;
    if total == 0 {
        return Err(AnalysisError::EmptyInput("no stocks sampled for breadth".into()));
    }

    let tick = input.advancing as i64 - input.declining as i64;
    let ratio = input.advancing as f64 / total as f64;

    let tick_sentiment = match tick {
        t if t >= 7 => TickSentiment::ExtremelyBullish,
        t if t >= 4 => TickSentiment::Bullish,
        t if t <= -7 => TickSentiment::ExtremelyBearish,
        t if t <= -4 => TickSentiment::Bearish,
        _ => TickSentiment::Neutral,
    };
    let market_breadth = if ratio > 0.7 {
        BreadthStrength::Strong
    } else if ratio < 0.3 {
        BreadthStrength::Weak
    } else {
        BreadthStrength::Moderate
    };

    Ok(BreadthAnalysis {
        tick_approximation: tick,
        advancing_stocks: input.advancing,
        declining_stocks: input.declining,
        unchanged_stocks: input.unchanged,
        total_stocks_sampled: total,
        advance_decline_ratio: ratio,
        tick_sentiment,
        market_breadth,
    })
}

/// Build the sentiment section from already classified parts.
pub fn market_sentiment(
    vix: Option<VixAnalysis>,
    breadth: Option<BreadthAnalysis>,
    extra: BTreeMap<String, serde_json::Value>,
) -> MarketSentiment {
    MarketSentiment { vix, breadth, extra }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vix(value: f64) -> VixInput {
        VixInput {
            value,
            ..VixInput::default()
        }
    }

    #[test]
    fn test_vix_sentiment_buckets() {
        let fear = classify_vix(&vix(35.0)).unwrap();
        assert_eq!(fear.sentiment, VixSentiment::Fear);
        assert_eq!(fear.sentiment_score, -2);
        assert_eq!(fear.market_fear_level, FearLevel::High);

        let greed = classify_vix(&vix(12.0)).unwrap();
        assert_eq!(greed.sentiment, VixSentiment::Greed);
        assert_eq!(greed.market_fear_level, FearLevel::Low);

        assert_eq!(classify_vix(&vix(45.0)).unwrap().market_fear_level, FearLevel::Extreme);
        assert_eq!(classify_vix(&vix(20.0)).unwrap().sentiment, VixSentiment::Neutral);
    }

    #[test]
    fn test_vix_change_and_history() {
        let input = VixInput {
            value: 22.0,
            previous: Some(20.0),
            history: (1..=40).map(|v| v as f64).collect(),
            spx: Some(4400.0),
        };
        let analysis = classify_vix(&input).unwrap();
        assert_eq!(analysis.vix_change_1d, 2.0);
        assert!((analysis.vix_change_1d_pct - 10.0).abs() < 1e-9);
        // last 30 values are 11..=40; 11 of them are below 22
        assert!((analysis.vix_30d_percentile.unwrap() - 11.0 / 30.0 * 100.0).abs() < 1e-9);
        assert_eq!(analysis.spx_vix_ratio, Some(200.0));
        assert_eq!(analysis.vix_extreme_high, Some(false));
        assert_eq!(analysis.vix_extreme_low, Some(false));
    }

    #[test]
    fn test_vix_without_history() {
        let analysis = classify_vix(&vix(18.0)).unwrap();
        assert_eq!(analysis.vix_change_1d, 0.0);
        assert!(analysis.vix_30d_percentile.is_none());
        assert!(analysis.vix_extreme_high.is_none());
        assert!(analysis.spx_vix_ratio.is_none());
    }

    #[test]
    fn test_vix_rejects_invalid() {
        assert!(classify_vix(&vix(0.0)).is_err());
        assert!(classify_vix(&vix(f64::NAN)).is_err());
    }

    #[test]
    fn test_breadth_classification() {
        let strong = classify_breadth(&BreadthInput {
            advancing: 9,
            declining: 1,
            unchanged: 0,
        })
        .unwrap();
        assert_eq!(strong.tick_approximation, 8);
        assert_eq!(strong.tick_sentiment, TickSentiment::ExtremelyBullish);
        assert_eq!(strong.market_breadth, BreadthStrength::Strong);

        let weak = classify_breadth(&BreadthInput {
            advancing: 2,
            declining: 7,
            unchanged: 1,
        })
        .unwrap();
        assert_eq!(weak.tick_sentiment, TickSentiment::Bearish);
        assert_eq!(weak.market_breadth, BreadthStrength::Weak);
        assert_eq!(weak.total_stocks_sampled, 10);
    }

    #[test]
    fn test_breadth_empty_sample() {
        assert!(classify_breadth(&BreadthInput::default()).is_err());
    }
}
