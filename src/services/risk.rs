//! Market risk scoring.

use crate::types::{IndicatorSet, RiskAssessment, RiskLevel, Strength, TrendVerdict};

const NEUTRAL_SCORE: i32 = 50;

impl RiskLevel {
    fn from_score(score: i32) -> Self {
        match score {
            s if s >= 80 => RiskLevel::VeryHigh,
            s if s >= 65 => RiskLevel::High,
            s if s >= 45 => RiskLevel::Moderate,
            s if s >= 30 => RiskLevel::Low,
            _ => RiskLevel::VeryLow,
        }
    }

    pub fn recommendation(&self) -> &'static str {
        match self {
            RiskLevel::VeryLow => "Favorable conditions. Consider increasing exposure.",
            RiskLevel::Low => "Risk under control. Hold current positions.",
            RiskLevel::Moderate => "Moderate risk. Diversify and use stop-losses.",
            RiskLevel::High => "High risk. Reduce exposure and raise cash.",
            RiskLevel::VeryHigh => "Very high risk. Consider defensive positioning.",
        }
    }
}

/// Score risk from the VIX level, trend strength and RSI extremes.
///
/// Starts at a neutral 50 and only adds; the score is clamped to 0..=100.
pub fn assess_risk(indicators: &IndicatorSet, vix: Option<f64>, trend: &TrendVerdict) -> RiskAssessment {
    let mut score = NEUTRAL_SCORE;
    let mut factors = Vec::new();

    match vix {
        Some(v) if v > 30.0 => {
            factors.push("High market volatility".to_string());
            score += 20;
        }
        Some(v) if v < 15.0 => {
            factors.push("Low volatility - possible complacency".to_string());
            score += 10;
        }
        _ => {}
    }

    if trend.strength() == Strength::Weak {
        factors.push("Weak trend - uncertain direction".to_string());
        score += 15;
    }

    if indicators.rsi.is_some_and(|rsi| !(20.0..=80.0).contains(&rsi)) {
        factors.push("RSI at extreme levels".to_string());
        score += 10;
    }

    let risk_level = RiskLevel::from_score(score);
    RiskAssessment {
        risk_level,
        risk_score: score.clamp(0, 100) as u8,
        risk_factors: factors,
        recommendation: risk_level.recommendation().to_string(),
    }
}
