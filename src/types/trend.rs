use serde::{Deserialize, Serialize};

/// Overall trend classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Bullish,
    Bearish,
    #[default]
    Neutral,
}

impl Trend {
    pub fn label(&self) -> &'static str {
        match self {
            Trend::Bullish => "bullish",
            Trend::Bearish => "bearish",
            Trend::Neutral => "neutral",
        }
    }
}

/// Strength bucket derived from confidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strength {
    Strong,
    Moderate,
    #[default]
    Weak,
}

impl Strength {
    /// strong if confidence > 75, moderate if > 60, else weak.
    pub fn from_confidence(confidence: f64) -> Self {
        if confidence > 75.0 {
            Strength::Strong
        } else if confidence > 60.0 {
            Strength::Moderate
        } else {
            Strength::Weak
        }
    }
}

/// Direction of a single weighted vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Bullish,
    Bearish,
}

/// One weighted vote cast by an indicator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vote {
    pub direction: Direction,
    pub weight: f64,
}

/// Named weight profile for the trend scorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringProfile {
    /// Full multi-indicator table with vote-count adjustment.
    #[default]
    Canonical,
    /// RSI/MACD/moving-average table with VIX input and offset confidence.
    Enhanced,
}

impl ScoringProfile {
    /// Parse from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "canonical" | "default" => Some(Self::Canonical),
            "enhanced" | "advanced" => Some(Self::Enhanced),
            _ => None,
        }
    }
}

/// Result of trend scoring.
///
/// Confidence and strength are always derived from the votes; the fields are
/// only writable inside the crate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendVerdict {
    pub(crate) trend: Trend,
    pub(crate) confidence: f64,
    pub(crate) strength: Strength,
    pub(crate) signals: Vec<String>,
    pub(crate) bullish_weight: f64,
    pub(crate) bearish_weight: f64,
    pub(crate) bullish_votes: usize,
    pub(crate) bearish_votes: usize,
    pub(crate) neutral_signals: usize,
    pub(crate) total_signals: usize,
    pub(crate) profile: ScoringProfile,
}

impl TrendVerdict {
    /// Verdict for an empty indicator set.
    pub fn no_data(profile: ScoringProfile) -> Self {
        Self {
            trend: Trend::Neutral,
            confidence: 0.0,
            strength: Strength::Weak,
            signals: Vec::new(),
            bullish_weight: 0.0,
            bearish_weight: 0.0,
            bullish_votes: 0,
            bearish_votes: 0,
            neutral_signals: 0,
            total_signals: 0,
            profile,
        }
    }

    pub fn trend(&self) -> Trend {
        self.trend
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    pub fn strength(&self) -> Strength {
        self.strength
    }

    pub fn signals(&self) -> &[String] {
        &self.signals
    }

    pub fn bullish_weight(&self) -> f64 {
        self.bullish_weight
    }

    pub fn bearish_weight(&self) -> f64 {
        self.bearish_weight
    }

    /// Number of weighted votes cast in either direction.
    pub fn vote_count(&self) -> usize {
        self.bullish_votes + self.bearish_votes
    }

    pub fn neutral_signals(&self) -> usize {
        self.neutral_signals
    }

    pub fn profile(&self) -> ScoringProfile {
        self.profile
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strength_thresholds_exact() {
        assert_eq!(Strength::from_confidence(75.0), Strength::Moderate);
        assert_eq!(Strength::from_confidence(75.1), Strength::Strong);
        assert_eq!(Strength::from_confidence(60.0), Strength::Weak);
        assert_eq!(Strength::from_confidence(60.1), Strength::Moderate);
    }

    #[test]
    fn test_no_data_verdict() {
        let verdict = TrendVerdict::no_data(ScoringProfile::Canonical);
        assert_eq!(verdict.trend(), Trend::Neutral);
        assert_eq!(verdict.confidence(), 0.0);
        assert!(verdict.signals().is_empty());
    }

    #[test]
    fn test_profile_from_str() {
        assert_eq!(ScoringProfile::from_str("Enhanced"), Some(ScoringProfile::Enhanced));
        assert_eq!(ScoringProfile::from_str("nope"), None);
    }
}
