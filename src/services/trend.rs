//! Weighted multi-factor trend classification.
//!
//! A single [`TrendScorer`] walks the indicator snapshot in a fixed order
//! (RSI, MACD, moving averages, oscillators, volume, volatility flags, MFI,
//! VIX) and casts weighted votes. What each step weighs, and whether it runs
//! at all, comes from a [`WeightTable`]. The two historical scoring variants
//! are the [`ScoringProfile::Canonical`] and [`ScoringProfile::Enhanced`]
//! tables.

use tracing::debug;

use crate::types::{Direction, IndicatorSet, ObvTrend, ScoringProfile, Strength, Trend, TrendVerdict, Vote};

/// Upper bound for any confidence value.
pub const MAX_CONFIDENCE: f64 = 95.0;

/// RSI zoning next to the 30/70 extremes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RsiRule {
    /// Inclusive accumulation (30..=max) and distribution (min..=70) bands.
    Bands {
        accumulation_max: f64,
        distribution_min: f64,
    },
    /// Exclusive "low" (< below) and "high" (> above) zones.
    Zones { low_below: f64, high_above: f64 },
}

/// How the MACD vote picks its weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MacdRule {
    /// Full weight when the histogram agrees with the line/signal order.
    Histogram,
    /// Full weight when the line is on the same side of zero.
    ZeroLine,
}

/// How price position against the SMAs is voted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MaRule {
    /// One vote for the majority side of SMA10/20/50/200.
    Majority { weight: f64 },
    /// One vote per SMA20/50/200 line.
    PerLine { sma_20: f64, sma_50: f64, sma_200: f64 },
}

/// How the winning share maps to a confidence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfidenceRule {
    /// `100 × share`.
    Share,
    /// `base + share × span`.
    Offset { base: f64, span: f64 },
}

/// Weights and switches driving the scorer.
///
/// `None` weights disable the corresponding step entirely.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightTable {
    pub rsi_extreme: f64,
    pub rsi_mild: f64,
    pub rsi_rule: RsiRule,
    pub macd_strong: f64,
    pub macd_weak: f64,
    pub macd_rule: MacdRule,
    pub moving_averages: MaRule,
    pub stochastic: Option<f64>,
    pub williams_r: Option<f64>,
    pub volume_confirmation: Option<f64>,
    pub obv: Option<f64>,
    pub mfi: Option<f64>,
    pub vix: Option<f64>,
    /// Emit Bollinger squeeze and high volatility texts.
    pub volatility_notes: bool,
    /// Emit a relative-volume text without voting.
    pub volume_ratio_note: bool,
    pub confidence: ConfidenceRule,
    /// Scale confidence down below 3 votes and up above 8.
    pub count_adjustment: bool,
}

impl WeightTable {
    pub fn canonical() -> Self {
        Self {
            rsi_extreme: 2.0,
            rsi_mild: 1.0,
            rsi_rule: RsiRule::Bands {
                accumulation_max: 45.0,
                distribution_min: 55.0,
            },
            macd_strong: 2.0,
            macd_weak: 1.0,
            macd_rule: MacdRule::Histogram,
            moving_averages: MaRule::Majority { weight: 1.5 },
            stochastic: Some(1.0),
            williams_r: Some(0.5),
            volume_confirmation: Some(1.5),
            obv: Some(1.0),
            mfi: Some(1.0),
            vix: None,
            volatility_notes: true,
            volume_ratio_note: false,
            confidence: ConfidenceRule::Share,
            count_adjustment: true,
        }
    }

    pub fn enhanced() -> Self {
        Self {
            rsi_extreme: 2.0,
            rsi_mild: 1.0,
            rsi_rule: RsiRule::Zones {
                low_below: 40.0,
                high_above: 60.0,
            },
            macd_strong: 2.0,
            macd_weak: 1.0,
            macd_rule: MacdRule::ZeroLine,
            moving_averages: MaRule::PerLine {
                sma_20: 1.0,
                sma_50: 1.0,
                sma_200: 2.0,
            },
            stochastic: None,
            williams_r: None,
            volume_confirmation: None,
            obv: None,
            mfi: None,
            vix: Some(1.0),
            volatility_notes: false,
            volume_ratio_note: true,
            confidence: ConfidenceRule::Offset {
                base: 50.0,
                span: 45.0,
            },
            count_adjustment: false,
        }
    }

    pub fn for_profile(profile: ScoringProfile) -> Self {
        match profile {
            ScoringProfile::Canonical => Self::canonical(),
            ScoringProfile::Enhanced => Self::enhanced(),
        }
    }
}

/// Ordered signal texts and votes collected during one scoring pass.
#[derive(Default)]
struct Tally {
    signals: Vec<String>,
    votes: Vec<Vote>,
    neutral: usize,
}

impl Tally {
    fn vote(&mut self, direction: Direction, weight: f64, text: String) {
        self.signals.push(text);
        self.votes.push(Vote { direction, weight });
    }

    fn silent_vote(&mut self, direction: Direction, weight: f64) {
        self.votes.push(Vote { direction, weight });
    }

    fn note(&mut self, text: String) {
        self.signals.push(text);
    }

    fn neutral(&mut self, text: String) {
        self.signals.push(text);
        self.neutral += 1;
    }

    fn weight(&self, direction: Direction) -> f64 {
        self.votes
            .iter()
            .filter(|v| v.direction == direction)
            .map(|v| v.weight)
            .sum()
    }

    fn count(&self, direction: Direction) -> usize {
        self.votes.iter().filter(|v| v.direction == direction).count()
    }
}

/// Classifies an indicator snapshot as bullish, bearish or neutral.
pub struct TrendScorer {
    profile: ScoringProfile,
    table: WeightTable,
}

impl Default for TrendScorer {
    fn default() -> Self {
        Self::new(ScoringProfile::default())
    }
}

impl TrendScorer {
    pub fn new(profile: ScoringProfile) -> Self {
        Self {
            profile,
            table: WeightTable::for_profile(profile),
        }
    }

    /// Score without a VIX reading.
    pub fn score(&self, indicators: &IndicatorSet) -> TrendVerdict {
        self.score_with_vix(indicators, None)
    }

    /// Score, letting the VIX vote when the table enables it.
    pub fn score_with_vix(&self, indicators: &IndicatorSet, vix: Option<f64>) -> TrendVerdict {
        if indicators.is_empty() {
            return TrendVerdict::no_data(self.profile);
        }

        let mut tally = Tally::default();
        self.rsi(indicators, &mut tally);
        self.macd(indicators, &mut tally);
        self.moving_averages(indicators, &mut tally);
        self.oscillators(indicators, &mut tally);
        self.volume(indicators, &mut tally);
        self.volatility(indicators, &mut tally);
        self.mfi(indicators, &mut tally);
        self.vix(vix, &mut tally);

        let verdict = self.aggregate(tally);
        debug!(
            profile = ?self.profile,
            trend = verdict.trend.label(),
            confidence = verdict.confidence,
            votes = verdict.vote_count(),
            "Scored trend"
        );
        verdict
    }

    fn rsi(&self, ind: &IndicatorSet, tally: &mut Tally) {
        let Some(rsi) = ind.rsi else {
            return;
        };
        let t = &self.table;
        if rsi < 30.0 {
            tally.vote(
                Direction::Bullish,
                t.rsi_extreme,
                format!("RSI oversold ({:.1}) - strong bullish signal", rsi),
            );
            return;
        }
        if rsi > 70.0 {
            tally.vote(
                Direction::Bearish,
                t.rsi_extreme,
                format!("RSI overbought ({:.1}) - strong bearish signal", rsi),
            );
            return;
        }
        match t.rsi_rule {
            RsiRule::Bands {
                accumulation_max,
                distribution_min,
            } => {
                if rsi <= accumulation_max {
                    tally.vote(
                        Direction::Bullish,
                        t.rsi_mild,
                        format!("RSI ({:.1}) - accumulation zone", rsi),
                    );
                } else if rsi >= distribution_min {
                    tally.vote(
                        Direction::Bearish,
                        t.rsi_mild,
                        format!("RSI ({:.1}) - distribution zone", rsi),
                    );
                } else {
                    tally.neutral(format!("RSI neutral ({:.1})", rsi));
                }
            }
            RsiRule::Zones {
                low_below,
                high_above,
            } => {
                if rsi < low_below {
                    tally.vote(
                        Direction::Bullish,
                        t.rsi_mild,
                        format!("RSI low ({:.1}) - moderate bullish signal", rsi),
                    );
                } else if rsi > high_above {
                    tally.vote(
                        Direction::Bearish,
                        t.rsi_mild,
                        format!("RSI high ({:.1}) - moderate bearish signal", rsi),
                    );
                } else {
                    tally.neutral(format!("RSI neutral ({:.1})", rsi));
                }
            }
        }
    }

    fn macd(&self, ind: &IndicatorSet, tally: &mut Tally) {
        let (Some(macd), Some(signal)) = (ind.macd, ind.macd_signal) else {
            return;
        };
        let t = &self.table;
        match t.macd_rule {
            MacdRule::Histogram => {
                let histogram = ind.macd_histogram;
                if macd > signal {
                    if histogram.is_some_and(|h| h > 0.0) {
                        tally.vote(Direction::Bullish, t.macd_strong, "MACD bullish with rising momentum".into());
                    } else {
                        tally.vote(Direction::Bullish, t.macd_weak, "MACD bullish with fading momentum".into());
                    }
                } else if histogram.is_some_and(|h| h < 0.0) {
                    tally.vote(Direction::Bearish, t.macd_strong, "MACD bearish with rising momentum".into());
                } else {
                    tally.vote(Direction::Bearish, t.macd_weak, "MACD bearish with fading momentum".into());
                }
            }
            MacdRule::ZeroLine => {
                if macd > signal && macd > 0.0 {
                    tally.vote(
                        Direction::Bullish,
                        t.macd_strong,
                        "MACD strong bullish - above signal and zero line".into(),
                    );
                } else if macd > signal {
                    tally.vote(Direction::Bullish, t.macd_weak, "MACD bullish - above signal".into());
                } else if macd < signal && macd < 0.0 {
                    tally.vote(
                        Direction::Bearish,
                        t.macd_strong,
                        "MACD strong bearish - below signal and zero line".into(),
                    );
                } else {
                    tally.vote(Direction::Bearish, t.macd_weak, "MACD bearish - below signal".into());
                }
            }
        }
    }

    fn moving_averages(&self, ind: &IndicatorSet, tally: &mut Tally) {
        let Some(close) = ind.last_close else {
            return;
        };
        let lines = [
            (20, "short-term", ind.sma_20),
            (50, "medium-term", ind.sma_50),
            (200, "long-term", ind.sma_200),
        ];
        let text = |period: u32, horizon: &str, above: bool| {
            if above {
                format!("Price above SMA{} - {} uptrend", period, horizon)
            } else {
                format!("Price below SMA{} - {} downtrend", period, horizon)
            }
        };

        match self.table.moving_averages {
            MaRule::Majority { weight } => {
                let mut above = 0;
                let mut below = 0;
                if let Some(sma) = ind.sma_10 {
                    if close > sma {
                        above += 1;
                    } else {
                        below += 1;
                    }
                }
                for (period, horizon, sma) in lines {
                    let Some(sma) = sma else { continue };
                    let is_above = close > sma;
                    if is_above {
                        above += 1;
                    } else {
                        below += 1;
                    }
                    tally.note(text(period, horizon, is_above));
                }
                if above > below {
                    tally.silent_vote(Direction::Bullish, weight);
                } else if below > above {
                    tally.silent_vote(Direction::Bearish, weight);
                }
            }
            MaRule::PerLine {
                sma_20,
                sma_50,
                sma_200,
            } => {
                for ((period, horizon, sma), weight) in lines.into_iter().zip([sma_20, sma_50, sma_200]) {
                    let Some(sma) = sma else { continue };
                    let is_above = close > sma;
                    let direction = if is_above { Direction::Bullish } else { Direction::Bearish };
                    tally.vote(direction, weight, text(period, horizon, is_above));
                }
            }
        }
    }

    fn oscillators(&self, ind: &IndicatorSet, tally: &mut Tally) {
        if let (Some(weight), Some(k), Some(d)) = (self.table.stochastic, ind.stoch_k, ind.stoch_d) {
            if k < 20.0 && d < 20.0 {
                tally.vote(Direction::Bullish, weight, format!("Stochastic oversold ({:.1}) - bullish signal", k));
            } else if k > 80.0 && d > 80.0 {
                tally.vote(Direction::Bearish, weight, format!("Stochastic overbought ({:.1}) - bearish signal", k));
            }
        }

        if let (Some(weight), Some(wr)) = (self.table.williams_r, ind.williams_r) {
            if wr < -80.0 {
                tally.vote(Direction::Bullish, weight, format!("Williams %R oversold ({:.1}) - bullish signal", wr));
            } else if wr > -20.0 {
                tally.vote(Direction::Bearish, weight, format!("Williams %R overbought ({:.1}) - bearish signal", wr));
            }
        }
    }

    fn volume(&self, ind: &IndicatorSet, tally: &mut Tally) {
        let t = &self.table;
        if let Some(weight) = t.volume_confirmation {
            if ind.volume_above_average == Some(true) {
                match ind.daily_change_pct {
                    Some(change) if change > 0.0 => tally.vote(
                        Direction::Bullish,
                        weight,
                        "High volume with rising price - bullish confirmation".into(),
                    ),
                    Some(change) if change < 0.0 => tally.vote(
                        Direction::Bearish,
                        weight,
                        "High volume with falling price - bearish confirmation".into(),
                    ),
                    _ => {}
                }
            }
        }

        if let Some(weight) = t.obv {
            match ind.obv_trend {
                ObvTrend::Bullish => tally.vote(Direction::Bullish, weight, "OBV trending up - positive money flow".into()),
                ObvTrend::Bearish => tally.vote(Direction::Bearish, weight, "OBV trending down - negative money flow".into()),
                ObvTrend::Neutral => {}
            }
        }

        if t.volume_ratio_note {
            match ind.rvol {
                Some(r) if r > 1.5 => tally.neutral(format!("High volume ({:.1}x average) - move confirmed", r)),
                Some(r) if r < 0.7 => tally.neutral(format!("Low volume ({:.1}x average) - lack of conviction", r)),
                _ => {}
            }
        }
    }

    fn volatility(&self, ind: &IndicatorSet, tally: &mut Tally) {
        if !self.table.volatility_notes {
            return;
        }
        if ind.bb_squeeze == Some(true) {
            tally.neutral("Bollinger Band squeeze - breakout may be imminent".into());
        }
        if ind.volatility_high == Some(true) {
            tally.neutral("High volatility detected - unstable market".into());
        }
    }

    fn mfi(&self, ind: &IndicatorSet, tally: &mut Tally) {
        let (Some(weight), Some(mfi)) = (self.table.mfi, ind.mfi) else {
            return;
        };
        if mfi < 20.0 {
            tally.vote(Direction::Bullish, weight, format!("MFI oversold ({:.1}) - money flowing in", mfi));
        } else if mfi > 80.0 {
            tally.vote(Direction::Bearish, weight, format!("MFI overbought ({:.1}) - money flowing out", mfi));
        }
    }

    fn vix(&self, vix: Option<f64>, tally: &mut Tally) {
        let (Some(weight), Some(vix)) = (self.table.vix, vix) else {
            return;
        };
        if vix > 30.0 {
            tally.vote(
                Direction::Bullish,
                weight,
                format!("VIX high ({:.1}) - fear in the market, possible rebound", vix),
            );
        } else if vix < 15.0 {
            tally.vote(
                Direction::Bearish,
                weight,
                format!("VIX low ({:.1}) - complacency, possible correction", vix),
            );
        }
    }

    fn aggregate(&self, tally: Tally) -> TrendVerdict {
        let bullish = tally.weight(Direction::Bullish);
        let bearish = tally.weight(Direction::Bearish);
        let total = bullish + bearish;
        let votes = tally.votes.len();

        let (trend, winning) = if bullish > bearish {
            (Trend::Bullish, bullish)
        } else if bearish > bullish {
            (Trend::Bearish, bearish)
        } else {
            (Trend::Neutral, 0.0)
        };

        let confidence = if trend == Trend::Neutral {
            50.0
        } else {
            let share = winning / total;
            let raw = match self.table.confidence {
                ConfidenceRule::Share => share * 100.0,
                ConfidenceRule::Offset { base, span } => base + share * span,
            };
            let mut confidence = raw.min(MAX_CONFIDENCE);
            if self.table.count_adjustment {
                if votes < 3 {
                    confidence *= 0.8;
                } else if votes > 8 {
                    confidence = (confidence * 1.1).min(MAX_CONFIDENCE);
                }
            }
            confidence
        };
        let confidence = round1(confidence);

        TrendVerdict {
            trend,
            confidence,
            strength: Strength::from_confidence(confidence),
            total_signals: tally.signals.len(),
            bullish_weight: round1(bullish),
            bearish_weight: round1(bearish),
            bullish_votes: tally.count(Direction::Bullish),
            bearish_votes: tally.count(Direction::Bearish),
            neutral_signals: tally.neutral,
            signals: tally.signals,
            profile: self.profile,
        }
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_set() -> IndicatorSet {
        IndicatorSet {
            bar_count: 250,
            last_close: Some(110.0),
            ..IndicatorSet::default()
        }
    }

    fn bullish_example() -> IndicatorSet {
        IndicatorSet {
            rsi: Some(25.0),
            macd: Some(1.0),
            macd_signal: Some(0.5),
            macd_histogram: Some(0.5),
            sma_10: Some(100.0),
            sma_20: Some(100.0),
            sma_50: Some(100.0),
            sma_200: Some(100.0),
            ..base_set()
        }
    }

    #[test]
    fn test_empty_indicators_no_data() {
        let verdict = TrendScorer::default().score(&IndicatorSet::empty());
        assert_eq!(verdict.trend(), Trend::Neutral);
        assert_eq!(verdict.confidence(), 0.0);
        assert!(verdict.signals().is_empty());
    }

    #[test]
    fn test_bullish_example_clamps_to_95() {
        let verdict = TrendScorer::default().score(&bullish_example());
        assert_eq!(verdict.trend(), Trend::Bullish);
        assert_eq!(verdict.bullish_weight(), 5.5);
        assert_eq!(verdict.bearish_weight(), 0.0);
        assert_eq!(verdict.confidence(), 95.0);
        assert_eq!(verdict.strength(), Strength::Strong);
        assert_eq!(verdict.vote_count(), 3);
    }

    #[test]
    fn test_signal_order() {
        let set = IndicatorSet {
            stoch_k: Some(10.0),
            stoch_d: Some(12.0),
            volume_above_average: Some(true),
            daily_change_pct: Some(1.2),
            bb_squeeze: Some(true),
            mfi: Some(15.0),
            ..bullish_example()
        };
        let verdict = TrendScorer::default().score(&set);
        let signals = verdict.signals();
        assert!(signals[0].starts_with("RSI oversold (25.0)"));
        assert!(signals[1].starts_with("MACD bullish"));
        assert!(signals[2].starts_with("Price above SMA20"));
        assert!(signals[3].starts_with("Price above SMA50"));
        assert!(signals[4].starts_with("Price above SMA200"));
        assert!(signals[5].starts_with("Stochastic oversold"));
        assert!(signals[6].starts_with("High volume with rising price"));
        assert!(signals[7].starts_with("Bollinger Band squeeze"));
        assert!(signals[8].starts_with("MFI oversold"));
        assert_eq!(verdict.total_signals, 9);
        assert_eq!(verdict.neutral_signals(), 1);
    }

    #[test]
    fn test_equal_weights_neutral() {
        // RSI oversold (2) vs MACD bearish with negative histogram (2).
        let set = IndicatorSet {
            rsi: Some(25.0),
            macd: Some(-1.0),
            macd_signal: Some(-0.5),
            macd_histogram: Some(-0.5),
            ..base_set()
        };
        for profile in [ScoringProfile::Canonical, ScoringProfile::Enhanced] {
            let verdict = TrendScorer::new(profile).score(&set);
            assert_eq!(verdict.trend(), Trend::Neutral);
            assert_eq!(verdict.confidence(), 50.0);
            assert_eq!(verdict.strength(), Strength::Weak);
        }
    }

    #[test]
    fn test_no_votes_neutral() {
        let set = IndicatorSet {
            rsi: Some(50.0),
            ..base_set()
        };
        let verdict = TrendScorer::default().score(&set);
        assert_eq!(verdict.trend(), Trend::Neutral);
        assert_eq!(verdict.confidence(), 50.0);
        assert_eq!(verdict.signals(), ["RSI neutral (50.0)"]);
    }

    #[test]
    fn test_few_votes_penalized() {
        // Two bearish votes only: 100 clamped to 95, then * 0.8.
        let set = IndicatorSet {
            rsi: Some(80.0),
            obv_trend: ObvTrend::Bearish,
            ..base_set()
        };
        let verdict = TrendScorer::default().score(&set);
        assert_eq!(verdict.trend(), Trend::Bearish);
        assert_eq!(verdict.confidence(), 76.0);
        assert_eq!(verdict.strength(), Strength::Strong);
    }

    #[test]
    fn test_eight_votes_not_adjusted() {
        let set = IndicatorSet {
            stoch_k: Some(10.0),
            stoch_d: Some(10.0),
            williams_r: Some(-90.0),
            volume_above_average: Some(true),
            daily_change_pct: Some(2.0),
            obv_trend: ObvTrend::Bullish,
            mfi: Some(10.0),
            // One bearish vote to keep the share under 100%.
            macd: Some(0.5),
            macd_signal: Some(1.0),
            macd_histogram: Some(-0.5),
            ..bullish_example()
        };
        let verdict = TrendScorer::default().score(&set);
        // bullish 2 + 1.5 + 1 + 0.5 + 1.5 + 1 + 1 = 8.5, bearish 2
        assert_eq!(verdict.bullish_weight(), 8.5);
        assert_eq!(verdict.bearish_weight(), 2.0);
        assert_eq!(verdict.vote_count(), 8);
        assert_eq!(verdict.confidence(), round1(8.5 / 10.5 * 100.0));
    }

    #[test]
    fn test_confidence_bounds() {
        let scorer = TrendScorer::default();
        for rsi in [5.0, 25.0, 35.0, 50.0, 60.0, 75.0, 95.0] {
            for hist in [-1.0, 0.0, 1.0] {
                let set = IndicatorSet {
                    rsi: Some(rsi),
                    macd: Some(hist),
                    macd_signal: Some(0.0),
                    macd_histogram: Some(hist),
                    ..bullish_example()
                };
                let c = scorer.score(&set).confidence();
                assert!((0.0..=MAX_CONFIDENCE).contains(&c));
            }
        }
    }

    #[test]
    fn test_enhanced_profile_offsets_confidence() {
        let set = IndicatorSet {
            rsi: Some(35.0),
            macd: Some(1.0),
            macd_signal: Some(0.5),
            sma_20: Some(100.0),
            sma_50: Some(100.0),
            sma_200: Some(120.0),
            ..base_set()
        };
        let verdict = TrendScorer::new(ScoringProfile::Enhanced).score(&set);
        // bullish: rsi 1 + macd 2 + sma20 1 + sma50 1 = 5, bearish: sma200 2
        assert_eq!(verdict.trend(), Trend::Bullish);
        assert_eq!(verdict.bullish_weight(), 5.0);
        assert_eq!(verdict.bearish_weight(), 2.0);
        assert_eq!(verdict.confidence(), round1(50.0 + 5.0 / 7.0 * 45.0));
        assert_eq!(verdict.profile(), ScoringProfile::Enhanced);
    }

    #[test]
    fn test_enhanced_vix_votes() {
        let set = IndicatorSet {
            rsi: Some(50.0),
            ..base_set()
        };
        let scorer = TrendScorer::new(ScoringProfile::Enhanced);
        let fearful = scorer.score_with_vix(&set, Some(35.0));
        assert_eq!(fearful.trend(), Trend::Bullish);
        assert_eq!(fearful.confidence(), 95.0);
        let calm = scorer.score_with_vix(&set, Some(12.0));
        assert_eq!(calm.trend(), Trend::Bearish);

        // Canonical ignores the VIX.
        let canonical = TrendScorer::default().score_with_vix(&set, Some(35.0));
        assert_eq!(canonical.trend(), Trend::Neutral);
    }

    #[test]
    fn test_canonical_rsi_bands_inclusive() {
        let scorer = TrendScorer::default();
        let at = |rsi: f64| {
            scorer.score(&IndicatorSet {
                rsi: Some(rsi),
                ..base_set()
            })
        };
        assert_eq!(at(45.0).trend(), Trend::Bullish);
        assert_eq!(at(55.0).trend(), Trend::Bearish);
        assert_eq!(at(70.0).bearish_weight(), 1.0);
        assert_eq!(at(30.0).bullish_weight(), 1.0);
    }
}
