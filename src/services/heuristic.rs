//! Synthetic breakout heuristic.
//!
//! **This is not a trained model.** It draws seeded synthetic samples around
//! the current feature values, labels them with a fixed rule, fits ordinary
//! least squares on standardized features and reads the fitted value at the
//! current point. Same seed and same inputs give the same output.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use tracing::debug;

use crate::error::{AnalysisError, Result};
use crate::types::{HeuristicPrediction, IndicatorSet, Trend};

pub const DEFAULT_SEED: u64 = 42;
pub const DEFAULT_SAMPLES: usize = 100;

const MIN_FEATURES: usize = 3;
const PIVOT_EPSILON: f64 = 1e-12;

/// Seeded least-squares heuristic over indicator features.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyntheticHeuristic {
    seed: u64,
    samples: usize,
}

impl Default for SyntheticHeuristic {
    fn default() -> Self {
        Self::new(DEFAULT_SEED, DEFAULT_SAMPLES)
    }
}

/// One named input to the fit.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Feature {
    name: &'static str,
    value: f64,
}

impl Feature {
    fn new(name: &'static str, value: f64) -> Self {
        Self { name, value }
    }

    /// Draw a synthetic variation of this feature.
    fn sample(&self, rng: &mut StdRng) -> Result<f64> {
        if self.name == "obv_trend" {
            return Ok(rng.gen_range(-1i32..=1) as f64);
        }
        let std_dev = match self.name {
            "rsi" => 10.0,
            "macd" => self.value.abs() * 0.2,
            "price_vs_sma20" => 2.0,
            "adx" => 5.0,
            "volume_ratio" => 0.3,
            _ => self.value.abs() * 0.1,
        };
        let normal = Normal::new(self.value, std_dev)
            .map_err(|e| AnalysisError::computation("heuristic", e.to_string()))?;
        Ok(normal.sample(rng))
    }
}

impl SyntheticHeuristic {
    pub fn new(seed: u64, samples: usize) -> Self {
        Self { seed, samples }
    }

    /// Evaluate the heuristic for an indicator snapshot.
    pub fn evaluate(&self, indicators: &IndicatorSet) -> Result<HeuristicPrediction> {
        if indicators.is_empty() {
            return Err(AnalysisError::EmptyInput("no indicators for heuristic".into()));
        }

        let features = Self::features(indicators);
        if features.len() < MIN_FEATURES {
            return Err(AnalysisError::InsufficientData {
                required: MIN_FEATURES,
                available: features.len(),
            });
        }
        if self.samples <= features.len() {
            return Err(AnalysisError::InsufficientData {
                required: features.len() + 1,
                available: self.samples,
            });
        }

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut rows = Vec::with_capacity(self.samples);
        let mut targets = Vec::with_capacity(self.samples);
        for _ in 0..self.samples {
            let row = features
                .iter()
                .map(|f| f.sample(&mut rng))
                .collect::<Result<Vec<f64>>>()?;
            targets.push(Self::label(&features, &row));
            rows.push(row);
        }

        let scaler = Scaler::fit(&rows);
        let scaled: Vec<Vec<f64>> = rows.iter().map(|r| scaler.transform(r)).collect();
        let model = LinearFit::fit(&scaled, &targets)?;

        let current: Vec<f64> = features.iter().map(|f| f.value).collect();
        let prediction = model.predict(&scaler.transform(&current));
        if !prediction.is_finite() {
            return Err(AnalysisError::computation("heuristic", "non-finite prediction"));
        }
        let score = model.r_squared(&scaled, &targets);

        let (trend_prediction, bullish, bearish) = if prediction > 0.5 {
            let bullish = (50.0 + prediction * 30.0).min(95.0);
            (Trend::Bullish, bullish, 100.0 - bullish)
        } else if prediction < -0.5 {
            let bearish = (50.0 + prediction.abs() * 30.0).min(95.0);
            (Trend::Bearish, 100.0 - bearish, bearish)
        } else {
            (Trend::Neutral, 50.0, 50.0)
        };

        debug!(
            prediction,
            score,
            features = features.len(),
            seed = self.seed,
            "Evaluated synthetic heuristic"
        );

        Ok(HeuristicPrediction {
            trend_prediction,
            bullish_probability: round_to(bullish, 1),
            bearish_probability: round_to(bearish, 1),
            prediction_confidence: round_to(prediction.abs() * 100.0, 1),
            features_used: features.iter().map(|f| f.name.to_string()).collect(),
            model_score: round_to(score, 3),
            seed: self.seed,
        })
    }

    /// Features available in the snapshot, in a fixed order.
    fn features(ind: &IndicatorSet) -> Vec<Feature> {
        let mut features = Vec::new();
        if let Some(rsi) = ind.rsi {
            features.push(Feature::new("rsi", rsi));
        }
        if let Some(macd) = ind.macd {
            features.push(Feature::new("macd", macd));
        }
        features.push(Feature::new("obv_trend", ind.obv_trend.as_feature()));
        if let (Some(close), Some(sma)) = (ind.last_close, ind.sma_20) {
            if sma != 0.0 {
                features.push(Feature::new("price_vs_sma20", (close - sma) / sma * 100.0));
            }
        }
        if let Some(adx) = ind.adx {
            features.push(Feature::new("adx", adx));
        }
        features.push(Feature::new("volume_ratio", ind.rvol.unwrap_or(1.0)));
        features.push(Feature::new("volatility_std", ind.volatility_std.unwrap_or(0.0)));
        features
    }

    /// Breakout label for one synthetic row: 1 bullish, -1 bearish, 0 neither.
    fn label(features: &[Feature], row: &[f64]) -> f64 {
        let value = |name: &str, default: f64| {
            features
                .iter()
                .position(|f| f.name == name)
                .map(|i| row[i])
                .unwrap_or(default)
        };
        let rsi = value("rsi", 50.0);
        let macd = value("macd", 0.0);
        let obv = value("obv_trend", 0.0);

        let mut score = 0;
        if rsi < 30.0 {
            score += 2;
        } else if rsi < 50.0 {
            score += 1;
        }
        if macd > 0.0 {
            score += 1;
        }
        if obv > 0.0 {
            score += 1;
        }

        match score {
            s if s >= 3 => 1.0,
            s if s <= 1 => -1.0,
            _ => 0.0,
        }
    }
}

/// Column standardization with population standard deviation. Constant
/// columns keep a scale of 1.
struct Scaler {
    means: Vec<f64>,
    scales: Vec<f64>,
}

impl Scaler {
    fn fit(rows: &[Vec<f64>]) -> Self {
        let n = rows.len() as f64;
        let width = rows.first().map(|r| r.len()).unwrap_or(0);
        let mut means = vec![0.0; width];
        let mut scales = vec![1.0; width];
        for j in 0..width {
            let mean = rows.iter().map(|r| r[j]).sum::<f64>() / n;
            let var = rows.iter().map(|r| (r[j] - mean).powi(2)).sum::<f64>() / n;
            means[j] = mean;
            if var.sqrt() > PIVOT_EPSILON {
                scales[j] = var.sqrt();
            }
        }
        Self { means, scales }
    }

    fn transform(&self, row: &[f64]) -> Vec<f64> {
        row.iter()
            .zip(self.means.iter().zip(&self.scales))
            .map(|(v, (m, s))| (v - m) / s)
            .collect()
    }
}

/// Ordinary least squares with an intercept.
struct LinearFit {
    intercept: f64,
    coefficients: Vec<f64>,
}

impl LinearFit {
    /// Solve the normal equations by Gaussian elimination with partial
    /// pivoting. Degenerate directions get a zero coefficient.
    fn fit(rows: &[Vec<f64>], targets: &[f64]) -> Result<Self> {
        let width = rows.first().map(|r| r.len()).unwrap_or(0) + 1;
        let mut a = vec![vec![0.0; width + 1]; width];
        for (row, y) in rows.iter().zip(targets) {
            let x: Vec<f64> = std::iter::once(1.0).chain(row.iter().copied()).collect();
            for i in 0..width {
                for j in 0..width {
                    a[i][j] += x[i] * x[j];
                }
                a[i][width] += x[i] * y;
            }
        }

        let mut solved = vec![false; width];
        for col in 0..width {
            let pivot = (col..width)
                .max_by(|&p, &q| a[p][col].abs().total_cmp(&a[q][col].abs()))
                .unwrap_or(col);
            if a[pivot][col].abs() < PIVOT_EPSILON {
                continue;
            }
            a.swap(col, pivot);
            solved[col] = true;
            for r in 0..width {
                if r != col {
                    let factor = a[r][col] / a[col][col];
                    for c in col..=width {
                        a[r][c] -= factor * a[col][c];
                    }
                }
            }
        }

        let beta: Vec<f64> = (0..width)
            .map(|i| if solved[i] { a[i][width] / a[i][i] } else { 0.0 })
            .collect();
        if beta.iter().any(|b| !b.is_finite()) {
            return Err(AnalysisError::computation("heuristic", "singular least-squares system"));
        }

        Ok(Self {
            intercept: beta[0],
            coefficients: beta[1..].to_vec(),
        })
    }

    fn predict(&self, x: &[f64]) -> f64 {
        self.intercept
            + self
                .coefficients
                .iter()
                .zip(x)
                .map(|(b, v)| b * v)
                .sum::<f64>()
    }

    /// Coefficient of determination on the training rows.
    fn r_squared(&self, rows: &[Vec<f64>], targets: &[f64]) -> f64 {
        let n = targets.len() as f64;
        let mean = targets.iter().sum::<f64>() / n;
        let ss_tot: f64 = targets.iter().map(|y| (y - mean).powi(2)).sum();
        let ss_res: f64 = rows
            .iter()
            .zip(targets)
            .map(|(x, y)| (y - self.predict(x)).powi(2))
            .sum();
        if ss_tot == 0.0 {
            return if ss_res < PIVOT_EPSILON { 1.0 } else { 0.0 };
        }
        1.0 - ss_res / ss_tot
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ObvTrend;

    fn snapshot() -> IndicatorSet {
        IndicatorSet {
            bar_count: 120,
            last_close: Some(105.0),
            rsi: Some(28.0),
            macd: Some(1.5),
            sma_20: Some(100.0),
            adx: Some(30.0),
            rvol: Some(1.2),
            volatility_std: Some(1.1),
            obv_trend: ObvTrend::Bullish,
            ..IndicatorSet::default()
        }
    }

    #[test]
    fn test_reproducible_with_seed() {
        let heuristic = SyntheticHeuristic::default();
        let a = heuristic.evaluate(&snapshot()).unwrap();
        let b = heuristic.evaluate(&snapshot()).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.seed, DEFAULT_SEED);
    }

    #[test]
    fn test_features_used_order() {
        let prediction = SyntheticHeuristic::default().evaluate(&snapshot()).unwrap();
        assert_eq!(
            prediction.features_used,
            vec!["rsi", "macd", "obv_trend", "price_vs_sma20", "adx", "volume_ratio", "volatility_std"]
        );
    }

    #[test]
    fn test_probabilities_are_complementary() {
        for seed in [1, 7, 42, 99] {
            let p = SyntheticHeuristic::new(seed, 100).evaluate(&snapshot()).unwrap();
            assert!((p.bullish_probability + p.bearish_probability - 100.0).abs() < 0.11);
            assert!(p.bullish_probability <= 95.0 && p.bearish_probability <= 95.0);
            assert!(p.model_score <= 1.0);
        }
    }

    #[test]
    fn test_minimal_features_still_evaluates() {
        // Only obv_trend, volume_ratio and volatility_std.
        let set = IndicatorSet {
            bar_count: 3,
            ..IndicatorSet::default()
        };
        let p = SyntheticHeuristic::default().evaluate(&set).unwrap();
        assert_eq!(p.features_used.len(), 3);
    }

    #[test]
    fn test_empty_indicators_rejected() {
        let err = SyntheticHeuristic::default().evaluate(&IndicatorSet::empty());
        assert!(matches!(err, Err(AnalysisError::EmptyInput(_))));
    }

    #[test]
    fn test_too_few_samples_rejected() {
        let err = SyntheticHeuristic::new(42, 3).evaluate(&snapshot());
        assert!(matches!(err, Err(AnalysisError::InsufficientData { .. })));
    }

    #[test]
    fn test_linear_fit_recovers_line() {
        let rows: Vec<Vec<f64>> = (0..10).map(|i| vec![i as f64]).collect();
        let targets: Vec<f64> = (0..10).map(|i| 3.0 + 2.0 * i as f64).collect();
        let fit = LinearFit::fit(&rows, &targets).unwrap();
        assert!((fit.intercept - 3.0).abs() < 1e-9);
        assert!((fit.coefficients[0] - 2.0).abs() < 1e-9);
        assert!((fit.r_squared(&rows, &targets) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_label_rule() {
        let features = [
            Feature::new("rsi", 0.0),
            Feature::new("macd", 0.0),
            Feature::new("obv_trend", 0.0),
        ];
        assert_eq!(SyntheticHeuristic::label(&features, &[25.0, 1.0, 1.0]), 1.0);
        assert_eq!(SyntheticHeuristic::label(&features, &[45.0, 1.0, 0.0]), 0.0);
        assert_eq!(SyntheticHeuristic::label(&features, &[60.0, -1.0, 1.0]), -1.0);
    }
}
