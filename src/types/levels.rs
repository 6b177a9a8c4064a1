use serde::{Deserialize, Serialize};

/// VWAP over the most recent 20/10/5 bars.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct VwapLevels {
    pub vwap_20: Option<f64>,
    pub vwap_10: Option<f64>,
    pub vwap_5: Option<f64>,
    /// Distance of the current price from `vwap_20`, percent, two decimals.
    pub vwap_deviation_pct: f64,
    pub above_vwap: bool,
}

/// Predicted support/resistance ladder and its component levels.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LevelSet {
    pub resistance_1: Option<f64>,
    pub resistance_2: Option<f64>,
    pub resistance_3: Option<f64>,
    pub support_1: Option<f64>,
    pub support_2: Option<f64>,
    pub support_3: Option<f64>,

    pub recent_high_5: Option<f64>,
    pub recent_low_5: Option<f64>,
    pub recent_high_10: Option<f64>,
    pub recent_low_10: Option<f64>,
    pub recent_high_20: Option<f64>,
    pub recent_low_20: Option<f64>,

    pub fibonacci_23_6: Option<f64>,
    pub fibonacci_38_2: Option<f64>,
    pub fibonacci_50_0: Option<f64>,
    pub fibonacci_61_8: Option<f64>,
    pub fibonacci_78_6: Option<f64>,
    pub fibonacci_38_2_20: Option<f64>,
    pub fibonacci_61_8_20: Option<f64>,

    pub pivot_point: Option<f64>,
    pub pivot_r1: Option<f64>,
    pub pivot_r2: Option<f64>,
    pub pivot_r3: Option<f64>,
    pub pivot_s1: Option<f64>,
    pub pivot_s2: Option<f64>,
    pub pivot_s3: Option<f64>,

    pub atr_resistance: Option<f64>,
    pub atr_support: Option<f64>,
    pub atr_resistance_2: Option<f64>,
    pub atr_support_2: Option<f64>,

    pub bb_upper: Option<f64>,
    pub bb_middle: Option<f64>,
    pub bb_lower: Option<f64>,

    pub vwap: Option<f64>,
    pub vwap_data: Option<VwapLevels>,

    /// Round-number levels within 5% of price, ascending, deduplicated.
    pub psychological_levels: Vec<f64>,

    pub current_price: Option<f64>,
    pub daily_range: Option<f64>,
    pub atr_value: Option<f64>,
    pub volatility_adjusted_range: Option<f64>,
}

impl LevelSet {
    pub fn is_empty(&self) -> bool {
        self.current_price.is_none()
    }

    /// The three resistances, nearest first.
    pub fn resistances(&self) -> [Option<f64>; 3] {
        [self.resistance_1, self.resistance_2, self.resistance_3]
    }

    /// The three supports, nearest first.
    pub fn supports(&self) -> [Option<f64>; 3] {
        [self.support_1, self.support_2, self.support_3]
    }
}
