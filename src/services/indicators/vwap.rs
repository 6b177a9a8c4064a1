//! Volume Weighted Average Price (VWAP).

use crate::types::Bar;

/// VWAP = Σ(typical price × volume) / Σ(volume).
///
/// Used both over short trailing windows (levels) and cumulatively over a
/// whole session (intraday signals).
pub struct Vwap;

impl Vwap {
    /// VWAP over the given bars; `None` when they carry no volume.
    pub fn over(bars: &[Bar]) -> Option<f64> {
        let volume: f64 = bars.iter().map(|b| b.volume).sum();
        if volume <= 0.0 {
            return None;
        }
        let weighted: f64 = bars.iter().map(|b| b.typical_price() * b.volume).sum();
        let vwap = weighted / volume;
        vwap.is_finite().then_some(vwap)
    }

    /// Cumulative VWAP column from the first bar.
    pub fn cumulative(bars: &[Bar]) -> Vec<Option<f64>> {
        let mut weighted = 0.0;
        let mut volume = 0.0;
        bars.iter()
            .map(|b| {
                weighted += b.typical_price() * b.volume;
                volume += b.volume;
                (volume > 0.0).then(|| weighted / volume)
            })
            .collect()
    }
}
