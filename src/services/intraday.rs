//! Short-horizon signals for a single timeframe.
//!
//! Built on top of the timeframe's [`IndicatorSet`]; only the columns that
//! need more than the latest value (EMA cross, momentum, rolling extremes,
//! volume ratio, cumulative VWAP) are recomputed here.

use crate::services::indicators::rolling::{
    defined, latest, pct_change, previous, ratio, rolling_max, rolling_mean, rolling_min,
};
use crate::services::indicators::{Ema, Vwap};
use crate::services::series::Series;
use crate::types::{IndicatorSet, IntradaySignals, TimeframeProfile, Trend};

/// Scalp RSI thresholds, tighter than the daily 30/70.
const SCALP_RSI_OVERSOLD: f64 = 25.0;
const SCALP_RSI_OVERBOUGHT: f64 = 75.0;

/// Band width (as a fraction of the middle band) below which the range is
/// considered squeezed.
const INTRADAY_SQUEEZE: f64 = 0.02;

const ATR_STOP_MULTIPLIER: f64 = 1.5;
const LEVEL_WINDOW: usize = 20;

/// Compute the intraday signal block for `series`.
///
/// Returns the default (all flags off, all values undefined) for an empty
/// series.
pub fn compute_intraday_signals(
    series: &Series,
    indicators: &IndicatorSet,
    profile: &TimeframeProfile,
) -> IntradaySignals {
    let Some(last) = series.last() else {
        return IntradaySignals::default();
    };
    let price = last.close;
    let closes = series.closes();

    let ema_fast = Ema::column(&closes, profile.ema_fast);
    let ema_slow = Ema::column(&closes, profile.ema_slow);
    let (ema_bullish_cross, ema_bearish_cross) = match (
        latest(&ema_fast),
        latest(&ema_slow),
        previous(&ema_fast),
        previous(&ema_slow),
    ) {
        (Some(fast), Some(slow), Some(prev_fast), Some(prev_slow)) => (
            fast > slow && prev_fast <= prev_slow,
            fast < slow && prev_fast >= prev_slow,
        ),
        _ => (false, false),
    };
    let trend_short = match (latest(&ema_fast), latest(&ema_slow)) {
        (Some(fast), Some(slow)) if fast > slow => Some(Trend::Bullish),
        (Some(_), Some(_)) => Some(Trend::Bearish),
        _ => None,
    };

    let rsi = indicators.rsi;
    let histogram = indicators.macd_histogram;

    let bb_squeeze = match (indicators.bb_upper, indicators.bb_lower, indicators.bb_middle) {
        (Some(upper), Some(lower), Some(middle)) => {
            ratio(upper - lower, middle).map(|width| width < INTRADAY_SQUEEZE)
        }
        _ => None,
    };
    let price_near_upper_bb = indicators.bb_upper.is_some_and(|upper| price > upper * 0.98);
    let price_near_lower_bb = indicators.bb_lower.is_some_and(|lower| price < lower * 1.02);
    let price_above_middle_band = indicators.bb_middle.map(|middle| price > middle);
    let squeezed = bb_squeeze.unwrap_or(false);

    let buy_votes = [
        rsi.is_some_and(|v| v < 35.0),
        histogram.is_some_and(|h| h > 0.0),
        price_near_lower_bb || indicators.bb_middle.is_some_and(|m| price < m * 0.999),
        !squeezed,
    ];
    let sell_votes = [
        rsi.is_some_and(|v| v > 65.0),
        histogram.is_some_and(|h| h < 0.0),
        price_near_upper_bb || indicators.bb_middle.is_some_and(|m| price > m * 1.001),
        !squeezed,
    ];

    let volumes = defined(&series.volumes());
    let volume_ratio = latest(&rolling_mean(&volumes, LEVEL_WINDOW))
        .and_then(|avg| ratio(last.volume, avg));

    let vwap = Vwap::cumulative(series.bars()).last().copied().flatten();

    IntradaySignals {
        ema_bullish_cross,
        ema_bearish_cross,
        rsi_oversold_scalp: rsi.is_some_and(|v| v < SCALP_RSI_OVERSOLD),
        rsi_overbought_scalp: rsi.is_some_and(|v| v > SCALP_RSI_OVERBOUGHT),
        bb_squeeze,
        price_near_upper_bb,
        price_near_lower_bb,
        price_above_middle_band,
        atr_stop_long: indicators.atr.map(|atr| price - atr * ATR_STOP_MULTIPLIER),
        atr_stop_short: indicators.atr.map(|atr| price + atr * ATR_STOP_MULTIPLIER),
        stoch_oversold: indicators.stoch_k.is_some_and(|k| k < 20.0),
        stoch_overbought: indicators.stoch_k.is_some_and(|k| k > 80.0),
        momentum_5: latest(&pct_change(&closes, 5)).map(|m| m * 100.0),
        momentum_10: latest(&pct_change(&closes, 10)).map(|m| m * 100.0),
        resistance_level: latest(&rolling_max(&defined(&series.highs()), LEVEL_WINDOW)),
        support_level: latest(&rolling_min(&defined(&series.lows()), LEVEL_WINDOW)),
        volume_ratio,
        volume_spike: volume_ratio.is_some_and(|r| r > 2.0),
        trend_short,
        scalp_buy_signal: buy_votes.iter().filter(|v| **v).count() >= 2,
        scalp_sell_signal: sell_votes.iter().filter(|v| **v).count() >= 2,
        range_trading: squeezed,
        vwap,
        vwap_distance_pct: vwap.and_then(|v| ratio(price - v, v)).map(|d| d * 100.0),
        price_above_vwap: vwap.map(|v| price > v),
    }
}
