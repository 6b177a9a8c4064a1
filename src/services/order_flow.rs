//! Order-flow (tape) approximation from bar data.

use crate::error::{AnalysisError, Result};
use crate::services::indicators::rolling::mean;
use crate::services::series::Series;
use crate::types::{FlowSentiment, OrderFlowMetrics};

/// Reported buy/sell ratio when there is no selling at all.
pub const UNBOUNDED_RATIO: f64 = 999.0;

const IMBALANCE_WINDOW: usize = 10;

/// Approximate buy/sell pressure from the sign of each close-to-close move.
///
/// Needs at least two bars. The imbalance is the share of up candles among
/// the last ten bars that moved (uses what's available).
pub fn tape_metrics(series: &Series) -> Result<OrderFlowMetrics> {
    let bars = series.bars();
    if bars.len() < 2 {
        return Err(AnalysisError::InsufficientData {
            required: 2,
            available: bars.len(),
        });
    }

    let mut buy_pressure = 0.0;
    let mut sell_pressure = 0.0;
    for pair in bars.windows(2) {
        let change = pair[1].close - pair[0].close;
        if change > 0.0 {
            buy_pressure += pair[1].volume;
        } else if change < 0.0 {
            sell_pressure += pair[1].volume;
        }
    }

    let total = buy_pressure + sell_pressure;
    let buy_sell_ratio = if sell_pressure > 0.0 {
        buy_pressure / sell_pressure
    } else {
        UNBOUNDED_RATIO
    };
    let (buy_pressure_pct, sell_pressure_pct) = if total > 0.0 {
        (buy_pressure / total * 100.0, sell_pressure / total * 100.0)
    } else {
        (50.0, 50.0)
    };

    let volumes = series.volumes();
    let avg_trade_size = mean(&volumes).unwrap_or(0.0);
    let large_trades_count = volumes.iter().filter(|v| **v > avg_trade_size * 2.0).count();
    let large_trade_ratio = large_trades_count as f64 / volumes.len() as f64;

    let recent = series.tail(IMBALANCE_WINDOW);
    let up = recent.iter().filter(|b| b.close > b.open).count();
    let down = recent.iter().filter(|b| b.close < b.open).count();
    let bid_ask_imbalance = if up + down > 0 {
        up as f64 / (up + down) as f64
    } else {
        0.5
    };

    let order_flow_sentiment = if buy_pressure_pct > 60.0 {
        FlowSentiment::Bullish
    } else if buy_pressure_pct < 40.0 {
        FlowSentiment::Bearish
    } else {
        FlowSentiment::Neutral
    };

    Ok(OrderFlowMetrics {
        buy_pressure,
        sell_pressure,
        buy_sell_ratio,
        buy_pressure_pct,
        sell_pressure_pct,
        avg_trade_size,
        large_trades_count,
        large_trade_ratio,
        bid_ask_imbalance,
        order_flow_sentiment,
    })
}
