//! End-to-end analysis run.
//!
//! Builds the per-timeframe analyses, then the primary-timeframe sections
//! (signals, heuristic, sentiment, order flow, risk) and hands everything to
//! the [`ReportAssembler`]. Every step that can fail degrades to an empty
//! section and leaves a diagnostic on the context.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tokio::task::JoinSet;

use crate::config::AnalysisConfig;
use crate::services::heuristic::SyntheticHeuristic;
use crate::services::indicators::IndicatorBank;
use crate::services::intraday::compute_intraday_signals;
use crate::services::levels::LevelPredictor;
use crate::services::order_flow::tape_metrics;
use crate::services::report::{ReportAssembler, ReportSections};
use crate::services::risk::assess_risk;
use crate::services::sentiment::{classify_breadth, classify_vix, market_sentiment};
use crate::services::series::Series;
use crate::services::trading_signals::generate_trading_signals;
use crate::services::trend::TrendScorer;
use crate::types::{
    Bar, BreadthInput, NewsItem, Report, ScoringProfile, Timeframe, TimeframeAnalysis, VixInput,
    YesterdayData,
};

pub use crate::services::context::AnalysisContext;

fn default_primary() -> Timeframe {
    Timeframe::OneDay
}

/// Everything the adapters collected for one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketInput {
    #[serde(default)]
    pub symbol: Option<String>,
    /// Report date. Defaults to the date of the last primary bar.
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default = "default_primary")]
    pub primary: Timeframe,
    #[serde(default)]
    pub series: BTreeMap<Timeframe, Vec<Bar>>,
    #[serde(default)]
    pub vix: Option<VixInput>,
    #[serde(default)]
    pub breadth: Option<BreadthInput>,
    #[serde(default)]
    pub news: Vec<NewsItem>,
    #[serde(default)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Default for MarketInput {
    fn default() -> Self {
        Self {
            symbol: None,
            date: None,
            primary: default_primary(),
            series: BTreeMap::new(),
            vix: None,
            breadth: None,
            news: Vec::new(),
            extra: BTreeMap::new(),
        }
    }
}

/// Indicators, intraday signals, trend and levels for one timeframe.
pub fn analyze_timeframe(
    series: &Series,
    timeframe: Timeframe,
    scoring: ScoringProfile,
    ctx: &AnalysisContext,
) -> TimeframeAnalysis {
    let bank = IndicatorBank::for_timeframe(timeframe);
    let indicators = bank.compute(series, ctx, timeframe);
    let signals = compute_intraday_signals(series, &indicators, bank.profile());
    let trend = TrendScorer::new(scoring).score(&indicators);
    let levels = LevelPredictor::new().predict(series, &indicators);

    ctx.debug(
        "timeframe",
        Some(timeframe),
        format!(
            "{} bars, trend {} at {:.1}%",
            series.len(),
            trend.trend().label(),
            trend.confidence()
        ),
    );

    TimeframeAnalysis {
        timeframe,
        total_bars: series.len(),
        indicators,
        signals,
        trend,
        levels,
    }
}

/// Analyze every timeframe on the calling thread.
pub fn analyze_timeframes(
    series: &BTreeMap<Timeframe, Series>,
    scoring: ScoringProfile,
    ctx: &AnalysisContext,
) -> BTreeMap<Timeframe, TimeframeAnalysis> {
    series
        .iter()
        .map(|(tf, s)| (*tf, analyze_timeframe(s, *tf, scoring, ctx)))
        .collect()
}

/// Analyze every timeframe on its own blocking task.
///
/// Each task owns its series; the result map is ordered by timeframe so the
/// output matches [`analyze_timeframes`].
pub async fn analyze_timeframes_concurrent(
    series: BTreeMap<Timeframe, Series>,
    scoring: ScoringProfile,
    ctx: Arc<AnalysisContext>,
) -> BTreeMap<Timeframe, TimeframeAnalysis> {
    let mut tasks = JoinSet::new();
    for (timeframe, s) in series {
        let ctx = Arc::clone(&ctx);
        tasks.spawn_blocking(move || (timeframe, analyze_timeframe(&s, timeframe, scoring, &ctx)));
    }

    let mut analyses = BTreeMap::new();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((timeframe, analysis)) => {
                analyses.insert(timeframe, analysis);
            }
            Err(e) => ctx.warn("pipeline", None, format!("timeframe task failed: {}", e)),
        }
    }
    analyses
}

/// Validated input, ready for analysis.
struct Prepared {
    symbol: String,
    date: NaiveDate,
    primary: Timeframe,
    series: BTreeMap<Timeframe, Series>,
    vix: Option<VixInput>,
    breadth: Option<BreadthInput>,
    news: Vec<NewsItem>,
    extra: BTreeMap<String, serde_json::Value>,
}

impl Prepared {
    /// Validate each series; an invalid one is dropped with a diagnostic.
    /// The primary timeframe is always present, empty if nothing usable
    /// was supplied.
    fn new(input: MarketInput, ctx: &AnalysisContext) -> Self {
        let mut series = BTreeMap::new();
        for (timeframe, bars) in input.series {
            match Series::new(bars) {
                Ok(s) => {
                    series.insert(timeframe, s);
                }
                Err(e) => ctx.degraded("series", Some(timeframe), &e),
            }
        }
        series.entry(input.primary).or_insert_with(Series::empty);

        let date = input
            .date
            .or_else(|| {
                series
                    .get(&input.primary)
                    .and_then(|s| s.last())
                    .and_then(|bar| DateTime::from_timestamp_millis(bar.timestamp))
                    .map(|dt| dt.date_naive())
            })
            .unwrap_or_else(|| Utc::now().date_naive());

        Self {
            symbol: input.symbol.unwrap_or_else(|| ctx.symbol().to_string()),
            date,
            primary: input.primary,
            series,
            vix: input.vix,
            breadth: input.breadth,
            news: input.news,
            extra: input.extra,
        }
    }

    /// Finest non-empty series, used for tape metrics.
    fn finest(&self) -> Option<(Timeframe, &Series)> {
        self.series
            .iter()
            .find(|(_, s)| !s.is_empty())
            .map(|(tf, s)| (*tf, s))
    }
}

/// Run the whole analysis synchronously.
pub fn run(input: MarketInput, config: &AnalysisConfig, ctx: &AnalysisContext) -> Report {
    let prepared = Prepared::new(input, ctx);
    ctx.info(
        "pipeline",
        None,
        format!("analyzing {} timeframes", prepared.series.len()),
    );
    let analyses = analyze_timeframes(&prepared.series, config.scoring_profile, ctx);
    finish(prepared, analyses, config, ctx)
}

/// Run the whole analysis with the timeframes fanned out over blocking
/// tasks. Produces the same report as [`run`].
pub async fn run_concurrent(
    input: MarketInput,
    config: &AnalysisConfig,
    ctx: Arc<AnalysisContext>,
) -> Report {
    let prepared = Prepared::new(input, &ctx);
    ctx.info(
        "pipeline",
        None,
        format!("analyzing {} timeframes concurrently", prepared.series.len()),
    );
    let analyses = analyze_timeframes_concurrent(
        prepared.series.clone(),
        config.scoring_profile,
        Arc::clone(&ctx),
    )
    .await;
    finish(prepared, analyses, config, &ctx)
}

fn finish(
    prepared: Prepared,
    mut analyses: BTreeMap<Timeframe, TimeframeAnalysis>,
    config: &AnalysisConfig,
    ctx: &AnalysisContext,
) -> Report {
    let primary = prepared.primary;
    let primary_series = prepared.series.get(&primary).cloned().unwrap_or_default();
    let primary_analysis = match analyses.get(&primary) {
        Some(analysis) => analysis.clone(),
        None => analyze_timeframe(&primary_series, primary, config.scoring_profile, ctx),
    };

    let vix = prepared.vix.as_ref().and_then(|input| match classify_vix(input) {
        Ok(analysis) => Some(analysis),
        Err(e) => {
            ctx.degraded("vix", None, &e);
            None
        }
    });
    let breadth = prepared.breadth.as_ref().and_then(|input| match classify_breadth(input) {
        Ok(analysis) => Some(analysis),
        Err(e) => {
            ctx.degraded("breadth", None, &e);
            None
        }
    });
    let vix_value = vix.as_ref().map(|v| v.vix_value);

    let indicators = primary_analysis.indicators;
    let trend = TrendScorer::new(config.scoring_profile).score_with_vix(&indicators, vix_value);

    let probabilistic_analysis = if indicators.is_empty() {
        None
    } else {
        let heuristic = SyntheticHeuristic::new(config.heuristic_seed, config.heuristic_samples);
        match heuristic.evaluate(&indicators) {
            Ok(prediction) => Some(prediction),
            Err(e) => {
                ctx.degraded("heuristic", Some(primary), &e);
                None
            }
        }
    };

    let order_flow = prepared.finest().and_then(|(tf, s)| match tape_metrics(s) {
        Ok(metrics) => Some(metrics),
        Err(e) => {
            ctx.degraded("order_flow", Some(tf), &e);
            None
        }
    });

    let yesterday_data = primary_series.last().map(|bar| YesterdayData {
        high: bar.high,
        low: bar.low,
        close: bar.close,
        volume: bar.volume,
    });

    analyses.retain(|tf, _| tf.is_intraday());

    let sections = ReportSections {
        yesterday_data,
        trading_signals: generate_trading_signals(&indicators, &trend),
        risk_assessment: assess_risk(&indicators, vix_value, &trend),
        technical_indicators: indicators,
        trend_analysis: trend,
        daily_levels: primary_analysis.levels,
        probabilistic_analysis,
        market_sentiment: market_sentiment(vix, breadth, prepared.extra),
        order_flow,
        intraday_analysis: analyses,
        news: prepared.news,
    };

    ReportAssembler::new(prepared.symbol, prepared.date, primary).assemble(sections, ctx)
}
