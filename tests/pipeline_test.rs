//! Integration tests for the analysis pipeline

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use serde_json::{json, Value};
use sextant::config::AnalysisConfig;
use sextant::services::{pipeline, AnalysisContext, EventSink, MarketInput, ReportAssembler};
use sextant::types::{AnalysisEvent, Bar, BreadthInput, EventLevel, NewsItem, Timeframe, VixInput};

fn wave_bars(count: usize, step_ms: i64, drift: f64) -> Vec<Bar> {
    (0..count)
        .map(|i| {
            let wave = ((i as f64) * 0.7).sin() * 3.0;
            let close = 15_000.0 + i as f64 * drift + wave;
            let open = close - wave * 0.3;
            let high = open.max(close) + 4.0;
            let low = open.min(close) - 4.0;
            let volume = 1_000.0 + ((i * 37) % 11) as f64 * 120.0;
            Bar::new(1_700_000_000_000 + i as i64 * step_ms, open, high, low, close, volume)
        })
        .collect()
}

fn market_input() -> MarketInput {
    let mut series = BTreeMap::new();
    series.insert(Timeframe::OneMinute, wave_bars(120, 60_000, 0.4));
    series.insert(Timeframe::FiveMinutes, wave_bars(120, 300_000, 0.8));
    series.insert(Timeframe::OneDay, wave_bars(260, 86_400_000, 6.0));

    let mut extra = BTreeMap::new();
    extra.insert("put_call_ratio".to_string(), json!({"value": "NaN", "source": "cboe"}));

    MarketInput {
        symbol: Some("NDX".to_string()),
        date: NaiveDate::from_ymd_opt(2024, 3, 15),
        primary: Timeframe::OneDay,
        series,
        vix: Some(VixInput {
            value: 18.5,
            previous: Some(17.9),
            history: (0..40).map(|i| 14.0 + i as f64 * 0.2).collect(),
            spx: Some(5_100.0),
        }),
        breadth: Some(BreadthInput {
            advancing: 58,
            declining: 40,
            unchanged: 2,
        }),
        news: vec![NewsItem {
            title: "Chipmakers lead the rally".to_string(),
            source: Some("wire".to_string()),
            url: None,
            published_at: None,
            summary: None,
        }],
        extra,
    }
}

fn report_value(input: MarketInput) -> Value {
    let ctx = AnalysisContext::new("NDX");
    let report = pipeline::run(input, &AnalysisConfig::default(), &ctx);
    ReportAssembler::to_value(&report).unwrap()
}

#[test]
fn test_run_is_idempotent() {
    assert_eq!(report_value(market_input()), report_value(market_input()));
}

#[test]
fn test_report_shape() {
    let value = report_value(market_input());

    assert_eq!(value["symbol"], "NDX");
    assert_eq!(value["date"], "2024-03-15");
    assert_eq!(value["primary_timeframe"], "1d");
    assert_eq!(value["no_data"], false);
    assert!(value["intraday_analysis"]["1m"].is_object());
    assert!(value["intraday_analysis"]["5m"].is_object());
    assert!(value["intraday_analysis"].get("1d").is_none());
    assert!(value["market_sentiment"]["vix"]["vix_value"].is_number());
    assert_eq!(value["market_sentiment"]["breadth"]["tick_approximation"], 18);
    assert_eq!(value["probabilistic_analysis"]["seed"], 42);
    assert_eq!(value["news"][0]["title"], "Chipmakers lead the rally");
    assert!(value["summary"]["executive_summary"]["key_factors"]
        .as_array()
        .is_some_and(|f| f.len() <= 3));
}

#[test]
fn test_extra_payloads_keep_strings() {
    let value = report_value(market_input());
    let extra = &value["market_sentiment"]["extra"]["put_call_ratio"];
    assert_eq!(extra["value"], "NaN");
    assert_eq!(extra["source"], "cboe");
}

#[test]
fn test_trend_confidence_bounds() {
    let value = report_value(market_input());
    let confidence = value["trend_analysis"]["confidence"].as_f64().unwrap();
    assert!((0.0..=95.0).contains(&confidence));
    for tf in ["1m", "5m"] {
        let c = value["intraday_analysis"][tf]["trend"]["confidence"].as_f64().unwrap();
        assert!((0.0..=95.0).contains(&c));
    }
}

#[test]
fn test_different_seed_changes_only_heuristic() {
    let ctx = AnalysisContext::new("NDX");
    let config = AnalysisConfig {
        heuristic_seed: 7,
        ..AnalysisConfig::default()
    };
    let reseeded = pipeline::run(market_input(), &config, &ctx);
    let mut value = ReportAssembler::to_value(&reseeded).unwrap();
    let mut baseline = report_value(market_input());

    assert_eq!(value["probabilistic_analysis"]["seed"], 7);
    assert_eq!(value["trend_analysis"], baseline["trend_analysis"]);
    assert_eq!(value["daily_levels"], baseline["daily_levels"]);

    for v in [&mut value, &mut baseline] {
        v["probabilistic_analysis"] = Value::Null;
        v["summary"]["probabilistic_prediction"] = Value::Null;
    }
    assert_eq!(value, baseline);
}

#[test]
fn test_invalid_sentiment_degrades() {
    let mut input = market_input();
    input.vix = Some(VixInput {
        value: -3.0,
        ..VixInput::default()
    });
    input.breadth = Some(BreadthInput::default());

    let ctx = AnalysisContext::new("NDX");
    let report = pipeline::run(input, &AnalysisConfig::default(), &ctx);

    assert!(report.market_sentiment.vix.is_none());
    assert!(report.market_sentiment.breadth.is_none());
    let stages: Vec<_> = report.diagnostics.iter().map(|d| d.stage.as_str()).collect();
    assert!(stages.contains(&"vix"));
    assert!(stages.contains(&"breadth"));
    assert!(report.technical_indicators.rsi.is_some());
}

#[test]
fn test_sink_sees_events() {
    let seen: Arc<Mutex<Vec<AnalysisEvent>>> = Arc::new(Mutex::new(Vec::new()));
    let sink_seen = Arc::clone(&seen);
    let sink: EventSink = Arc::new(move |event: &AnalysisEvent| {
        sink_seen.lock().unwrap().push(event.clone());
    });
    let ctx = AnalysisContext::new("NDX").with_sink(sink);

    let mut input = market_input();
    input.series.insert(Timeframe::FourHours, Vec::new());
    let report = pipeline::run(input, &AnalysisConfig::default(), &ctx);

    let events = seen.lock().unwrap();
    assert!(events.iter().any(|e| e.level == EventLevel::Info && e.stage == "pipeline"));
    let warnings: Vec<_> = events.iter().filter(|e| e.level == EventLevel::Warn).cloned().collect();
    assert_eq!(warnings.len(), report.diagnostics.len());
    assert!(report
        .diagnostics
        .iter()
        .any(|d| d.timeframe == Some(Timeframe::FourHours)));
}

#[test]
fn test_input_parses_from_json() {
    let raw = json!({
        "symbol": "QQQ",
        "series": {
            "1d": [
                {"timestamp": 1_700_000_000_000i64, "open": 10.0, "high": 11.0, "low": 9.5, "close": 10.5, "volume": 100.0},
                {"time": 1_700_086_400_000i64, "open": 10.5, "high": 11.5, "low": 10.0, "close": 11.0}
            ]
        }
    });
    let input: MarketInput = serde_json::from_value(raw).unwrap();
    assert_eq!(input.primary, Timeframe::OneDay);
    assert_eq!(input.series[&Timeframe::OneDay].len(), 2);
    assert_eq!(input.series[&Timeframe::OneDay][1].volume, 0.0);

    let ctx = AnalysisContext::new("NDX");
    let report = pipeline::run(input, &AnalysisConfig::default(), &ctx);
    assert_eq!(report.symbol, "QQQ");
    assert_eq!(report.date, "2023-11-15");
    assert!(report.technical_indicators.rsi.is_none());
    assert_eq!(report.yesterday_data.unwrap().close, 11.0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_concurrent_run_matches_sequential() {
    let sequential = report_value(market_input());

    let ctx = Arc::new(AnalysisContext::new("NDX"));
    let report = pipeline::run_concurrent(market_input(), &AnalysisConfig::default(), ctx).await;
    let concurrent = ReportAssembler::to_value(&report).unwrap();

    assert_eq!(concurrent, sequential);
}

#[test]
fn test_concurrent_run_on_current_thread_runtime() {
    let ctx = Arc::new(AnalysisContext::new("NDX"));
    let report = tokio_test::block_on(pipeline::run_concurrent(
        market_input(),
        &AnalysisConfig::default(),
        ctx,
    ));
    assert_eq!(report.intraday_analysis.len(), 2);
    assert!(!report.no_data);
}
