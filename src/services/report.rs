//! Report assembly and JSON sanitization.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde_json::Value;

use crate::error::Result;
use crate::services::context::AnalysisContext;
use crate::services::summary::{build_summary, SummaryInputs};
use crate::types::{
    HeuristicPrediction, IndicatorSet, LevelSet, MarketSentiment, NewsItem, OrderFlowMetrics,
    Report, RiskAssessment, Timeframe, TimeframeAnalysis, TradingSignal, TrendVerdict,
    YesterdayData,
};

/// Replace every non-finite number with `null`, recursing through arrays
/// and objects. Strings pass through untouched, whatever they spell.
pub fn sanitize_value(value: Value) -> Value {
    match value {
        Value::Number(n) => match n.as_f64() {
            Some(f) if !f.is_finite() => Value::Null,
            _ => Value::Number(n),
        },
        Value::Array(items) => Value::Array(items.into_iter().map(sanitize_value).collect()),
        Value::Object(map) => {
            Value::Object(map.into_iter().map(|(k, v)| (k, sanitize_value(v))).collect())
        }
        other => other,
    }
}

/// Computed sections handed to the assembler.
pub struct ReportSections {
    pub yesterday_data: Option<YesterdayData>,
    pub technical_indicators: IndicatorSet,
    pub trend_analysis: TrendVerdict,
    pub daily_levels: LevelSet,
    pub trading_signals: Vec<TradingSignal>,
    pub probabilistic_analysis: Option<HeuristicPrediction>,
    pub market_sentiment: MarketSentiment,
    pub order_flow: Option<OrderFlowMetrics>,
    pub risk_assessment: RiskAssessment,
    pub intraday_analysis: BTreeMap<Timeframe, TimeframeAnalysis>,
    pub news: Vec<NewsItem>,
}

/// Builds the terminal [`Report`] for one symbol and date.
pub struct ReportAssembler {
    symbol: String,
    date: NaiveDate,
    primary: Timeframe,
}

impl ReportAssembler {
    pub fn new(symbol: impl Into<String>, date: NaiveDate, primary: Timeframe) -> Self {
        Self {
            symbol: symbol.into(),
            date,
            primary,
        }
    }

    /// Attach the summary and the context's diagnostics to `sections`.
    pub fn assemble(&self, sections: ReportSections, ctx: &AnalysisContext) -> Report {
        let summary = build_summary(&SummaryInputs {
            trend: &sections.trend_analysis,
            levels: &sections.daily_levels,
            indicators: &sections.technical_indicators,
            intraday: &sections.intraday_analysis,
            prediction: sections.probabilistic_analysis.as_ref(),
            sentiment: &sections.market_sentiment,
            order_flow: sections.order_flow.as_ref(),
        });

        let no_data = sections.technical_indicators.is_empty();
        if no_data {
            ctx.warn("report", Some(self.primary), "primary series has no bars");
        }

        Report {
            date: self.date.format("%Y-%m-%d").to_string(),
            symbol: self.symbol.clone(),
            primary_timeframe: self.primary,
            no_data,
            yesterday_data: sections.yesterday_data,
            technical_indicators: sections.technical_indicators,
            trend_analysis: sections.trend_analysis,
            daily_levels: sections.daily_levels,
            trading_signals: sections.trading_signals,
            probabilistic_analysis: sections.probabilistic_analysis,
            market_sentiment: sections.market_sentiment,
            order_flow: sections.order_flow,
            risk_assessment: sections.risk_assessment,
            intraday_analysis: sections.intraday_analysis,
            news: sections.news,
            summary,
            diagnostics: ctx.diagnostics(),
        }
    }

    /// Serialize to a sanitized JSON tree.
    pub fn to_value(report: &Report) -> Result<Value> {
        Ok(sanitize_value(serde_json::to_value(report)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::risk::assess_risk;
    use crate::types::ScoringProfile;
    use serde_json::json;

    #[test]
    fn test_sanitize_nested() {
        let value = json!({
            "a": Value::from(f64::NAN),
            "b": [1.5, Value::from(f64::INFINITY), {"c": Value::from(f64::NEG_INFINITY)}],
            "d": "fine",
            "e": null,
        });
        assert_eq!(
            sanitize_value(value),
            json!({"a": null, "b": [1.5, null, {"c": null}], "d": "fine", "e": null})
        );
    }

    #[test]
    fn test_sanitize_keeps_strings() {
        let value = json!(["NaN", "nan", "inf", "-Infinity", "Nancy", "-1"]);
        assert_eq!(sanitize_value(value.clone()), value);
    }

    fn empty_sections() -> ReportSections {
        let indicators = IndicatorSet::empty();
        let trend = TrendVerdict::no_data(ScoringProfile::Canonical);
        ReportSections {
            yesterday_data: None,
            risk_assessment: assess_risk(&indicators, None, &trend),
            technical_indicators: indicators,
            trend_analysis: trend,
            daily_levels: LevelSet::default(),
            trading_signals: Vec::new(),
            probabilistic_analysis: None,
            market_sentiment: MarketSentiment::default(),
            order_flow: None,
            intraday_analysis: BTreeMap::new(),
            news: Vec::new(),
        }
    }

    #[test]
    fn test_empty_report_marks_no_data() {
        let ctx = AnalysisContext::new("NDX");
        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let report = ReportAssembler::new("NDX", date, Timeframe::OneDay).assemble(empty_sections(), &ctx);

        assert!(report.no_data);
        assert_eq!(report.date, "2024-03-15");
        assert_eq!(report.diagnostics.len(), 1);
        assert_eq!(report.diagnostics[0].stage, "report");
    }

    #[test]
    fn test_to_value_nulls_non_finite_numbers_only() {
        let ctx = AnalysisContext::new("NDX");
        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let mut sections = empty_sections();
        sections.technical_indicators.rsi = Some(f64::NAN);
        sections
            .market_sentiment
            .extra
            .insert("put_call".to_string(), json!({"ratio": "NaN", "volume": 10}));
        let report = ReportAssembler::new("NDX", date, Timeframe::OneDay).assemble(sections, &ctx);
        let value = ReportAssembler::to_value(&report).unwrap();

        assert_eq!(value["technical_indicators"]["rsi"], Value::Null);
        assert_eq!(value["market_sentiment"]["extra"]["put_call"]["ratio"], json!("NaN"));
        assert_eq!(value["market_sentiment"]["extra"]["put_call"]["volume"], json!(10));
        assert_eq!(value["primary_timeframe"], json!("1d"));
    }
}
