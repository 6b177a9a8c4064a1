pub mod context;
pub mod heuristic;
pub mod indicators;
pub mod intraday;
pub mod levels;
pub mod order_flow;
pub mod pipeline;
pub mod report;
pub mod risk;
pub mod sentiment;
pub mod series;
pub mod summary;
pub mod trading_signals;
pub mod trend;

pub use context::{AnalysisContext, EventSink};
pub use heuristic::SyntheticHeuristic;
pub use indicators::{Indicator, IndicatorBank};
pub use levels::LevelPredictor;
pub use pipeline::{
    analyze_timeframe, analyze_timeframes, analyze_timeframes_concurrent, run, run_concurrent,
    MarketInput,
};
pub use report::{sanitize_value, ReportAssembler, ReportSections};
pub use series::Series;
pub use trend::{TrendScorer, WeightTable};
