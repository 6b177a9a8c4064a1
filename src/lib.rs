//! Sextant - multi-timeframe technical analysis report engine

pub mod config;
pub mod error;
pub mod services;
pub mod types;

// Re-export commonly used types
pub use error::{AnalysisError, Result};
pub use services::{AnalysisContext, MarketInput, ReportAssembler, Series};
pub use types::*;
