//! Per-run analysis context.
//!
//! Carries the symbol, an optional event sink and the collected diagnostics.
//! Passed explicitly into every pipeline stage instead of relying on
//! process-wide state.

use std::sync::{Arc, Mutex};

use tracing::{debug, info, warn};

use crate::error::AnalysisError;
use crate::types::{AnalysisEvent, EventLevel, Timeframe};

/// Callback receiving every event as it is emitted.
pub type EventSink = Arc<dyn Fn(&AnalysisEvent) + Send + Sync>;

pub struct AnalysisContext {
    symbol: String,
    sink: Option<EventSink>,
    diagnostics: Mutex<Vec<AnalysisEvent>>,
}

impl AnalysisContext {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            sink: None,
            diagnostics: Mutex::new(Vec::new()),
        }
    }

    /// Attach a callback that sees every event.
    pub fn with_sink(mut self, sink: EventSink) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Emit an event to tracing and the sink. Warnings are also kept as
    /// diagnostics for the report.
    pub fn emit(&self, event: AnalysisEvent) {
        let tf = event.timeframe.map(|t| t.as_str()).unwrap_or("-");
        match event.level {
            EventLevel::Debug => debug!(symbol = %self.symbol, stage = %event.stage, timeframe = tf, "{}", event.message),
            EventLevel::Info => info!(symbol = %self.symbol, stage = %event.stage, timeframe = tf, "{}", event.message),
            EventLevel::Warn => warn!(symbol = %self.symbol, stage = %event.stage, timeframe = tf, "{}", event.message),
        }

        if let Some(sink) = &self.sink {
            sink(&event);
        }

        if event.level == EventLevel::Warn {
            if let Ok(mut diagnostics) = self.diagnostics.lock() {
                diagnostics.push(event);
            }
        }
    }

    pub fn debug(&self, stage: &str, timeframe: Option<Timeframe>, message: impl Into<String>) {
        self.emit(event(EventLevel::Debug, stage, timeframe, message));
    }

    pub fn info(&self, stage: &str, timeframe: Option<Timeframe>, message: impl Into<String>) {
        self.emit(event(EventLevel::Info, stage, timeframe, message));
    }

    pub fn warn(&self, stage: &str, timeframe: Option<Timeframe>, message: impl Into<String>) {
        self.emit(event(EventLevel::Warn, stage, timeframe, message));
    }

    /// Record a stage that degraded to an empty result.
    pub fn degraded(&self, stage: &str, timeframe: Option<Timeframe>, err: &AnalysisError) {
        self.warn(stage, timeframe, err.to_string());
    }

    /// Warnings collected so far, in a stable order independent of task
    /// scheduling.
    pub fn diagnostics(&self) -> Vec<AnalysisEvent> {
        let mut out = match self.diagnostics.lock() {
            Ok(diagnostics) => diagnostics.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        };
        out.sort();
        out
    }
}

fn event(
    level: EventLevel,
    stage: &str,
    timeframe: Option<Timeframe>,
    message: impl Into<String>,
) -> AnalysisEvent {
    AnalysisEvent {
        level,
        stage: stage.to_string(),
        timeframe,
        message: message.into(),
    }
}
