use thiserror::Error;

/// Analysis error types.
///
/// None of these are fatal to a run. Indicator families and pipeline steps
/// catch them, record a diagnostic and continue with undefined outputs.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Insufficient data: need {required} bars, have {available}")]
    InsufficientData { required: usize, available: usize },

    #[error("Empty input: {0}")]
    EmptyInput(String),

    #[error("Invalid bar at index {index}: {reason}")]
    InvalidBar { index: usize, reason: String },

    #[error("Computation failed in {family}: {reason}")]
    Computation { family: String, reason: String },

    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),
}

impl AnalysisError {
    /// Shorthand for a computation failure inside a named family.
    pub fn computation(family: &str, reason: impl Into<String>) -> Self {
        AnalysisError::Computation {
            family: family.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AnalysisError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_data_message() {
        let err = AnalysisError::InsufficientData {
            required: 20,
            available: 5,
        };
        assert_eq!(err.to_string(), "Insufficient data: need 20 bars, have 5");
    }

    #[test]
    fn test_computation_helper() {
        let err = AnalysisError::computation("adx", "division by zero");
        assert_eq!(err.to_string(), "Computation failed in adx: division by zero");
    }
}
