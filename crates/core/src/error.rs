//! Validation errors raised by the lap-time and strategy engine

/// Errors that can occur when the engine validates its inputs
///
/// Both variants are local validation failures detected before any
/// computation runs. Neither is retryable.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineError {
    /// Tire identifier is not one of the five known compounds
    InvalidTireId(String),
    /// Numeric input outside the modeled domain
    InvalidParameter {
        /// Parameter name as the caller passed it
        name: &'static str,
        /// What was wrong with the value
        reason: String,
    },
}

impl EngineError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        EngineError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::InvalidTireId(id) => write!(f, "Unknown tire compound: '{id}'"),
            EngineError::InvalidParameter { name, reason } => {
                write!(f, "Invalid parameter '{name}': {reason}")
            }
        }
    }
}

impl std::error::Error for EngineError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = EngineError::InvalidTireId("supersoft".to_string());
        assert_eq!(err.to_string(), "Unknown tire compound: 'supersoft'");

        let err = EngineError::invalid("fuel_load", "must be non-negative, got -3");
        assert_eq!(
            err.to_string(),
            "Invalid parameter 'fuel_load': must be non-negative, got -3"
        );
    }
}
