use thiserror::Error;

/// Field-level rule violations raised while decoding a thought payload.
///
/// Messages are part of the tool contract and are returned to the caller verbatim.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Invalid {field}: must be a string")]
    NotAString { field: &'static str },

    #[error("Invalid {field}: must be a number")]
    NotANumber { field: &'static str },

    #[error("Invalid {field}: must be a boolean")]
    NotABoolean { field: &'static str },

    #[error("Invalid {field}: must be a number between 0.0 and 1.0")]
    OutOfUnitRange { field: &'static str },

    #[error("Invalid {field}: must be an array of strings")]
    NotAStringList { field: &'static str },

    #[error("Invalid {field}: must be an object")]
    NotAnObject { field: &'static str },
}

impl ValidationError {
    /// Dotted path of the offending field
    pub fn field(&self) -> &'static str {
        match self {
            Self::NotAString { field }
            | Self::NotANumber { field }
            | Self::NotABoolean { field }
            | Self::OutOfUnitRange { field }
            | Self::NotAStringList { field }
            | Self::NotAnObject { field } => field,
        }
    }
}

/// Custom error types for the sequential thinking server
#[derive(Debug, Error)]
pub enum SequentialThinkingError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl SequentialThinkingError {
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

/// Convert SequentialThinkingError to MCP-compatible ErrorData
impl From<SequentialThinkingError> for rmcp::model::ErrorData {
    fn from(err: SequentialThinkingError) -> Self {
        match err {
            SequentialThinkingError::Validation(_) => {
                rmcp::model::ErrorData::invalid_params(err.to_string(), None)
            }
            _ => rmcp::model::ErrorData::internal_error(err.to_string(), None),
        }
    }
}

/// Result type alias for convenience
pub type ThinkingResult<T> = std::result::Result<T, SequentialThinkingError>;

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::model::{ErrorCode, ErrorData};

    #[test]
    fn test_validation_messages_name_the_field() {
        assert_eq!(
            ValidationError::NotAString { field: "thought" }.to_string(),
            "Invalid thought: must be a string"
        );
        assert_eq!(
            ValidationError::OutOfUnitRange { field: "confidenceScore" }.to_string(),
            "Invalid confidenceScore: must be a number between 0.0 and 1.0"
        );
        assert_eq!(
            ValidationError::NotABoolean { field: "nextThoughtNeeded" }.field(),
            "nextThoughtNeeded"
        );
    }

    #[test]
    fn test_validation_error_is_transparent() {
        let err: SequentialThinkingError =
            ValidationError::NotANumber { field: "totalThoughts" }.into();
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "Invalid totalThoughts: must be a number");
    }

    #[test]
    fn test_error_data_mapping() {
        let invalid: ErrorData =
            SequentialThinkingError::from(ValidationError::NotAString { field: "thought" }).into();
        assert_eq!(invalid.code, ErrorCode::INVALID_PARAMS);

        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "stderr closed");
        let internal: ErrorData = SequentialThinkingError::Io(io).into();
        assert_eq!(internal.code, ErrorCode::INTERNAL_ERROR);
        assert_eq!(internal.message, "IO error: stderr closed");
    }
}
