//! Error types for the library layer.

use std::fmt;

/// Errors produced by the library layer, wrapping upstream API errors
/// and adding serialization and input validation failures.
#[derive(Debug)]
pub enum ScreenerError {
    /// An error from the query builder or the scanner transport.
    Api(tvscreener_api::Error),
    /// JSON serialization or deserialization failed.
    Serialization(serde_json::Error),
    /// User-provided input failed validation.
    InvalidInput(String),
}

impl ScreenerError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

impl fmt::Display for ScreenerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api(e) => write!(f, "API error: {}", e),
            Self::Serialization(e) => write!(f, "Serialization error: {}", e),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
        }
    }
}

impl std::error::Error for ScreenerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Api(e) => Some(e),
            Self::Serialization(e) => Some(e),
            Self::InvalidInput(_) => None,
        }
    }
}

impl From<tvscreener_api::Error> for ScreenerError {
    fn from(e: tvscreener_api::Error) -> Self {
        Self::Api(e)
    }
}

impl From<serde_json::Error> for ScreenerError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e)
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn display_and_source() {
        let api = tvscreener_api::Error::UnknownInterval("7D".to_string());
        let err = ScreenerError::from(api);
        assert_eq!(err.to_string(), "API error: Unknown interval `7D`");
        assert!(err.source().is_some());

        let err = ScreenerError::invalid("limit must be positive");
        assert_eq!(err.to_string(), "Invalid input: limit must be positive");
        assert!(err.source().is_none());
    }
}
