//! CarQuery client error types.

/// Errors that can occur when querying the CarQuery API.
///
/// Only [`CarQueryError::Api`] originates from the service itself. The other
/// variants wrap failures from the transport, the JSON layer or local setup
/// without reinterpreting them.
#[derive(Debug, thiserror::Error)]
pub enum CarQueryError {
    /// The API answered with an explicit `error` field
    #[error("API error: {message}")]
    Api { message: String },

    /// HTTP request failed (network error, timeout, non-success status)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body was not the JSON shape we expected
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },

    /// Base URL could not be parsed
    #[error("invalid base URL {url:?}: {message}")]
    InvalidUrl { url: String, message: String },

    /// Fixture directory or file could not be used
    #[error("fixture error: {message}")]
    Fixture { message: String },
}

impl CarQueryError {
    /// Build a `Json` error, keeping a bounded excerpt of the offending body.
    pub(crate) fn json(err: impl std::fmt::Display, body: &str) -> Self {
        CarQueryError::Json {
            message: err.to_string(),
            body: Some(body.chars().take(500).collect()),
        }
    }

    /// Returns the remote-supplied message if this is an API error.
    pub fn api_message(&self) -> Option<&str> {
        match self {
            CarQueryError::Api { message } => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = CarQueryError::Api {
            message: "No make specified".into(),
        };
        assert_eq!(err.to_string(), "API error: No make specified");
        assert_eq!(err.api_message(), Some("No make specified"));

        let err = CarQueryError::Fixture {
            message: "no fixture for getTrims".into(),
        };
        assert_eq!(err.to_string(), "fixture error: no fixture for getTrims");
        assert_eq!(err.api_message(), None);
    }

    #[test]
    fn json_error_truncates_body() {
        let body = "x".repeat(2000);
        let err = CarQueryError::json("expected value", &body);

        match err {
            CarQueryError::Json { message, body } => {
                assert_eq!(message, "expected value");
                assert_eq!(body.map(|b| b.len()), Some(500));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
