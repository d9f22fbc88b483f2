//! Error types for talking to the verification backend

/// Transport-level errors that occur during HTTP communication
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum TransportError {
    /// Failed to establish connection to server
    #[error("Connection error: {0}")]
    #[diagnostic(code(smart_support::transport::connect))]
    Connect(String),

    /// Request timed out
    #[error("Request timeout")]
    #[diagnostic(code(smart_support::transport::timeout))]
    Timeout,

    /// Request construction failed (malformed URI, headers, etc.)
    #[error("Invalid request: {0}")]
    #[diagnostic(code(smart_support::transport::invalid_request))]
    InvalidRequest(String),

    /// Other transport error
    #[error("Transport error: {0}")]
    #[diagnostic(code(smart_support::transport::other))]
    Other(Box<dyn std::error::Error + Send + Sync>),
}

impl From<http::Error> for TransportError {
    fn from(e: http::Error) -> Self {
        Self::InvalidRequest(e.to_string())
    }
}

#[cfg(feature = "reqwest-client")]
impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout
        } else if e.is_connect() {
            Self::Connect(e.to_string())
        } else if e.is_builder() || e.is_request() {
            Self::InvalidRequest(e.to_string())
        } else {
            Self::Other(Box::new(e))
        }
    }
}

/// Error type for encoding request bodies
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum EncodeError {
    /// Failed to serialize JSON body
    #[error("Failed to serialize JSON: {0}")]
    #[diagnostic(code(smart_support::encode::json))]
    Json(
        #[from]
        #[source]
        serde_json::Error,
    ),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_failures_are_invalid_requests() {
        let err = http::Request::builder()
            .uri("http://[::1")
            .body(Vec::<u8>::new())
            .unwrap_err();
        let err = TransportError::from(err);
        assert!(matches!(err, TransportError::InvalidRequest(_)));
        assert!(err.to_string().starts_with("Invalid request: "));
    }

    #[test]
    fn other_keeps_source_text() {
        let err = TransportError::Other(Box::new(std::io::Error::other("reset by peer")));
        assert_eq!(err.to_string(), "Transport error: reset by peer");
    }
}
