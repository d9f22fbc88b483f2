use http::StatusCode;
use smart_support_common::error::{EncodeError, TransportError};

/// Why a verification round trip did not succeed
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum VerifyError {
    /// Backend answered with a non-success status.
    ///
    /// Displays as exactly the backend's message (or the generic fallback), since
    /// that string goes straight into the submission banner.
    #[error("{message}")]
    #[diagnostic(code(smart_support::verify::rejected))]
    Rejected {
        /// Status the backend returned
        status: StatusCode,
        /// Message extracted from the error body
        message: String,
    },

    /// HTTP transport error
    #[error("HTTP transport error: {0}")]
    Transport(
        #[from]
        #[diagnostic_source]
        TransportError,
    ),

    /// Request serialization failed
    #[error("{0}")]
    Encode(
        #[from]
        #[diagnostic_source]
        EncodeError,
    ),
}

impl VerifyError {
    /// HTTP status, if the backend got far enough to send one
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            VerifyError::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for VerifyError {
    fn from(e: serde_json::Error) -> Self {
        Self::Encode(EncodeError::Json(e))
    }
}

/// Result type for verification calls
pub type Result<T> = std::result::Result<T, VerifyError>;
