//! Common types for the Smart Support identity verification flow

#![warn(missing_docs)]
pub use smol_str;
pub use url;

pub mod error;
/// HTTP client abstraction used by the verification crates.
pub mod http_client;
pub mod input;
/// Validated form field types.
pub mod types;

pub use input::{FieldErrors, VerificationInput};
pub use types::{Contact, Email, Field, FieldError, Name};
