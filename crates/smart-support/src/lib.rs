//! # Smart Support identity verification
//!
//! A headless verification form (name, mobile number, email) and the page
//! that submits it to the backend's `POST /validate-users` endpoint.
//!
//! ## Example
//!
//! ```no_run
//! use smart_support::{
//!     config::PageConfig,
//!     form::Submission,
//!     notify::{TracingNavigator, TracingNotifier},
//!     page::VerificationPage,
//!     Field,
//! };
//!
//! #[tokio::main]
//! async fn main() -> miette::Result<()> {
//!     let page = VerificationPage::new(
//!         reqwest::Client::new(),
//!         PageConfig::from_env()?,
//!         TracingNotifier,
//!         TracingNavigator,
//!     );
//!
//!     let form = page.form();
//!     form.set_value(Field::Name, "Jane Doe").await;
//!     form.set_value(Field::Contact, "9876543210").await;
//!     form.set_value(Field::Email, "jane@example.com").await;
//!
//!     match page.submit(&form).await? {
//!         Submission::Accepted(redirect) => {
//!             redirect.wait().await.ok();
//!         }
//!         Submission::Invalid(errors) => println!("{errors}"),
//!         Submission::Ignored => {}
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]

/// Verification endpoint client
pub mod client;
pub mod config;
/// Error types for the verification round trip
pub mod error;
pub mod form;
pub mod layout;
pub mod notify;
pub mod page;

pub use error::VerifyError;
pub use smart_support_common::*;
