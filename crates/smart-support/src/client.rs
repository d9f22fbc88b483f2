//! # Verification endpoint client
//!
//! Mapping overview:
//! - Success (2xx): body may carry `{"message": ..}`. Empty or non-JSON bodies
//!   are treated as "no message" rather than as a failure.
//! - Anything else: body is read as `{"detail": string | string[]}`. Lists are
//!   joined with `", "`; a missing or unusable detail falls back to
//!   [`FALLBACK_ERROR_MESSAGE`]. Surfaces as [`VerifyError::Rejected`].

use std::error::Error;

use http::{
    HeaderName, HeaderValue, Request,
    header::{ACCEPT, CONTENT_TYPE},
};
use smart_support_common::{
    VerificationInput,
    error::TransportError,
    http_client::HttpClient,
    input::{ErrorBody, VerifyOutput},
};
use url::Url;

use crate::error::{Result, VerifyError};

/// Path of the verification endpoint, relative to the backend base URL
pub const VALIDATE_USERS_PATH: &str = "validate-users";

/// Shown when a failure carries no usable text of its own
pub const FALLBACK_ERROR_MESSAGE: &str = "Verification failed. Please try again.";

const JSON: &str = "application/json";

/// Extension for verification calls on any `HttpClient`.
///
/// Example
/// ```no_run
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use smart_support::client::VerifyExt;
/// use smart_support_common::VerificationInput;
///
/// let http = reqwest::Client::new();
/// let base = url::Url::parse("http://localhost:8000")?;
/// let input = VerificationInput::new("Jane Doe", "9876543210", "jane@example.com")?;
/// let out = http.verification(base).send(&input).await?;
/// println!("{:?}", out.message);
/// # Ok(())
/// # }
/// ```
pub trait VerifyExt: HttpClient {
    /// Start building a verification call against the given backend.
    fn verification<'a>(&'a self, base: Url) -> VerifyCall<'a, Self>
    where
        Self: Sized,
    {
        VerifyCall {
            client: self,
            base,
            extra_headers: Vec::new(),
        }
    }
}

impl<T: HttpClient> VerifyExt for T {}

/// Stateless verification call builder.
pub struct VerifyCall<'a, C: HttpClient> {
    pub(crate) client: &'a C,
    pub(crate) base: Url,
    pub(crate) extra_headers: Vec<(HeaderName, HeaderValue)>,
}

impl<'a, C: HttpClient> VerifyCall<'a, C> {
    /// Add an extra header.
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.extra_headers.push((name, value));
        self
    }

    /// POST the input and map the response.
    #[cfg_attr(feature = "tracing", tracing::instrument(level = "debug", skip_all, fields(base = %self.base)))]
    pub async fn send(self, input: &VerificationInput) -> Result<VerifyOutput> {
        let http_request = build_verify_request(&self.base, input, &self.extra_headers)?;

        let http_response = self
            .client
            .send_http(http_request)
            .await
            .map_err(classify_transport)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(status = %http_response.status(), "verification response");

        process_response(http_response)
    }
}

/// Full URL of the verification endpoint for a base URL.
///
/// Any path prefix on the base is kept: `https://api.example.com/v1/` becomes
/// `https://api.example.com/v1/validate-users`.
pub fn endpoint_url(base: &Url) -> Url {
    let mut url = base.clone();
    let mut path = url.path().trim_end_matches('/').to_owned();
    path.push('/');
    path.push_str(VALIDATE_USERS_PATH);
    url.set_path(&path);
    url.set_query(None);
    url.set_fragment(None);
    url
}

/// Build the HTTP request for a verification call
pub fn build_verify_request(
    base: &Url,
    input: &VerificationInput,
    extra_headers: &[(HeaderName, HeaderValue)],
) -> Result<Request<Vec<u8>>> {
    let url = endpoint_url(base);
    let body = serde_json::to_vec(&input.to_request())?;

    let mut builder = Request::builder()
        .method(http::Method::POST)
        .uri(url.as_str())
        .header(CONTENT_TYPE, JSON)
        .header(ACCEPT, JSON);
    for (name, value) in extra_headers {
        builder = builder.header(name, value);
    }

    builder
        .body(body)
        .map_err(|e| VerifyError::Transport(TransportError::from(e)))
}

/// Map the HTTP response from the backend statelessly.
///
/// Exposed to make things more easily pluggable
#[inline]
pub fn process_response(http_response: http::Response<Vec<u8>>) -> Result<VerifyOutput> {
    let status = http_response.status();
    let body = http_response.into_body();

    if status.is_success() {
        return Ok(parse_success(&body));
    }

    let message = serde_json::from_slice::<ErrorBody>(&body)
        .ok()
        .and_then(|b| b.message())
        .unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.to_owned());

    #[cfg(feature = "tracing")]
    tracing::warn!(status = %status, "verification rejected");

    Err(VerifyError::Rejected { status, message })
}

fn parse_success(body: &[u8]) -> VerifyOutput {
    if body.iter().all(u8::is_ascii_whitespace) {
        return VerifyOutput::default();
    }
    match serde_json::from_slice::<VerifyOutput>(body) {
        Ok(out) => out,
        Err(_e) => {
            #[cfg(feature = "tracing")]
            tracing::debug!(error = %_e, "success body carried no readable message");
            VerifyOutput::default()
        }
    }
}

/// Reqwest errors get their proper classification, anything else is opaque.
fn classify_transport<E>(e: E) -> TransportError
where
    E: Error + Send + Sync + 'static,
{
    let boxed: Box<dyn Error + Send + Sync> = Box::new(e);
    match boxed.downcast::<reqwest::Error>() {
        Ok(e) => TransportError::from(*e),
        Err(other) => TransportError::Other(other),
    }
}
