//! The verification page: wires forms to the backend and owns post-submit UX.

use std::sync::Arc;
use std::time::Duration;

use smart_support_common::{VerificationInput, http_client::HttpClient};
use smol_str::SmolStr;
use tokio::task::{JoinError, JoinHandle};

use crate::client::VerifyExt;
use crate::config::PageConfig;
use crate::error::VerifyError;
use crate::form::{LoadingFlag, Submission, VerificationForm};
use crate::notify::{Navigator, Notifier, Toast};

/// Toast title after a successful verification
pub const VERIFIED_TITLE: &str = "Identity Verified";
/// Toast body when the backend sends no message of its own
pub const DEFAULT_WELCOME: &str = "Welcome to Smart Support. Redirecting to dashboard...";
/// Toast title after a failed verification
pub const FAILED_TITLE: &str = "Verification Failed";

/// A navigation scheduled after a successful verification.
#[derive(Debug)]
pub struct Redirect {
    route: SmolStr,
    delay: Duration,
    handle: JoinHandle<()>,
}

impl Redirect {
    /// Where the user will be sent
    pub fn route(&self) -> &str {
        &self.route
    }

    /// How long after the success toast the navigation fires
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Whether the navigation already happened
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the navigation to happen
    pub async fn wait(self) -> Result<(), JoinError> {
        self.handle.await
    }

    /// Call the navigation off, if it has not fired yet
    pub fn cancel(self) {
        self.handle.abort();
    }
}

/// Page container for the identity verification flow.
///
/// Holds the page-level `submitting` flag; every form obtained from
/// [`form`](Self::form) sees it as external loading state.
pub struct VerificationPage<C, N, R> {
    http: C,
    config: PageConfig,
    notifier: N,
    navigator: Arc<R>,
    submitting: LoadingFlag,
}

impl<C, N, R> VerificationPage<C, N, R>
where
    C: HttpClient,
    N: Notifier,
    R: Navigator + 'static,
{
    /// Create a page talking to the backend in `config`
    pub fn new(http: C, config: PageConfig, notifier: N, navigator: R) -> Self {
        #[cfg(feature = "tracing")]
        tracing::info!(
            base_url = %config.base_url,
            redirect_ms = config.redirect_delay.as_millis() as u64,
            "verification page created"
        );

        Self {
            http,
            config,
            notifier,
            navigator: Arc::new(navigator),
            submitting: LoadingFlag::default(),
        }
    }

    /// Page configuration
    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    /// True while a round trip to the backend is outstanding
    pub fn is_submitting(&self) -> bool {
        self.submitting.get()
    }

    /// A new form bound to this page's loading state
    pub fn form(&self) -> VerificationForm {
        VerificationForm::with_loading(self.submitting.clone())
    }

    /// Submit `form`, with this page's verification call as the callback
    pub async fn submit(
        &self,
        form: &VerificationForm,
    ) -> Result<Submission<Redirect>, VerifyError> {
        form.submit(|input| self.handle_verify(input)).await
    }

    /// The submit callback: verify `input` with the backend.
    ///
    /// On success shows the welcome toast and schedules the redirect. On failure
    /// shows an error toast and returns the error, whose text is what the form
    /// puts in its banner. The `submitting` flag is cleared however this ends.
    #[cfg_attr(feature = "tracing", tracing::instrument(level = "debug", skip_all))]
    pub async fn handle_verify(&self, input: VerificationInput) -> Result<Redirect, VerifyError> {
        let _submitting = self.submitting.hold();

        let result = self
            .http
            .verification(self.config.base_url.clone())
            .send(&input)
            .await;

        match result {
            Ok(output) => {
                #[cfg(feature = "tracing")]
                tracing::info!(custom_message = output.message.is_some(), "identity verified");

                let description = output
                    .message
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_WELCOME.to_owned());
                self.notifier.notify(Toast::new(VERIFIED_TITLE, description));
                Ok(self.schedule_redirect())
            }
            Err(e) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(status = ?e.status(), error = %e, "identity verification failed");

                self.notifier
                    .notify(Toast::destructive(FAILED_TITLE, e.to_string()));
                Err(e)
            }
        }
    }

    fn schedule_redirect(&self) -> Redirect {
        let route = self.config.dashboard_route.clone();
        let delay = self.config.redirect_delay;
        let navigator = self.navigator.clone();
        let target = route.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            navigator.navigate(&target);
        });
        Redirect {
            route,
            delay,
            handle,
        }
    }
}
