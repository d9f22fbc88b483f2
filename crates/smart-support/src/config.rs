//! Page configuration: where the backend lives and what happens after success.

use std::sync::LazyLock;
use std::time::Duration;

use bon::Builder;
use smol_str::SmolStr;
use url::Url;

/// Environment variable holding the backend base URL
pub const API_URL_ENV: &str = "SMART_SUPPORT_API_URL";

/// Backend used when nothing is configured
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Route the user lands on after a successful verification
pub const DASHBOARD_ROUTE: &str = "/dashboard";

/// Delay between the success toast and the redirect
pub const REDIRECT_DELAY: Duration = Duration::from_millis(1500);

/// Configuration failures
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum ConfigError {
    /// The configured base URL could not be parsed
    #[error("invalid backend base URL {value:?}: {source}")]
    #[diagnostic(
        code(smart_support::config::base_url),
        help("set SMART_SUPPORT_API_URL to an absolute URL such as http://localhost:8000")
    )]
    BaseUrl {
        /// What was supplied
        value: String,
        /// Why it was rejected
        #[source]
        source: url::ParseError,
    },
}

/// Options for the verification page.
///
/// ```
/// use smart_support::config::PageConfig;
///
/// let config = PageConfig::new()
///     .base_url(url::Url::parse("https://support.example.com/api").unwrap())
///     .build();
/// assert_eq!(config.dashboard_route, "/dashboard");
/// ```
#[derive(Debug, Clone, Builder)]
#[builder(start_fn = new)]
pub struct PageConfig {
    /// Backend base URL; the endpoint path is appended to it
    pub base_url: Url,
    /// How long to wait after the success toast before navigating
    #[builder(default = REDIRECT_DELAY)]
    pub redirect_delay: Duration,
    /// Where to navigate after success
    #[builder(default = SmolStr::new_static(DASHBOARD_ROUTE), into)]
    pub dashboard_route: SmolStr,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self::new().base_url(default_base_url()).build()
    }
}

impl PageConfig {
    /// Read the base URL from [`API_URL_ENV`], falling back to [`DEFAULT_API_URL`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_base_url(std::env::var(API_URL_ENV).ok().as_deref())
    }

    /// Build from an optional raw base URL. Blank counts as absent.
    pub fn from_base_url(raw: Option<&str>) -> Result<Self, ConfigError> {
        let base_url = match raw.map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => parse_base_url(raw)?,
            None => default_base_url(),
        };
        Ok(Self::new().base_url(base_url).build())
    }
}

/// Parse a user-supplied base URL
pub fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    Url::parse(raw).map_err(|source| ConfigError::BaseUrl {
        value: raw.to_owned(),
        source,
    })
}

static DEFAULT_BASE_URL: LazyLock<Url> = LazyLock::new(|| Url::parse(DEFAULT_API_URL).unwrap());

fn default_base_url() -> Url {
    DEFAULT_BASE_URL.clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = PageConfig::default();
        assert_eq!(config.base_url.as_str(), "http://localhost:8000/");
        assert_eq!(config.redirect_delay, Duration::from_millis(1500));
        assert_eq!(config.dashboard_route, "/dashboard");
    }

    #[test]
    fn blank_or_missing_uses_local_default() {
        for raw in [None, Some(""), Some("   ")] {
            let config = PageConfig::from_base_url(raw).unwrap();
            assert_eq!(config.base_url.as_str(), "http://localhost:8000/");
        }
    }

    #[test]
    fn explicit_url_wins() {
        let config = PageConfig::from_base_url(Some(" https://api.example.com/v2 ")).unwrap();
        assert_eq!(config.base_url.as_str(), "https://api.example.com/v2");
    }

    #[test]
    fn garbage_is_an_error() {
        let err = PageConfig::from_base_url(Some("not a url")).unwrap_err();
        assert!(err.to_string().starts_with("invalid backend base URL \"not a url\""));
    }

    #[test]
    fn builder_overrides() {
        let config = PageConfig::new()
            .base_url(Url::parse("http://backend:9000").unwrap())
            .redirect_delay(Duration::ZERO)
            .dashboard_route("/home")
            .build();
        assert_eq!(config.redirect_delay, Duration::ZERO);
        assert_eq!(config.dashboard_route, "/home");
    }
}
