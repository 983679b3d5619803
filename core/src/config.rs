//! Client configuration.

use std::fmt;
use std::time::Duration;

use url::Url;

use crate::error::{ApiError, Result};

pub const DEFAULT_BASE_URL: &str = "https://api.pipedrive.com/v1";

/// Query parameter carrying the API token.
pub const TOKEN_QUERY_PARAM: &str = "api_token";

/// Header carrying the API token when `TokenPlacement::Header` is selected.
pub const TOKEN_HEADER: &str = "x-api-token";

pub const ENV_API_TOKEN: &str = "PIPEDRIVE_API_TOKEN";
pub const ENV_BASE_URL: &str = "PIPEDRIVE_BASE_URL";

/// Where the API token travels on each request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TokenPlacement {
    #[default]
    QueryParam,
    Header,
}

/// Configuration for `PipedriveClient`.
///
/// # Example
///
/// ```
/// use pipedrive_core::{ClientConfig, TokenPlacement};
/// use std::time::Duration;
///
/// let config = ClientConfig::new("my-token")
///     .with_base_url("https://mycompany.pipedrive.com/api/v1")
///     .with_timeout(Some(Duration::from_secs(10)))
///     .with_token_placement(TokenPlacement::Header);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone)]
pub struct ClientConfig {
    /// Scheme, host and API version prefix, e.g. `https://api.pipedrive.com/v1`.
    pub base_url: String,
    pub api_token: String,
    pub token_placement: TokenPlacement,
    /// Bound on a whole round trip. `None` leaves calls unbounded.
    pub timeout: Option<Duration>,
    pub user_agent: String,
}

impl ClientConfig {
    pub fn new(api_token: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_token: api_token.into(),
            token_placement: TokenPlacement::default(),
            timeout: Some(Duration::from_secs(30)),
            user_agent: format!("pipedrive-core/{} (Rust)", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Read `PIPEDRIVE_API_TOKEN` and, when set, `PIPEDRIVE_BASE_URL`.
    pub fn from_env() -> Result<Self> {
        let token = std::env::var(ENV_API_TOKEN)
            .map_err(|_| ApiError::Config(format!("{ENV_API_TOKEN} is not set")))?;
        let mut config = Self::new(token);
        if let Ok(base_url) = std::env::var(ENV_BASE_URL) {
            config = config.with_base_url(base_url);
        }
        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_token_placement(mut self, placement: TokenPlacement) -> Self {
        self.token_placement = placement;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Reject an empty token or a base URL that does not parse.
    pub fn validate(&self) -> Result<()> {
        if self.api_token.trim().is_empty() {
            return Err(ApiError::Config("API token is empty".to_string()));
        }
        let url = Url::parse(&self.base_url)?;
        if url.cannot_be_a_base() {
            return Err(ApiError::Config(format!(
                "base URL {} cannot carry a path",
                self.base_url
            )));
        }
        Ok(())
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("api_token", &"<redacted>")
            .field("token_placement", &self.token_placement)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ClientConfig::new("token");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.token_placement, TokenPlacement::QueryParam);
        assert_eq!(config.timeout, Some(Duration::from_secs(30)));
        assert!(config.user_agent.starts_with("pipedrive-core/"));
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let config = ClientConfig::new("token").with_base_url("http://localhost:3000/v1/");
        assert_eq!(config.base_url, "http://localhost:3000/v1");
    }

    #[test]
    fn empty_token_is_rejected() {
        let err = ClientConfig::new("  ").validate().unwrap_err();
        assert!(matches!(err, ApiError::Config(_)));
    }

    #[test]
    fn unparsable_base_url_is_rejected() {
        let err = ClientConfig::new("token")
            .with_base_url("not a url")
            .validate()
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidUrl(_)));
    }

    #[test]
    fn debug_redacts_token() {
        let printed = format!("{:?}", ClientConfig::new("super-secret"));
        assert!(!printed.contains("super-secret"));
    }
}
