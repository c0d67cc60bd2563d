use std::path::PathBuf;

use url::Url;

use crate::error::Error;

/// DriveEasy API client configuration.
///
/// The required field is a constructor parameter — no runtime "missing
/// field" errors.
///
/// ```rust,ignore
/// use driveeasy_client::ApiConfig;
///
/// let config = ApiConfig::new("https://api.driveeasy.example".parse()?);
/// // Optional overrides via chaining:
/// let config = config.with_token_file("/var/lib/driveeasy/token");
/// ```
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct ApiConfig {
    pub(crate) base_url: Url,
    pub(crate) user_agent: String,
    pub(crate) token_file: Option<PathBuf>,
}

impl ApiConfig {
    /// Create a configuration for the backend at `base_url`.
    ///
    /// Server-relative endpoint paths are resolved against `base_url`, so
    /// a path prefix (`https://host/v2`) is honored.
    #[must_use]
    pub fn new(mut base_url: Url) -> Self {
        // A trailing slash makes Url::join treat the last segment as a
        // directory instead of replacing it.
        if !base_url.path().ends_with('/') {
            base_url.set_path(&format!("{}/", base_url.path()));
        }
        Self {
            base_url,
            user_agent: concat!("driveeasy-client/", env!("CARGO_PKG_VERSION")).into(),
            token_file: None,
        }
    }

    /// Create a configuration from environment variables.
    ///
    /// # Required env vars
    /// - `DRIVEEASY_API_URL`: backend base URL
    ///
    /// # Optional env vars
    /// - `DRIVEEASY_TOKEN_FILE`: path for the persisted credential; when
    ///   unset the client keeps credentials in memory only
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if required env vars are missing or the
    /// URL does not parse.
    pub fn from_env() -> Result<Self, Error> {
        let base_url_str = std::env::var("DRIVEEASY_API_URL")
            .map_err(|_| Error::Config("DRIVEEASY_API_URL is required".into()))?;
        let base_url: Url = base_url_str
            .parse()
            .map_err(|e| Error::Config(format!("DRIVEEASY_API_URL: {e}")))?;

        let mut config = Self::new(base_url);
        if let Ok(path) = std::env::var("DRIVEEASY_TOKEN_FILE") {
            config = config.with_token_file(path);
        }
        Ok(config)
    }

    /// Override the `User-Agent` header value.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Persist the bearer credential to this file instead of memory.
    #[must_use]
    pub fn with_token_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.token_file = Some(path.into());
        self
    }

    /// Backend base URL (normalized with a trailing slash).
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `User-Agent` header value.
    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Credential file path, if persistence is configured.
    #[must_use]
    pub fn token_file(&self) -> Option<&std::path::Path> {
        self.token_file.as_deref()
    }

    /// Resolve a server-relative path against the base URL.
    pub(crate) fn endpoint(&self, path: &str) -> Result<Url, Error> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| Error::Config(format!("endpoint path {path:?}: {e}")))
    }
}
