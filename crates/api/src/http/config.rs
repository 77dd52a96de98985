use std::env;
use std::time::Duration;

use url::Url;

use crate::repository::ApiError;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Connection settings for the REST backend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: Url,
    api_token: Option<String>,
    timeout: Duration,
}

impl ApiConfig {
    /// # Errors
    ///
    /// Returns `ApiError::InvalidConfig` unless `base_url` is an absolute http(s) URL.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let mut parsed = Url::parse(base_url.trim())
            .map_err(|e| ApiError::InvalidConfig(format!("{base_url}: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ApiError::InvalidConfig(format!(
                "{base_url}: scheme must be http or https"
            )));
        }
        // Keep a trailing slash so relative joins stay under the API prefix.
        if !parsed.path().ends_with('/') {
            let path = format!("{}/", parsed.path());
            parsed.set_path(&path);
        }
        Ok(Self {
            base_url: parsed,
            api_token: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        })
    }

    /// Read `QUIZDECK_API_URL`, `QUIZDECK_API_TOKEN` and `QUIZDECK_API_TIMEOUT_SECS`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidConfig` for a malformed URL or timeout.
    pub fn from_env() -> Result<Self, ApiError> {
        let base_url = env::var("QUIZDECK_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.into());
        let mut config = Self::new(&base_url)?;
        if let Ok(token) = env::var("QUIZDECK_API_TOKEN") {
            config = config.with_token(token);
        }
        if let Ok(raw) = env::var("QUIZDECK_API_TIMEOUT_SECS") {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                ApiError::InvalidConfig(format!("QUIZDECK_API_TIMEOUT_SECS: {raw:?}"))
            })?;
            config = config.with_timeout(Duration::from_secs(secs.max(1)));
        }
        Ok(config)
    }

    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        let token = token.into();
        self.api_token = (!token.trim().is_empty()).then(|| token.trim().to_string());
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    #[must_use]
    pub fn api_token(&self) -> Option<&str> {
        self.api_token.as_deref()
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Resolve an endpoint path (without leading slash) against the base URL.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidConfig` if the joined URL is invalid.
    pub fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ApiError::InvalidConfig(format!("{path}: {e}")))
    }
}
