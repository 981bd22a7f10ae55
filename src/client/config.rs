use std::time::Duration;

use crate::error::{ChartError, ChartResult};

pub const DEFAULT_BASE_URL: &str = "https://api.datawrapper.de";
pub const CHARTS_PATH: &str = "/v3/charts";
pub const ACCESS_TOKEN_ENV: &str = "DATAWRAPPER_ACCESS_TOKEN";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Connection settings for [`super::DatawrapperClient`].
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub access_token: String,
    pub timeout: Duration,
}

impl ClientConfig {
    #[must_use]
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            access_token: access_token.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Reads the token from `DATAWRAPPER_ACCESS_TOKEN`.
    pub fn from_env() -> ChartResult<Self> {
        let token = std::env::var(ACCESS_TOKEN_ENV).map_err(|_| {
            ChartError::Validation(format!(
                "no access token provided and `{ACCESS_TOKEN_ENV}` is not set"
            ))
        })?;
        let config = Self::new(token);
        config.validate()?;
        Ok(config)
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.access_token.trim().is_empty() {
            return Err(ChartError::Validation(
                "access token must not be empty".to_owned(),
            ));
        }
        if self.base_url.trim().is_empty() {
            return Err(ChartError::Validation("base url must not be empty".to_owned()));
        }
        if self.timeout.is_zero() {
            return Err(ChartError::Validation("timeout must be positive".to_owned()));
        }
        Ok(())
    }

    /// `base_url` joined with an absolute API path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url.trim_end_matches('/'))
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("access_token", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}
