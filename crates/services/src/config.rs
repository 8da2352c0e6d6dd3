use std::env;

use chrono::Duration;
use url::Url;

use crate::error::ConfigError;

pub const DEFAULT_API_URL: &str = "http://localhost:8001";
pub const DEFAULT_SESSION_TTL_DAYS: i64 = 7;
pub const MAX_SESSION_TTL_DAYS: i64 = 3650;

/// Where the backend lives and how long an exchanged session is trusted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: Url,
    session_ttl: Duration,
}

impl ApiConfig {
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidBaseUrl` unless `base_url` is an absolute
    /// http(s) URL.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        let invalid = |reason: &str| ConfigError::InvalidBaseUrl {
            value: base_url.to_owned(),
            reason: reason.to_owned(),
        };
        let url = Url::parse(base_url.trim()).map_err(|err| invalid(&err.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid("scheme must be http or https"));
        }
        if url.cannot_be_a_base() || url.host_str().is_none() {
            return Err(invalid("missing host"));
        }
        Ok(Self {
            base_url: url,
            session_ttl: Duration::days(DEFAULT_SESSION_TTL_DAYS),
        })
    }

    /// Read `DATAPATH_API_URL` and `DATAPATH_SESSION_TTL_DAYS`, falling back
    /// to the local development backend and a seven day session.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if either variable holds an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = env::var("DATAPATH_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.into());
        let config = Self::new(&base_url)?;
        match env::var("DATAPATH_SESSION_TTL_DAYS") {
            Ok(raw) => {
                let days = raw
                    .trim()
                    .parse::<i64>()
                    .map_err(|_| ConfigError::InvalidSessionTtl(raw.clone()))?;
                config.with_session_ttl_days(days)
            }
            Err(_) => Ok(config),
        }
    }

    /// # Errors
    ///
    /// Returns `ConfigError::InvalidSessionTtl` for lifetimes under one day
    /// or over [`MAX_SESSION_TTL_DAYS`].
    pub fn with_session_ttl_days(mut self, days: i64) -> Result<Self, ConfigError> {
        if !(1..=MAX_SESSION_TTL_DAYS).contains(&days) {
            return Err(ConfigError::InvalidSessionTtl(days.to_string()));
        }
        self.session_ttl = Duration::try_days(days)
            .ok_or_else(|| ConfigError::InvalidSessionTtl(days.to_string()))?;
        Ok(self)
    }

    /// Point at a different backend, keeping the session lifetime.
    ///
    /// # Errors
    ///
    /// Same as [`ApiConfig::new`].
    pub fn with_base_url(self, base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            session_ttl: self.session_ttl,
            ..Self::new(base_url)?
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    #[must_use]
    pub fn session_ttl(&self) -> Duration {
        self.session_ttl
    }

    /// Absolute URL of an `/api/...` endpoint.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/api/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
