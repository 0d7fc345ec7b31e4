//! Client configuration: where the Observation Database lives and which credential to send.
//!
//! A [`ClientConfig`] is either built explicitly or read from the environment:
//!
//! * `OBSDB_KEY`: the pre-issued API key (required).
//! * `OBSDB_URL`: an alternative base URL (optional).

pub mod error;

use crate::config::error::ConfigError;
use bon::bon;
use reqwest::header::HeaderValue;
use std::fmt;
use std::time::Duration;

/// Dataset listing endpoint of the SAEON Observation Database API.
pub const DEFAULT_BASE_URL: &str = "https://observationsapi.saeon.ac.za/Api/Datasets";
/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "OBSDB_KEY";
/// Environment variable overriding [`DEFAULT_BASE_URL`].
pub const BASE_URL_ENV: &str = "OBSDB_URL";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Settings for an [`crate::ObservationClient`].
///
/// The API key is validated on construction, so a `ClientConfig` always carries a
/// usable credential.
#[derive(Clone)]
pub struct ClientConfig {
    /// Dataset listing URL, without a trailing slash.
    pub base_url: String,
    /// Bearer token sent with every request.
    pub api_key: String,
    /// Per-request timeout applied by the default transport.
    pub timeout: Duration,
    /// `User-Agent` sent by the default transport.
    pub user_agent: String,
}

#[bon]
impl ClientConfig {
    /// Creates a configuration from an explicit API key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyCredential`] if `api_key` is empty or only whitespace,
    /// and [`ConfigError::InvalidCredential`] if it contains characters that cannot be
    /// sent in an HTTP header.
    ///
    /// # Examples
    ///
    /// ```
    /// use saeon_obs::ClientConfig;
    /// use std::time::Duration;
    ///
    /// let config = ClientConfig::builder()
    ///     .api_key("my-token")
    ///     .timeout(Duration::from_secs(10))
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(config.base_url, saeon_obs::DEFAULT_BASE_URL);
    /// ```
    #[builder]
    pub fn new(
        #[builder(into)] api_key: String,
        #[builder(into)] base_url: Option<String>,
        timeout: Option<Duration>,
        #[builder(into)] user_agent: Option<String>,
    ) -> Result<Self, ConfigError> {
        let api_key = api_key.trim().to_string();
        if api_key.is_empty() {
            return Err(ConfigError::EmptyCredential);
        }

        let config = Self {
            base_url: base_url
                .as_deref()
                .unwrap_or(DEFAULT_BASE_URL)
                .trim_end_matches('/')
                .to_string(),
            api_key,
            timeout: timeout.unwrap_or(DEFAULT_TIMEOUT),
            user_agent: user_agent
                .unwrap_or_else(|| format!("saeon-obs-rs/{}", env!("CARGO_PKG_VERSION"))),
        };
        config.authorization()?;
        Ok(config)
    }

    /// Reads the configuration from `OBSDB_KEY` and, if set, `OBSDB_URL`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingCredential`] if `OBSDB_KEY` is not set, and the
    /// errors of [`ClientConfig::builder`] otherwise.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let api_key = lookup(API_KEY_ENV).ok_or_else(|| ConfigError::MissingCredential {
            variable: API_KEY_ENV.to_string(),
        })?;
        let base_url = lookup(BASE_URL_ENV).filter(|url| !url.trim().is_empty());

        Self::builder()
            .api_key(api_key)
            .maybe_base_url(base_url)
            .build()
    }

    /// The `Authorization` header value, `Bearer <api_key>`, flagged as sensitive.
    pub(crate) fn authorization(&self) -> Result<HeaderValue, ConfigError> {
        let mut value = HeaderValue::from_str(&format!("Bearer {}", self.api_key))
            .map_err(ConfigError::InvalidCredential)?;
        value.set_sensitive(true);
        Ok(value)
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}
