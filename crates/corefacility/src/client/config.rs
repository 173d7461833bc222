use crate::{Error, Result};

use serde::{Deserialize, Deserializer};
use std::time::Duration;
use url::Url;

/// Where and how to reach the backend.
///
/// ```
/// let config = corefacility::Config::from_json(
///     r#"{"base_url": "https://corefacility.example.org/", "token": "e2b1"}"#,
/// )
/// .unwrap();
/// assert_eq!(config.api_prefix, "api/v1/");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub base_url: Url,

    /// Path of the API root below `base_url`.
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,

    #[serde(default)]
    pub token: Option<String>,

    /// Per-request timeout, given in (possibly fractional) seconds as
    /// `timeout_secs`.
    #[serde(
        rename = "timeout_secs",
        default = "default_timeout",
        deserialize_with = "timeout_from_secs"
    )]
    pub timeout: Duration,
}

fn default_api_prefix() -> String {
    "api/v1/".to_owned()
}

fn default_timeout() -> Duration {
    Duration::from_secs(30)
}

fn timeout_from_secs<'de, D>(deserializer: D) -> core::result::Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let secs = f64::deserialize(deserializer)?;
    Duration::try_from_secs_f64(secs).map_err(serde::de::Error::custom)
}

impl Config {
    pub fn new(base_url: &str) -> Result<Config> {
        Ok(Config {
            base_url: Url::parse(base_url)?,
            api_prefix: default_api_prefix(),
            token: None,
            timeout: default_timeout(),
        })
    }

    pub fn from_json(text: &str) -> Result<Config> {
        serde_json::from_str(text)
            .map_err(|err| Error::config(format!("invalid client configuration: {err}")))
    }

    pub fn token(mut self, token: impl Into<String>) -> Config {
        self.token = Some(token.into());
        self
    }

    pub fn api_prefix(mut self, prefix: impl Into<String>) -> Config {
        self.api_prefix = prefix.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Config {
        self.timeout = timeout;
        self
    }

    pub fn request_timeout(&self) -> Duration {
        self.timeout
    }

    /// `base_url` joined with `api_prefix`; always ends with a `/`.
    pub fn api_root(&self) -> Result<Url> {
        if self.timeout.is_zero() {
            return Err(Error::config("the request timeout must be positive"));
        }

        let mut base = self.base_url.clone();
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let prefix = self.api_prefix.trim_start_matches('/');
        let mut root = base.join(prefix)?;
        if !root.path().ends_with('/') {
            let path = format!("{}/", root.path());
            root.set_path(&path);
        }

        Ok(root)
    }
}
