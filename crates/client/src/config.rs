//! Client configuration.
//!
//! A [`ClientConfig`] is built either in code with [`ClientConfig::new`] or
//! from the process environment with [`ClientConfig::from_env`]:
//!
//! | Variable | Required | Meaning |
//! |----------|----------|---------|
//! | `FACT_TOTEM_URL` | yes | Endpoint every request is POSTed to |
//! | `FACT_TOTEM_TOKEN` | yes | Bearer token |
//! | `FACT_TOTEM_TIMEOUT_SECS` | no | Whole-request timeout in seconds |

use std::time::Duration;

use reqwest::header::HeaderValue;
use reqwest::Url;

use crate::error::{FactTotemError, Result};

pub const URL_VAR: &str = "FACT_TOTEM_URL";
pub const TOKEN_VAR: &str = "FACT_TOTEM_TOKEN";
pub const TIMEOUT_VAR: &str = "FACT_TOTEM_TIMEOUT_SECS";

/// Where to send requests and how to authenticate them.
#[derive(Clone)]
pub struct ClientConfig {
    url: Url,
    token: String,
    timeout: Option<Duration>,
}

impl ClientConfig {
    /// Creates a configuration for `url`, authenticating with `token`.
    ///
    /// Fails if `url` does not parse or `token` cannot be carried in an
    /// `Authorization` header.
    pub fn new(url: &str, token: impl Into<String>) -> Result<Self> {
        let url = Url::parse(url).map_err(|e| FactTotemError::Configuration {
            message: format!("invalid fact totem URL '{url}': {e}"),
        })?;
        let token = token.into();
        bearer(&token)?;

        Ok(Self {
            url,
            token,
            timeout: None,
        })
    }

    /// Reads the configuration from `FACT_TOTEM_URL`, `FACT_TOTEM_TOKEN` and
    /// the optional `FACT_TOTEM_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let required = |name: &str| {
            lookup(name).ok_or_else(|| FactTotemError::Configuration {
                message: format!("{name} is not set"),
            })
        };

        let config = Self::new(&required(URL_VAR)?, required(TOKEN_VAR)?)?;

        match lookup(TIMEOUT_VAR) {
            Some(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|_| FactTotemError::Configuration {
                    message: format!("{TIMEOUT_VAR} must be a whole number of seconds, got '{raw}'"),
                })?;
                Ok(config.with_timeout(Duration::from_secs(secs)))
            }
            None => Ok(config),
        }
    }

    /// Bounds every request, connect through body, to `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Replaces the bearer token. Tokens are never rotated automatically.
    pub fn set_token(&mut self, token: impl Into<String>) -> Result<()> {
        let token = token.into();
        bearer(&token)?;
        self.token = token;
        Ok(())
    }

    /// Value of the `Authorization` header.
    pub(crate) fn authorization(&self) -> Result<HeaderValue> {
        bearer(&self.token)
    }
}

fn bearer(token: &str) -> Result<HeaderValue> {
    let mut value = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|e| {
        FactTotemError::Configuration {
            message: format!("token is not a valid header value: {e}"),
        }
    })?;
    value.set_sensitive(true);
    Ok(value)
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("url", &self.url.as_str())
            .field("token", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_new_rejects_bad_url() {
        let err = ClientConfig::new("not a url", "t").unwrap_err();
        assert!(matches!(err, FactTotemError::Configuration { .. }));
    }

    #[test]
    fn test_new_rejects_token_with_newline() {
        assert!(ClientConfig::new("https://totem.example/api", "abc\ndef").is_err());
    }

    #[test]
    fn test_authorization_header() {
        let config = ClientConfig::new("https://totem.example/api", "s3cret").unwrap();
        let header = config.authorization().unwrap();
        assert_eq!(header.to_str().unwrap(), "Bearer s3cret");
        assert!(header.is_sensitive());
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = ClientConfig::new("https://totem.example/api", "s3cret").unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("s3cret"));
        assert!(debug.contains("totem.example"));
    }

    #[test]
    fn test_from_lookup_reads_all_variables() {
        let config = ClientConfig::from_lookup(lookup(&[
            (URL_VAR, "https://totem.example/api"),
            (TOKEN_VAR, "s3cret"),
            (TIMEOUT_VAR, "30"),
        ]))
        .unwrap();

        assert_eq!(config.url().as_str(), "https://totem.example/api");
        assert_eq!(config.token(), "s3cret");
        assert_eq!(config.timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_from_lookup_timeout_is_optional() {
        let config = ClientConfig::from_lookup(lookup(&[
            (URL_VAR, "https://totem.example/api"),
            (TOKEN_VAR, "s3cret"),
        ]))
        .unwrap();
        assert_eq!(config.timeout(), None);
    }

    #[test]
    fn test_from_lookup_missing_token() {
        let err = ClientConfig::from_lookup(lookup(&[(URL_VAR, "https://totem.example/api")]))
            .unwrap_err();
        assert!(err.to_string().contains(TOKEN_VAR));
    }

    #[test]
    fn test_from_lookup_bad_timeout() {
        let err = ClientConfig::from_lookup(lookup(&[
            (URL_VAR, "https://totem.example/api"),
            (TOKEN_VAR, "s3cret"),
            (TIMEOUT_VAR, "soon"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains(TIMEOUT_VAR));
    }

    #[test]
    fn test_set_token() {
        let mut config = ClientConfig::new("https://totem.example/api", "old").unwrap();
        config.set_token("new").unwrap();
        assert_eq!(config.token(), "new");
        assert!(config.set_token("bad\r\n").is_err());
        assert_eq!(config.token(), "new");
    }
}
