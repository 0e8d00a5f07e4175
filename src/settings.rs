//! Client settings from the environment. `.env` is loaded first when present.

use crate::error::ConfigError;
use std::time::Duration;

/// Base URL of the backend API (e.g. `http://localhost:8080`). Required.
pub const API_URL_ENV: &str = "OGS_API_URL";
/// Optional bearer token used when no session provider is supplied.
pub const API_TOKEN_ENV: &str = "OGS_API_TOKEN";
/// Optional request timeout in seconds. Unset means no timeout.
pub const API_TIMEOUT_ENV: &str = "OGS_API_TIMEOUT_SECS";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientSettings {
    pub base_url: String,
    pub token: Option<String>,
    pub timeout: Option<Duration>,
}

impl ClientSettings {
    pub fn new(base_url: impl Into<String>) -> Self {
        ClientSettings {
            base_url: base_url.into(),
            token: None,
            timeout: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Load `.env` (if any) and read `OGS_API_URL`, `OGS_API_TOKEN`, `OGS_API_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup(API_URL_ENV)
            .filter(|s| !s.trim().is_empty())
            .ok_or(ConfigError::MissingEnv(API_URL_ENV))?;
        let token = lookup(API_TOKEN_ENV).filter(|s| !s.is_empty());
        let timeout = match lookup(API_TIMEOUT_ENV) {
            Some(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|_| {
                    ConfigError::Validation(format!("{} must be a number of seconds, got '{}'", API_TIMEOUT_ENV, raw))
                })?;
                Some(Duration::from_secs(secs))
            }
            None => None,
        };
        Ok(ClientSettings {
            base_url: base_url.trim().to_string(),
            token,
            timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn reads_all_variables() {
        let s = ClientSettings::from_lookup(lookup(&[
            (API_URL_ENV, " http://localhost:8080 "),
            (API_TOKEN_ENV, "abc"),
            (API_TIMEOUT_ENV, "30"),
        ]))
        .unwrap();
        assert_eq!(s.base_url, "http://localhost:8080");
        assert_eq!(s.token.as_deref(), Some("abc"));
        assert_eq!(s.timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn url_is_required() {
        let err = ClientSettings::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnv(API_URL_ENV)));
    }

    #[test]
    fn empty_token_and_missing_timeout_are_none() {
        let s = ClientSettings::from_lookup(lookup(&[(API_URL_ENV, "http://api"), (API_TOKEN_ENV, "")])).unwrap();
        assert_eq!(s.token, None);
        assert_eq!(s.timeout, None);
    }

    #[test]
    fn bad_timeout_is_rejected() {
        let err = ClientSettings::from_lookup(lookup(&[(API_URL_ENV, "http://api"), (API_TIMEOUT_ENV, "soon")])).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }
}
