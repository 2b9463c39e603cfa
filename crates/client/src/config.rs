//! Client configuration.
//!
//! Defaults target a backend on the developer machine; each value can be
//! overridden from the environment.

use std::time::Duration;

use orderlink_auth::DEFAULT_SERVICE_KEY;

pub const DEFAULT_API_URL: &str = "http://localhost:4000/api";
pub const DEFAULT_CEP_URL: &str = "https://viacep.com.br/ws";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(10_000);

pub const API_URL_ENV: &str = "ORDERLINK_API_URL";
pub const TIMEOUT_ENV: &str = "ORDERLINK_TIMEOUT_MS";
pub const CEP_URL_ENV: &str = "ORDERLINK_CEP_URL";
pub const CREDENTIAL_SERVICE_ENV: &str = "ORDERLINK_CREDENTIAL_SERVICE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL every API path is appended to (no trailing slash needed).
    pub api_url: String,
    /// Ceiling for every outbound request.
    pub timeout: Duration,
    /// ViaCEP-compatible address lookup service.
    pub cep_url: String,
    /// Keychain service the session credential is stored under.
    pub credential_service: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            cep_url: DEFAULT_CEP_URL.to_string(),
            credential_service: DEFAULT_SERVICE_KEY.to_string(),
        }
    }
}

impl ClientConfig {
    /// Defaults overridden by `ORDERLINK_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ClientConfig::from_env`] with an injectable variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        let non_blank = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        if let Some(url) = non_blank(API_URL_ENV) {
            config.api_url = url;
        }
        if let Some(raw) = non_blank(TIMEOUT_ENV) {
            match raw.parse::<u64>() {
                Ok(ms) if ms > 0 => config.timeout = Duration::from_millis(ms),
                _ => tracing::warn!(
                    value = %raw,
                    "{TIMEOUT_ENV} is not a positive number of milliseconds; using default"
                ),
            }
        }
        if let Some(url) = non_blank(CEP_URL_ENV) {
            config.cep_url = url;
        }
        if let Some(service) = non_blank(CREDENTIAL_SERVICE_ENV) {
            config.credential_service = service;
        }
        config
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_cep_url(mut self, cep_url: impl Into<String>) -> Self {
        self.cep_url = cep_url.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_backend_conventions() {
        let config = ClientConfig::default();
        assert_eq!(config.api_url, "http://localhost:4000/api");
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.credential_service, "authToken");
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = ClientConfig::from_lookup(lookup(&[
            (API_URL_ENV, "https://api.orderlink.example/api"),
            (TIMEOUT_ENV, "2500"),
            (CREDENTIAL_SERVICE_ENV, "orderlink.staging"),
        ]));
        assert_eq!(config.api_url, "https://api.orderlink.example/api");
        assert_eq!(config.timeout, Duration::from_millis(2500));
        assert_eq!(config.cep_url, DEFAULT_CEP_URL);
        assert_eq!(config.credential_service, "orderlink.staging");
    }

    #[test]
    fn invalid_or_blank_values_keep_defaults() {
        let config = ClientConfig::from_lookup(lookup(&[
            (API_URL_ENV, "   "),
            (TIMEOUT_ENV, "soon"),
        ]));
        assert_eq!(config, ClientConfig::default());

        let zero = ClientConfig::from_lookup(lookup(&[(TIMEOUT_ENV, "0")]));
        assert_eq!(zero.timeout, DEFAULT_TIMEOUT);
    }
}
