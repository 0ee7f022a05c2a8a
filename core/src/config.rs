//! Adapter configuration, read once at startup.
//!
//! # Design
//! `ApiConfig` is an explicit value handed to `ApiAdapter::new`; nothing in the
//! crate reads the environment after construction. `from_lookup` is the parser
//! behind `from_env` and takes any key lookup so tests never mutate the
//! process environment.

use std::time::Duration;

use crate::error::ApiError;
use crate::retry::RetryPolicy;
use crate::timeout::DEFAULT_TIMEOUT;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/api";
pub const DEFAULT_MOCK_LATENCY: Duration = Duration::from_millis(500);

pub const ENV_USE_MOCK: &str = "MARIO_API_USE_MOCK";
pub const ENV_BASE_URL: &str = "MARIO_API_URL";
pub const ENV_TIMEOUT_MS: &str = "MARIO_API_TIMEOUT_MS";
pub const ENV_MAX_RETRIES: &str = "MARIO_API_MAX_RETRIES";
pub const ENV_RETRY_DELAY_MS: &str = "MARIO_API_RETRY_DELAY_MS";
pub const ENV_LOG: &str = "MARIO_API_LOG";
pub const ENV_MOCK_LATENCY_MS: &str = "MARIO_MOCK_LATENCY_MS";
pub const ENV_MOCK_SEED: &str = "MARIO_MOCK_SEED";

/// Knobs for the in-memory mock client.
#[derive(Debug, Clone, PartialEq)]
pub struct MockConfig {
    /// Simulated network latency applied before every call.
    pub latency: Duration,
    /// Probability that insurance verification reports `verified: false`.
    pub verify_failure_rate: f64,
    /// Probability that a generated time slot is available.
    pub slot_availability: f64,
    /// Fixed RNG seed; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            latency: DEFAULT_MOCK_LATENCY,
            verify_failure_rate: 0.2,
            slot_availability: 0.7,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    pub use_mock: bool,
    pub base_url: String,
    pub timeout: Duration,
    pub retry: RetryPolicy,
    /// Emit request/response log lines. On by default in debug builds.
    pub log_requests: bool,
    pub mock: MockConfig,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            use_mock: false,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            retry: RetryPolicy::default(),
            log_requests: cfg!(debug_assertions),
            mock: MockConfig::default(),
        }
    }
}

impl ApiConfig {
    /// Mock-mode config with default mock settings.
    pub fn mock() -> Self {
        Self {
            use_mock: true,
            ..Self::default()
        }
    }

    /// Real-mode config against `base_url`.
    pub fn real(base_url: &str) -> Self {
        Self {
            use_mock: false,
            base_url: base_url.trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }

    pub fn from_env() -> Result<Self, ApiError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from `lookup`. Unset or empty keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ApiError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut config = Self::default();

        if let Some(v) = get(ENV_USE_MOCK) {
            config.use_mock = parse_bool(ENV_USE_MOCK, &v)?;
        }
        if let Some(v) = get(ENV_BASE_URL) {
            config.base_url = v.trim_end_matches('/').to_string();
        }
        if let Some(v) = get(ENV_TIMEOUT_MS) {
            config.timeout = Duration::from_millis(parse_number(ENV_TIMEOUT_MS, &v)?);
        }
        if let Some(v) = get(ENV_MAX_RETRIES) {
            config.retry.max_retries = parse_number(ENV_MAX_RETRIES, &v)?;
        }
        if let Some(v) = get(ENV_RETRY_DELAY_MS) {
            config.retry.base_delay = Duration::from_millis(parse_number(ENV_RETRY_DELAY_MS, &v)?);
        }
        if let Some(v) = get(ENV_LOG) {
            config.log_requests = parse_bool(ENV_LOG, &v)?;
        }
        if let Some(v) = get(ENV_MOCK_LATENCY_MS) {
            config.mock.latency = Duration::from_millis(parse_number(ENV_MOCK_LATENCY_MS, &v)?);
        }
        if let Some(v) = get(ENV_MOCK_SEED) {
            config.mock.seed = Some(parse_number(ENV_MOCK_SEED, &v)?);
        }

        Ok(config)
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ApiError> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ApiError::Config(format!("{key}: expected a boolean, got {value:?}"))),
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ApiError> {
    value
        .parse()
        .map_err(|_| ApiError::Config(format!("{key}: expected a non-negative integer, got {value:?}")))
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
    fn defaults_when_nothing_is_set() {
        let config = ApiConfig::from_lookup(lookup(&[])).unwrap();
        assert!(!config.use_mock);
        assert_eq!(config.base_url, "http://localhost:3000/api");
        assert_eq!(config.timeout, Duration::from_millis(10_000));
        assert_eq!(config.retry.max_retries, 3);
        assert_eq!(config.retry.base_delay, Duration::from_millis(1_000));
        assert_eq!(config.mock.latency, Duration::from_millis(500));
        assert_eq!(config.mock.seed, None);
    }

    #[test]
    fn every_variable_is_honoured() {
        let config = ApiConfig::from_lookup(lookup(&[
            (ENV_USE_MOCK, "true"),
            (ENV_BASE_URL, "https://api.example.com/v1/"),
            (ENV_TIMEOUT_MS, "2500"),
            (ENV_MAX_RETRIES, "5"),
            (ENV_RETRY_DELAY_MS, "250"),
            (ENV_LOG, "off"),
            (ENV_MOCK_LATENCY_MS, "0"),
            (ENV_MOCK_SEED, "42"),
        ]))
        .unwrap();
        assert!(config.use_mock);
        assert_eq!(config.base_url, "https://api.example.com/v1");
        assert_eq!(config.timeout, Duration::from_millis(2_500));
        assert_eq!(config.retry, RetryPolicy::new(5, Duration::from_millis(250)));
        assert!(!config.log_requests);
        assert_eq!(config.mock.latency, Duration::ZERO);
        assert_eq!(config.mock.seed, Some(42));
    }

    #[test]
    fn empty_values_fall_back_to_defaults() {
        let config =
            ApiConfig::from_lookup(lookup(&[(ENV_BASE_URL, ""), (ENV_TIMEOUT_MS, "  ")])).unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn invalid_number_names_the_variable() {
        let err = ApiConfig::from_lookup(lookup(&[(ENV_MAX_RETRIES, "three")])).unwrap_err();
        assert!(matches!(err, ApiError::Config(ref m) if m.contains(ENV_MAX_RETRIES)));

        let err = ApiConfig::from_lookup(lookup(&[(ENV_TIMEOUT_MS, "-1")])).unwrap_err();
        assert!(matches!(err, ApiError::Config(_)));
    }

    #[test]
    fn mock_flag_accepts_common_spellings() {
        for v in ["1", "yes", "TRUE"] {
            assert!(ApiConfig::from_lookup(lookup(&[(ENV_USE_MOCK, v)])).unwrap().use_mock);
        }
        assert!(!ApiConfig::from_lookup(lookup(&[(ENV_USE_MOCK, "false")])).unwrap().use_mock);
        assert!(ApiConfig::from_lookup(lookup(&[(ENV_USE_MOCK, "maybe")])).is_err());
    }

    #[test]
    fn real_constructor_strips_trailing_slash() {
        let config = ApiConfig::real("http://127.0.0.1:9999/");
        assert!(!config.use_mock);
        assert_eq!(config.base_url, "http://127.0.0.1:9999");
    }
}
