use crate::wizard::ValidationPolicy;
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::Duration;

/// Runtime settings, read from the environment (a `.env` file is honoured by the binary)
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the listing API, e.g. `http://localhost:5000/api`
    pub api_url: String,
    /// Where the bearer token from `login` is kept
    pub token_path: PathBuf,
    pub http_timeout: Duration,
    pub validation_policy: ValidationPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:5000/api".to_string(),
            token_path: PathBuf::from(".property-upload/token"),
            http_timeout: Duration::from_secs(30),
            validation_policy: ValidationPolicy::Lenient,
        }
    }
}

impl Config {
    pub fn init() -> Result<Config> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset keys fall back to defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let api_url = lookup("API_URL").unwrap_or(defaults.api_url);
        let token_path = lookup("TOKEN_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.token_path);

        let http_timeout = match lookup("HTTP_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(
                raw.trim()
                    .parse::<u64>()
                    .with_context(|| format!("HTTP_TIMEOUT_SECS must be a number, got '{}'", raw))?,
            ),
            None => defaults.http_timeout,
        };

        let validation_policy = match lookup("STRICT_STEP1").as_deref().map(str::trim) {
            Some("1") | Some("true") | Some("TRUE") | Some("yes") => ValidationPolicy::Strict,
            _ => defaults.validation_policy,
        };

        Ok(Config {
            api_url,
            token_path,
            http_timeout,
            validation_policy,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = Config::from_lookup(|_| None).unwrap();
        assert_eq!(config.api_url, "http://localhost:5000/api");
        assert_eq!(config.http_timeout, Duration::from_secs(30));
        assert_eq!(config.validation_policy, ValidationPolicy::Lenient);
    }

    #[test]
    fn reads_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("API_URL", "https://api.example.com"),
            ("TOKEN_PATH", "/tmp/token"),
            ("HTTP_TIMEOUT_SECS", "5"),
            ("STRICT_STEP1", "true"),
        ]))
        .unwrap();

        assert_eq!(config.api_url, "https://api.example.com");
        assert_eq!(config.token_path, PathBuf::from("/tmp/token"));
        assert_eq!(config.http_timeout, Duration::from_secs(5));
        assert_eq!(config.validation_policy, ValidationPolicy::Strict);
    }

    #[test]
    fn rejects_bad_timeout() {
        let err = Config::from_lookup(lookup_from(&[("HTTP_TIMEOUT_SECS", "soon")])).unwrap_err();
        assert!(err.to_string().contains("HTTP_TIMEOUT_SECS"));
    }
}
