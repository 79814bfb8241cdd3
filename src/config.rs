use anyhow::{Context, Result};
use std::time::Duration;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8050;
pub const DEFAULT_DETOXIFY_TIMEOUT_SECS: u64 = 30;

/// Runtime settings, read from the environment (and `.env`, if present).
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Base URL of a Detoxify-compatible service. `None` selects the
    /// built-in lexicon model.
    pub detoxify_url: Option<String>,
    pub detoxify_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            detoxify_url: None,
            detoxify_timeout: Duration::from_secs(DEFAULT_DETOXIFY_TIMEOUT_SECS),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        // Treat empty values the same as unset ones
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let port = match get("TOXIBOARD_PORT") {
            Some(v) => v
                .parse()
                .with_context(|| format!("TOXIBOARD_PORT must be a port number, got {:?}", v))?,
            None => defaults.port,
        };

        let detoxify_timeout = match get("DETOXIFY_TIMEOUT_SECS") {
            Some(v) => Duration::from_secs(v.parse().with_context(|| {
                format!("DETOXIFY_TIMEOUT_SECS must be a whole number of seconds, got {:?}", v)
            })?),
            None => defaults.detoxify_timeout,
        };

        Ok(Self {
            host: get("TOXIBOARD_HOST").unwrap_or(defaults.host),
            port,
            detoxify_url: get("DETOXIFY_URL"),
            detoxify_timeout,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.bind_addr(), "0.0.0.0:8050");
        assert!(config.detoxify_url.is_none());
    }

    #[test]
    fn reads_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("TOXIBOARD_HOST", "127.0.0.1"),
            ("TOXIBOARD_PORT", "9000"),
            ("DETOXIFY_URL", "http://localhost:5000"),
            ("DETOXIFY_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr(), "127.0.0.1:9000");
        assert_eq!(config.detoxify_url.as_deref(), Some("http://localhost:5000"));
        assert_eq!(config.detoxify_timeout, Duration::from_secs(5));
    }

    #[test]
    fn blank_values_count_as_unset() {
        let config =
            Config::from_lookup(lookup(&[("DETOXIFY_URL", "  "), ("TOXIBOARD_PORT", "")])).unwrap();
        assert!(config.detoxify_url.is_none());
        assert_eq!(config.port, DEFAULT_PORT);
    }

    #[test]
    fn rejects_bad_port() {
        let err = Config::from_lookup(lookup(&[("TOXIBOARD_PORT", "eighty")])).unwrap_err();
        assert!(err.to_string().contains("TOXIBOARD_PORT"));

        assert!(Config::from_lookup(lookup(&[("TOXIBOARD_PORT", "70000")])).is_err());
    }

    #[test]
    fn rejects_bad_timeout() {
        let err = Config::from_lookup(lookup(&[("DETOXIFY_TIMEOUT_SECS", "-1")])).unwrap_err();
        assert!(err.to_string().contains("DETOXIFY_TIMEOUT_SECS"));
    }
}
