//! Provider settings sourced from the environment.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `SMACHART_YAHOO_BASE_URL` | `https://query1.finance.yahoo.com` |
//! | `SMACHART_TIMEOUT_MS` | `10000` |
//! | `SMACHART_USER_AGENT` | `smachart/<version>` |

use std::env;

use crate::http_client::DEFAULT_USER_AGENT;

pub const DEFAULT_YAHOO_BASE_URL: &str = "https://query1.finance.yahoo.com";
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YahooConfig {
    pub base_url: String,
    pub timeout_ms: u64,
    pub user_agent: String,
}

impl Default for YahooConfig {
    fn default() -> Self {
        Self {
            base_url: String::from(DEFAULT_YAHOO_BASE_URL),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            user_agent: String::from(DEFAULT_USER_AGENT),
        }
    }
}

impl YahooConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Resolves settings through `lookup`; blank or unparsable values fall
    /// back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let read = |key: &str| lookup(key).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());

        Self {
            base_url: read("SMACHART_YAHOO_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_owned())
                .unwrap_or(defaults.base_url),
            timeout_ms: read("SMACHART_TIMEOUT_MS")
                .and_then(|raw| raw.parse().ok())
                .filter(|ms| *ms > 0)
                .unwrap_or(defaults.timeout_ms),
            user_agent: read("SMACHART_USER_AGENT").unwrap_or(defaults.user_agent),
        }
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
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
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_uses_defaults() {
        assert_eq!(YahooConfig::from_lookup(|_| None), YahooConfig::default());
    }

    #[test]
    fn reads_overrides_and_strips_trailing_slash() {
        let config = YahooConfig::from_lookup(lookup(&[
            ("SMACHART_YAHOO_BASE_URL", "http://127.0.0.1:9000/"),
            ("SMACHART_TIMEOUT_MS", "2500"),
            ("SMACHART_USER_AGENT", "tester/1.0"),
        ]));
        assert_eq!(config.base_url, "http://127.0.0.1:9000");
        assert_eq!(config.timeout_ms, 2_500);
        assert_eq!(config.user_agent, "tester/1.0");
    }

    #[test]
    fn invalid_timeout_falls_back() {
        let config = YahooConfig::from_lookup(lookup(&[("SMACHART_TIMEOUT_MS", "soon")]));
        assert_eq!(config.timeout_ms, DEFAULT_TIMEOUT_MS);
        let config = YahooConfig::from_lookup(lookup(&[("SMACHART_TIMEOUT_MS", "0")]));
        assert_eq!(config.timeout_ms, DEFAULT_TIMEOUT_MS);
    }
}
