use std::env;
use std::time::Duration;

use crate::error::{Result, VoteError};

const DEFAULT_SERVER_URL: &str = "http://localhost:8080";
const DEFAULT_PULSE_DELAY_MS: u64 = 50; // Long enough for the reset styles to be observed

/// Knobs for wiring the widget onto a page and a server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetConfig {
    pub server_url: String,
    pub vote_path: String,
    pub button_selector: String,
    pub data_key: String,
    pub counter_prefix: String,
    pub pulse_delay: Duration,
    pub request_timeout: Option<Duration>,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            vote_path: "/vote".to_string(),
            button_selector: ".vote-button".to_string(),
            data_key: "company".to_string(),
            counter_prefix: "count-".to_string(),
            pulse_delay: Duration::from_millis(DEFAULT_PULSE_DELAY_MS),
            request_timeout: None,
        }
    }
}

impl WidgetConfig {
    /// Defaults overridden by `VOTE_SERVER_URL`, `VOTE_PULSE_DELAY_MS` and
    /// `VOTE_REQUEST_TIMEOUT_MS`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup("VOTE_SERVER_URL") {
            let url = url.trim().trim_end_matches('/').to_string();
            if url.is_empty() {
                return Err(VoteError::Config("VOTE_SERVER_URL is empty".to_string()));
            }
            config.server_url = url;
        }

        if let Some(raw) = lookup("VOTE_PULSE_DELAY_MS") {
            config.pulse_delay = Duration::from_millis(parse_millis("VOTE_PULSE_DELAY_MS", &raw)?);
        }

        if let Some(raw) = lookup("VOTE_REQUEST_TIMEOUT_MS") {
            let millis = parse_millis("VOTE_REQUEST_TIMEOUT_MS", &raw)?;
            // 0 keeps the browser-like behaviour of waiting forever
            config.request_timeout = (millis > 0).then(|| Duration::from_millis(millis));
        }

        Ok(config)
    }
}

fn parse_millis(key: &str, raw: &str) -> Result<u64> {
    raw.trim()
        .parse::<u64>()
        .map_err(|e| VoteError::Config(format!("{} must be milliseconds, got '{}': {}", key, raw, e)))
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
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_page_contract() {
        let config = WidgetConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, WidgetConfig::default());
        assert_eq!(config.vote_path, "/vote");
        assert_eq!(config.button_selector, ".vote-button");
        assert_eq!(config.counter_prefix, "count-");
        assert_eq!(config.pulse_delay, Duration::from_millis(50));
        assert!(config.request_timeout.is_none());
    }

    #[test]
    fn env_overrides_are_applied() {
        let config = WidgetConfig::from_lookup(lookup_from(&[
            ("VOTE_SERVER_URL", "http://votes.internal:9000/"),
            ("VOTE_PULSE_DELAY_MS", "10"),
            ("VOTE_REQUEST_TIMEOUT_MS", "2500"),
        ]))
        .unwrap();

        assert_eq!(config.server_url, "http://votes.internal:9000");
        assert_eq!(config.pulse_delay, Duration::from_millis(10));
        assert_eq!(config.request_timeout, Some(Duration::from_millis(2500)));
    }

    #[test]
    fn zero_timeout_means_none() {
        let config =
            WidgetConfig::from_lookup(lookup_from(&[("VOTE_REQUEST_TIMEOUT_MS", "0")])).unwrap();
        assert!(config.request_timeout.is_none());
    }

    #[test]
    fn bad_numbers_are_config_errors() {
        let err = WidgetConfig::from_lookup(lookup_from(&[("VOTE_PULSE_DELAY_MS", "soon")]))
            .unwrap_err();
        assert!(matches!(err, VoteError::Config(_)));
    }

    #[test]
    fn empty_server_url_is_rejected() {
        let err = WidgetConfig::from_lookup(lookup_from(&[("VOTE_SERVER_URL", "  ")])).unwrap_err();
        assert!(matches!(err, VoteError::Config(_)));
    }
}
