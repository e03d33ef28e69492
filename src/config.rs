// src/config.rs
use std::{net::SocketAddr, time::Duration};

use reqwest::Url;

use crate::error::ConfigError;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000/chat";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
pub const DEFAULT_SESSION_TTL_SECS: u64 = 1800;

pub const GREETING: &str =
    "Hi! I'm your Roadies expert. Looking for a high-safety helmet, jacket, or gloves today?";
pub const INITIAL_SUGGESTIONS: [&str; 3] =
    ["Helmets under 5000", "Mesh riding jackets", "Leather gloves"];
pub const FALLBACK_SUGGESTIONS: [&str; 2] = ["Try again", "Show helmets"];

/// Settings for the embeddable conversation controller.
#[derive(Debug, Clone)]
pub struct WidgetConfig {
    pub api_url: String,
    /// No timeout when `None`; the call settles when the backend does.
    pub request_timeout: Option<Duration>,
    pub greeting: String,
    pub initial_suggestions: Vec<String>,
    pub fallback_suggestions: Vec<String>,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout: None,
            greeting: GREETING.to_string(),
            initial_suggestions: INITIAL_SUGGESTIONS.iter().map(|s| s.to_string()).collect(),
            fallback_suggestions: FALLBACK_SUGGESTIONS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl WidgetConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(url) = lookup("ROADIES_API_URL") {
            config.api_url = parse_url("ROADIES_API_URL", &url)?;
        }
        if let Some(secs) = lookup("ROADIES_REQUEST_TIMEOUT_SECS") {
            let secs = parse_u64("ROADIES_REQUEST_TIMEOUT_SECS", &secs)?;
            config.request_timeout = Some(Duration::from_secs(secs));
        }
        Ok(config)
    }

    /// The apology shown when the backend could not be reached.
    pub fn failure_text(&self) -> String {
        format!(
            "Sorry, I'm having trouble connecting to the garage at {}. Please try again.",
            self.api_url
        )
    }
}

/// Settings for the reference chat backend server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub session_ttl: Duration,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let addr = lookup("ROADIES_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = addr.parse().map_err(|_| ConfigError::InvalidAddr {
            key: "ROADIES_BIND_ADDR",
            value: addr.clone(),
        })?;

        let ttl = match lookup("ROADIES_SESSION_TTL_SECS") {
            Some(v) => parse_u64("ROADIES_SESSION_TTL_SECS", &v)?,
            None => DEFAULT_SESSION_TTL_SECS,
        };

        Ok(Self { bind_addr, session_ttl: Duration::from_secs(ttl) })
    }
}

fn parse_u64(key: &'static str, value: &str) -> Result<u64, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidNumber { key, value: value.to_string() })
}

fn parse_url(key: &'static str, value: &str) -> Result<String, ConfigError> {
    match Url::parse(value.trim()) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(value.trim().to_string()),
        _ => Err(ConfigError::InvalidUrl { key, value: value.to_string() }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn widget_defaults() {
        let config = WidgetConfig::from_lookup(env(&[])).unwrap();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert!(config.request_timeout.is_none());
        assert_eq!(config.initial_suggestions.len(), 3);
        assert!(config.failure_text().contains(DEFAULT_API_URL));
    }

    #[test]
    fn widget_overrides_and_validation() {
        let config = WidgetConfig::from_lookup(env(&[
            ("ROADIES_API_URL", "https://shop.example/chat"),
            ("ROADIES_REQUEST_TIMEOUT_SECS", "15"),
        ]))
        .unwrap();
        assert_eq!(config.api_url, "https://shop.example/chat");
        assert_eq!(config.request_timeout, Some(Duration::from_secs(15)));

        assert!(WidgetConfig::from_lookup(env(&[("ROADIES_API_URL", "ftp://x")])).is_err());
        assert!(
            WidgetConfig::from_lookup(env(&[("ROADIES_REQUEST_TIMEOUT_SECS", "soon")])).is_err()
        );
    }

    #[test]
    fn server_config() {
        let config = ServerConfig::from_lookup(env(&[])).unwrap();
        assert_eq!(config.bind_addr.port(), 8000);
        assert_eq!(config.session_ttl, Duration::from_secs(DEFAULT_SESSION_TTL_SECS));

        assert!(ServerConfig::from_lookup(env(&[("ROADIES_BIND_ADDR", "nowhere")])).is_err());
    }
}
