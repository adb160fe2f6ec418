use std::{env, fmt, time::Duration};

use crate::feed::ChannelSettings;

pub const DEFAULT_API_BASE_URL: &str = "https://api.podme.com/web/api/v2";
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_CACHE_MAX_AGE: u32 = 43_200;
pub const DEFAULT_DENIAL_STATUS: u16 = 300;

#[derive(Debug, PartialEq, Eq)]
pub struct ConfigError {
    pub key: &'static str,
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid {}: {}", self.key, self.message)
    }
}

impl std::error::Error for ConfigError {}

/// Process-wide settings, read once at startup and shared read-only.
#[derive(Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Bearer token for the PodMe API. `None` means requests go out unauthenticated.
    pub podme_token: Option<String>,
    /// Shared secret for inbound requests. `None` denies every request.
    pub secret: Option<String>,
    pub api_base_url: String,
    /// `s-maxage` for successful feed responses; `None` omits Cache-Control.
    pub cache_max_age: Option<u32>,
    pub denial_status: u16,
    pub upstream_timeout: Option<Duration>,
    pub channel: ChannelSettings,
}

// Secrets stay out of Debug output so the config can be logged safely.
impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("podme_token", &self.podme_token.as_ref().map(|_| "<set>"))
            .field("secret", &self.secret.as_ref().map(|_| "<set>"))
            .field("api_base_url", &self.api_base_url)
            .field("cache_max_age", &self.cache_max_age)
            .field("denial_status", &self.denial_status)
            .field("upstream_timeout", &self.upstream_timeout)
            .field("channel", &self.channel)
            .finish()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            podme_token: None,
            secret: None,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            cache_max_age: Some(DEFAULT_CACHE_MAX_AGE),
            denial_status: DEFAULT_DENIAL_STATUS,
            upstream_timeout: None,
            channel: ChannelSettings::default(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = AppConfig::default();

        if let Some(host) = get("PODME_RSS_HOST") {
            log::info!("Using host from PODME_RSS_HOST: {}", host);
            config.host = host;
        }
        if let Some(port) = get("PODME_RSS_PORT") {
            config.port = parse_number("PODME_RSS_PORT", &port)?;
            log::info!("Using port from PODME_RSS_PORT: {}", config.port);
        }

        config.podme_token = get("PODME_TOKEN");
        config.secret = get("SECRET");
        if config.podme_token.is_none() {
            log::warn!("PODME_TOKEN is not set, upstream requests will be unauthenticated");
        }
        if config.secret.is_none() {
            log::warn!("SECRET is not set, every feed request will be denied");
        }

        if let Some(base) = get("PODME_API_BASE_URL") {
            url::Url::parse(&base).map_err(|e| ConfigError {
                key: "PODME_API_BASE_URL",
                message: e.to_string(),
            })?;
            log::info!("Using upstream base URL from PODME_API_BASE_URL: {}", base);
            config.api_base_url = base;
        }

        if let Some(max_age) = get("PODME_RSS_CACHE_MAX_AGE") {
            let seconds: u32 = parse_number("PODME_RSS_CACHE_MAX_AGE", &max_age)?;
            config.cache_max_age = (seconds > 0).then_some(seconds);
        }

        if let Some(status) = get("PODME_RSS_DENIAL_STATUS") {
            let code: u16 = parse_number("PODME_RSS_DENIAL_STATUS", &status)?;
            if !(100..=599).contains(&code) {
                return Err(ConfigError {
                    key: "PODME_RSS_DENIAL_STATUS",
                    message: format!("{} is not an HTTP status code", code),
                });
            }
            config.denial_status = code;
        }

        if let Some(timeout) = get("PODME_RSS_UPSTREAM_TIMEOUT_SECS") {
            let seconds: u64 = parse_number("PODME_RSS_UPSTREAM_TIMEOUT_SECS", &timeout)?;
            config.upstream_timeout = (seconds > 0).then(|| Duration::from_secs(seconds));
        }

        if let Some(feed_url) = get("PODME_RSS_FEED_URL") {
            config.channel.feed_url = feed_url;
        }
        if let Some(site_url) = get("PODME_RSS_SITE_URL") {
            config.channel.site_url = site_url;
        }
        if let Some(email) = get("PODME_RSS_OWNER_EMAIL") {
            config.channel.owner_email = email;
        }
        if let Some(language) = get("PODME_RSS_LANGUAGE") {
            config.channel.language = language;
        }
        config.channel.validate()?;

        Ok(config)
    }

    /// `Some(value)` for the Cache-Control header of a successful feed.
    pub fn cache_control(&self) -> Option<String> {
        self.cache_max_age.map(|secs| format!("s-maxage={}", secs))
    }

    pub fn is_ready(&self) -> bool {
        self.podme_token.is_some() && self.secret.is_some()
    }
}

fn parse_number<T>(key: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: fmt::Display,
{
    value.trim().parse::<T>().map_err(|e| ConfigError {
        key,
        message: format!("'{}': {}", value, e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_environment_is_empty() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.cache_control().as_deref(), Some("s-maxage=43200"));
        assert_eq!(config.denial_status, 300);
        assert!(config.secret.is_none());
        assert!(config.upstream_timeout.is_none());
        assert!(!config.is_ready());
    }

    #[test]
    fn test_reads_secrets_and_overrides() {
        let config = AppConfig::from_lookup(lookup(&[
            ("PODME_TOKEN", "tok"),
            ("SECRET", "s3cret"),
            ("PODME_RSS_PORT", "9000"),
            ("PODME_RSS_CACHE_MAX_AGE", "60"),
            ("PODME_RSS_DENIAL_STATUS", "403"),
            ("PODME_RSS_UPSTREAM_TIMEOUT_SECS", "15"),
            ("PODME_RSS_FEED_URL", "https://feeds.example.org/api/podcast"),
        ]))
        .unwrap();
        assert_eq!(config.podme_token.as_deref(), Some("tok"));
        assert_eq!(config.secret.as_deref(), Some("s3cret"));
        assert_eq!(config.port, 9000);
        assert_eq!(config.cache_control().as_deref(), Some("s-maxage=60"));
        assert_eq!(config.denial_status, 403);
        assert_eq!(config.upstream_timeout, Some(Duration::from_secs(15)));
        assert_eq!(config.channel.feed_url, "https://feeds.example.org/api/podcast");
        assert!(config.is_ready());
    }

    #[test]
    fn test_empty_secret_counts_as_unset() {
        let config = AppConfig::from_lookup(lookup(&[("SECRET", "  ")])).unwrap();
        assert!(config.secret.is_none());
    }

    #[test]
    fn test_zero_max_age_disables_cache_header() {
        let config = AppConfig::from_lookup(lookup(&[("PODME_RSS_CACHE_MAX_AGE", "0")])).unwrap();
        assert_eq!(config.cache_control(), None);
    }

    #[test]
    fn test_rejects_bad_numbers() {
        let err = AppConfig::from_lookup(lookup(&[("PODME_RSS_PORT", "eighty")])).unwrap_err();
        assert_eq!(err.key, "PODME_RSS_PORT");

        let err = AppConfig::from_lookup(lookup(&[("PODME_RSS_DENIAL_STATUS", "42")])).unwrap_err();
        assert_eq!(err.key, "PODME_RSS_DENIAL_STATUS");
    }

    #[test]
    fn test_rejects_invalid_base_url() {
        let err = AppConfig::from_lookup(lookup(&[("PODME_API_BASE_URL", "not a url")])).unwrap_err();
        assert_eq!(err.key, "PODME_API_BASE_URL");
    }

    #[test]
    fn test_rejects_relative_feed_url() {
        let err = AppConfig::from_lookup(lookup(&[("PODME_RSS_FEED_URL", "api/podcast")])).unwrap_err();
        assert_eq!(err.key, "PODME_RSS_FEED_URL");
    }

    #[test]
    fn test_debug_hides_secrets() {
        let config =
            AppConfig::from_lookup(lookup(&[("PODME_TOKEN", "tok-123"), ("SECRET", "hush")])).unwrap();
        let printed = format!("{:?}", config);
        assert!(!printed.contains("tok-123"));
        assert!(!printed.contains("hush"));
    }
}
