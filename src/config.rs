//! Configuration management

use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub twitter: TwitterConfig,
    #[serde(default)]
    pub firecrawl: FirecrawlConfig,
    #[serde(default)]
    pub limits: LimitsConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TwitterConfig {
    /// Bearer token for the recent-search API
    pub bearer_token: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FirecrawlConfig {
    /// API key for the scrape endpoint
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LimitsConfig {
    /// Total tweets collected per search, across pages
    #[serde(default = "default_max_tweets")]
    pub max_tweets_per_search: usize,
    /// Forward-compatible knob; the collector currently derives its own
    /// source list per keyword
    #[serde(default = "default_max_web_sources")]
    pub max_web_sources: usize,
    /// Timeframe label used when a tool call omits one
    #[serde(default = "default_timeframe")]
    pub default_timeframe: String,
    /// Forward-compatible knob; no response cache is implemented
    #[serde(default = "default_cache_minutes")]
    pub cache_duration_minutes: u64,
}

fn default_max_tweets() -> usize {
    100
}

fn default_max_web_sources() -> usize {
    10
}

fn default_timeframe() -> String {
    "24h".to_string()
}

fn default_cache_minutes() -> u64 {
    30
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_tweets_per_search: default_max_tweets(),
            max_web_sources: default_max_web_sources(),
            default_timeframe: default_timeframe(),
            cache_duration_minutes: default_cache_minutes(),
        }
    }
}

impl Config {
    /// Load configuration from a file, overlaid with TRENDWATCH__ env vars
    ///
    /// The file is optional; credentials may come entirely from the
    /// environment (a local `.env` is picked up first).
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let settings = config::Config::builder()
            .add_source(config::File::with_name(path.as_ref().to_str().unwrap()).required(false))
            .add_source(config::Environment::with_prefix("TRENDWATCH").separator("__"))
            .build()?;

        let config: Config = settings.try_deserialize()?;
        Ok(config)
    }

    /// Load from default locations
    pub fn load_default() -> anyhow::Result<Self> {
        let paths = ["trendwatch.toml", "~/.config/trendwatch/config.toml"];

        for path in paths {
            let expanded = shellexpand::tilde(path);
            if Path::new(expanded.as_ref()).exists() {
                return Self::load(expanded.as_ref());
            }
        }

        // No file found: environment only
        Self::load("trendwatch")
    }

    /// Names of required credentials that are not configured
    pub fn validate(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();

        if self.twitter.bearer_token.is_none() {
            missing.push("twitter.bearer_token");
        }
        if self.firecrawl.api_key.is_none() {
            missing.push("firecrawl.api_key");
        }

        missing
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// Convert a timeframe label to hours
    ///
    /// Accepts `<int>h`, `<int>d`, `<int>w`; anything else falls back to 24.
    /// Parsed but not yet wired into the fetch window.
    pub fn timeframe_hours(&self, timeframe: Option<&str>) -> u32 {
        let tf = timeframe.unwrap_or(&self.limits.default_timeframe);

        let parsed = if let Some(n) = tf.strip_suffix('h') {
            n.parse::<u32>().ok()
        } else if let Some(n) = tf.strip_suffix('d') {
            n.parse::<u32>().ok().map(|n| n * 24)
        } else if let Some(n) = tf.strip_suffix('w') {
            n.parse::<u32>().ok().map(|n| n * 24 * 7)
        } else {
            None
        };

        parsed.unwrap_or(24)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_timeframe(tf: &str) -> Config {
        Config {
            limits: LimitsConfig {
                default_timeframe: tf.to_string(),
                ..LimitsConfig::default()
            },
            ..Config::default()
        }
    }

    #[test]
    fn test_timeframe_hours() {
        let config = Config::default();
        assert_eq!(config.timeframe_hours(Some("1h")), 1);
        assert_eq!(config.timeframe_hours(Some("6h")), 6);
        assert_eq!(config.timeframe_hours(Some("3d")), 72);
        assert_eq!(config.timeframe_hours(Some("2w")), 336);
    }

    #[test]
    fn test_timeframe_hours_unrecognized() {
        let config = Config::default();
        assert_eq!(config.timeframe_hours(Some("24")), 24);
        assert_eq!(config.timeframe_hours(Some("soon")), 24);
        assert_eq!(config.timeframe_hours(Some("xh")), 24);
        assert_eq!(config.timeframe_hours(Some("")), 24);
    }

    #[test]
    fn test_timeframe_hours_default() {
        assert_eq!(Config::default().timeframe_hours(None), 24);
        assert_eq!(config_with_timeframe("7d").timeframe_hours(None), 168);
    }

    #[test]
    fn test_limits_defaults() {
        let limits = LimitsConfig::default();
        assert_eq!(limits.max_tweets_per_search, 100);
        assert_eq!(limits.max_web_sources, 10);
        assert_eq!(limits.default_timeframe, "24h");
        assert_eq!(limits.cache_duration_minutes, 30);
    }

    #[test]
    fn test_validate_missing_credentials() {
        let config = Config::default();
        let missing = config.validate();
        assert_eq!(missing, vec!["twitter.bearer_token", "firecrawl.api_key"]);
        assert!(!config.is_valid());
    }

    #[test]
    fn test_validate_complete() {
        let config = Config {
            twitter: TwitterConfig {
                bearer_token: Some("token".to_string()),
            },
            firecrawl: FirecrawlConfig {
                api_key: Some("key".to_string()),
            },
            limits: LimitsConfig::default(),
        };
        assert!(config.is_valid());
    }

    #[test]
    fn test_deserialize_from_toml() {
        let raw = r#"
            [twitter]
            bearer_token = "abc"

            [limits]
            max_tweets_per_search = 50
        "#;
        let config: Config = toml::from_str(raw).unwrap();
        assert_eq!(config.twitter.bearer_token.as_deref(), Some("abc"));
        assert_eq!(config.limits.max_tweets_per_search, 50);
        assert_eq!(config.limits.default_timeframe, "24h");
        assert!(config.firecrawl.api_key.is_none());
    }
}
