use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::models::ScoringWeights;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub cache: CacheSettings,
    #[serde(default)]
    pub geocoder: GeocoderSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub notifications: NotificationSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: Option<u32>,
    pub min_connections: Option<u32>,
    pub acquire_timeout_secs: Option<u64>,
    pub idle_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    pub redis_url: String,
    pub ttl_secs: Option<u64>,
    pub l1_cache_size: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeocoderSettings {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_geocoder_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_geocoder_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_geocoder_cache_size")]
    pub cache_size: usize,
    #[serde(default = "default_geocoder_timeout")]
    pub timeout_secs: u64,
}

impl Default for GeocoderSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: default_geocoder_endpoint(),
            user_agent: default_geocoder_user_agent(),
            cache_size: default_geocoder_cache_size(),
            timeout_secs: default_geocoder_timeout(),
        }
    }
}

fn default_geocoder_endpoint() -> String { "https://nominatim.openstreetmap.org".to_string() }
fn default_geocoder_user_agent() -> String { format!("jobmatch/{}", env!("CARGO_PKG_VERSION")) }
fn default_geocoder_cache_size() -> usize { 1024 }
fn default_geocoder_timeout() -> u64 { 5 }

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_limit")]
    pub default_limit: usize,
    #[serde(default = "default_max_limit")]
    pub max_limit: usize,
    /// Recommendations scoring below this are dropped
    #[serde(default)]
    pub min_score: f64,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            max_limit: default_max_limit(),
            min_score: 0.0,
        }
    }
}

fn default_limit() -> usize { 20 }
fn default_max_limit() -> usize { 100 }

#[derive(Debug, Clone, Deserialize)]
pub struct ScoringSettings {
    #[serde(default = "default_empty_requirement_score")]
    pub empty_requirement_score: f64,
    #[serde(default = "default_overlap_bonus")]
    pub overlap_bonus: f64,
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self {
            empty_requirement_score: default_empty_requirement_score(),
            overlap_bonus: default_overlap_bonus(),
        }
    }
}

impl ScoringSettings {
    pub fn weights(&self) -> ScoringWeights {
        ScoringWeights {
            empty_requirement_score: self.empty_requirement_score,
            overlap_bonus: self.overlap_bonus,
        }
    }
}

fn default_empty_requirement_score() -> f64 { 0.5 }
fn default_overlap_bonus() -> f64 { 0.1 }

#[derive(Debug, Clone, Deserialize)]
pub struct NotificationSettings {
    /// Minimum gap between two notifications for the same saved search
    #[serde(default = "default_cooldown_minutes")]
    pub cooldown_minutes: i64,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self { cooldown_minutes: default_cooldown_minutes() }
    }
}

impl NotificationSettings {
    pub fn cooldown(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.cooldown_minutes)
    }
}

fn default_cooldown_minutes() -> i64 { 60 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "compact".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with JOBMATCH__)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., JOBMATCH__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("JOBMATCH")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        apply_env_overrides(settings)?.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("JOBMATCH")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        apply_env_overrides(settings)?.try_deserialize()
    }
}

/// Conventional variables that win over the prefixed ones
fn apply_env_overrides(settings: Config) -> Result<Config, ConfigError> {
    let mut builder = Config::builder().add_source(settings);

    if let Ok(database_url) = std::env::var("DATABASE_URL") {
        builder = builder.set_override("database.url", database_url)?;
    }
    if let Ok(redis_url) = std::env::var("REDIS_URL") {
        builder = builder.set_override("cache.redis_url", redis_url)?;
    }
    if let Ok(level) = std::env::var("LOG_LEVEL") {
        builder = builder.set_override("logging.level", level)?;
    }
    if let Ok(format) = std::env::var("LOG_FORMAT") {
        builder = builder.set_override("logging.format", format)?;
    }

    builder.build()
}
