use crate::models::ScoringPoints;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub storage: StorageSettings,
    #[serde(default)]
    pub maps: MapsSettings,
    #[serde(default)]
    pub assistant: AssistantSettings,
    #[serde(default)]
    pub ranking: RankingSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 3000 }

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Memory,
    Postgres,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorageSettings {
    #[serde(default)]
    pub backend: StorageBackend,
    pub database_url: Option<String>,
    pub max_connections: Option<u32>,
    pub min_connections: Option<u32>,
    pub acquire_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MapsSettings {
    #[serde(default = "default_maps_endpoint")]
    pub endpoint: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_maps_timeout")]
    pub timeout_secs: u64,
}

impl Default for MapsSettings {
    fn default() -> Self {
        Self {
            endpoint: default_maps_endpoint(),
            api_key: String::new(),
            timeout_secs: default_maps_timeout(),
        }
    }
}

fn default_maps_endpoint() -> String { "https://maps.googleapis.com/maps/api".to_string() }
fn default_maps_timeout() -> u64 { 10 }

#[derive(Debug, Clone, Deserialize)]
pub struct AssistantSettings {
    #[serde(default = "default_assistant_endpoint")]
    pub endpoint: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_assistant_model")]
    pub model: String,
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,
    #[serde(default = "default_fallback_reply")]
    pub fallback_reply: String,
    #[serde(default = "default_assistant_timeout")]
    pub timeout_secs: u64,
}

impl Default for AssistantSettings {
    fn default() -> Self {
        Self {
            endpoint: default_assistant_endpoint(),
            api_key: String::new(),
            model: default_assistant_model(),
            system_prompt: default_system_prompt(),
            fallback_reply: default_fallback_reply(),
            timeout_secs: default_assistant_timeout(),
        }
    }
}

fn default_assistant_endpoint() -> String { "https://api.openai.com/v1".to_string() }
fn default_assistant_model() -> String { "gpt-4o-mini".to_string() }
fn default_system_prompt() -> String {
    "You are Hirely's career assistant. Help job seekers with applications, \
     interviews and questions about the jobs they have matched with. Keep answers short."
        .to_string()
}
fn default_fallback_reply() -> String {
    "Sorry, I'm having trouble answering right now. Please try again in a moment.".to_string()
}
fn default_assistant_timeout() -> u64 { 30 }

/// Where the ranking engine gets job distances from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceProvider {
    #[default]
    Haversine,
    Maps,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RankingSettings {
    #[serde(default = "default_next_batch_size")]
    pub next_batch_size: usize,
    #[serde(default = "default_distance_timeout_ms")]
    pub distance_timeout_ms: u64,
    #[serde(default = "default_max_concurrent_lookups")]
    pub max_concurrent_lookups: usize,
    #[serde(default)]
    pub distance_provider: DistanceProvider,
    #[serde(default)]
    pub points: PointsConfig,
}

impl Default for RankingSettings {
    fn default() -> Self {
        Self {
            next_batch_size: default_next_batch_size(),
            distance_timeout_ms: default_distance_timeout_ms(),
            max_concurrent_lookups: default_max_concurrent_lookups(),
            distance_provider: DistanceProvider::default(),
            points: PointsConfig::default(),
        }
    }
}

fn default_next_batch_size() -> usize { 5 }
fn default_distance_timeout_ms() -> u64 { 2000 }
fn default_max_concurrent_lookups() -> usize { 16 }

#[derive(Debug, Clone, Deserialize)]
pub struct PointsConfig {
    #[serde(default = "default_education_points")]
    pub education: i32,
    #[serde(default = "default_pay_points")]
    pub pay: i32,
    #[serde(default = "default_unseen_points")]
    pub unseen: i32,
    #[serde(default = "default_near_points")]
    pub near: i32,
    #[serde(default = "default_nearby_points")]
    pub nearby: i32,
    #[serde(default = "default_near_radius_m")]
    pub near_radius_m: f64,
    #[serde(default = "default_nearby_radius_m")]
    pub nearby_radius_m: f64,
    #[serde(default = "default_pay_per_experience_year")]
    pub pay_per_experience_year: f64,
}

impl Default for PointsConfig {
    fn default() -> Self {
        Self {
            education: default_education_points(),
            pay: default_pay_points(),
            unseen: default_unseen_points(),
            near: default_near_points(),
            nearby: default_nearby_points(),
            near_radius_m: default_near_radius_m(),
            nearby_radius_m: default_nearby_radius_m(),
            pay_per_experience_year: default_pay_per_experience_year(),
        }
    }
}

fn default_education_points() -> i32 { 10 }
fn default_pay_points() -> i32 { 5 }
fn default_unseen_points() -> i32 { 15 }
fn default_near_points() -> i32 { 20 }
fn default_nearby_points() -> i32 { 10 }
fn default_near_radius_m() -> f64 { 5_000.0 }
fn default_nearby_radius_m() -> f64 { 20_000.0 }
fn default_pay_per_experience_year() -> f64 { 10_000.0 }

impl From<&PointsConfig> for ScoringPoints {
    fn from(config: &PointsConfig) -> Self {
        Self {
            education: config.education,
            pay: config.pay,
            unseen: config.unseen,
            near: config.near,
            nearby: config.nearby,
            near_radius_m: config.near_radius_m,
            nearby_radius_m: config.nearby_radius_m,
            pay_per_experience_year: config.pay_per_experience_year,
        }
    }
}

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
    /// 4. Environment variables (prefixed with HIRELY__)
    /// 5. Well-known secrets (DATABASE_URL, GOOGLE_MAPS_API_KEY, OPENAI_API_KEY, PORT)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., HIRELY__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("HIRELY")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        apply_env_secrets(settings)?.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("HIRELY")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Override config values with the plain environment variables deployments
/// already set for these secrets
fn apply_env_secrets(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let mut builder = Config::builder().add_source(settings);

    if let Ok(url) = env::var("DATABASE_URL") {
        builder = builder.set_override("storage.database_url", url)?;
    }
    if let Ok(key) = env::var("GOOGLE_MAPS_API_KEY") {
        builder = builder.set_override("maps.api_key", key)?;
    }
    if let Ok(key) = env::var("OPENAI_API_KEY") {
        builder = builder.set_override("assistant.api_key", key)?;
    }
    if let Some(port) = env::var("PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
        builder = builder.set_override("server.port", port as i64)?;
    }

    builder.build()
}
