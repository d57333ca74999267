use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub search: SearchSettings,
    #[serde(default)]
    pub recent: RecentSettings,
    #[serde(default)]
    pub catalog: CatalogSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchSettings {
    /// Queries with more tokens than this skip extraction and go to the text fallback
    #[serde(default = "default_max_query_tokens")]
    pub max_query_tokens: usize,
    #[serde(default = "default_min_location_token_len")]
    pub min_location_token_len: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            max_query_tokens: default_max_query_tokens(),
            min_location_token_len: default_min_location_token_len(),
        }
    }
}

fn default_max_query_tokens() -> usize { 32 }
fn default_min_location_token_len() -> usize { 2 }

#[derive(Debug, Clone, Deserialize)]
pub struct RecentSettings {
    #[serde(default = "default_recent_capacity")]
    pub capacity: usize,
    #[serde(default = "default_location")]
    pub default_location: String,
}

impl Default for RecentSettings {
    fn default() -> Self {
        Self {
            capacity: default_recent_capacity(),
            default_location: default_location(),
        }
    }
}

fn default_recent_capacity() -> usize { 5 }
fn default_location() -> String { "Bangalore, Karnataka".to_string() }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogSettings {
    /// JSON snapshot of grouped listings plus eligible ids
    pub snapshot_path: Option<PathBuf>,
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
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with PROPSEARCH_)
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., PROPSEARCH__SEARCH__MAX_QUERY_TOKENS -> search.max_query_tokens
            .add_source(environment())
            .build()?
            .try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?
            .try_deserialize()
    }
}

fn environment() -> Environment {
    Environment::with_prefix("PROPSEARCH")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}
