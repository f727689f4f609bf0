use async_trait::async_trait;
use figment::{Figment, providers::{Format, Toml, Env}};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;
use tidy_core::error::CoreError;
use tidy_core::flags::{ConfigSource, FetchPolicy};
use tidy_core::models::{FLAG_ENABLE_CATEGORIES, FLAG_ENABLE_DARK_MODE};

const DEFAULT_CONFIG_FILE: &str = "tidy.toml";

#[derive(Deserialize, Debug)]
pub struct Config {
    #[serde(default = "default_database_path")]
    pub database_path: String,
    /// Delay before a filter change is applied to the filtered view
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    #[serde(default)]
    pub environment: Environment,
    /// File holding the `[flags]` table; defaults to the config file itself
    #[serde(default)]
    pub flags_file: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

fn default_database_path() -> String {
    "tidy.db".to_string()
}

fn default_debounce_ms() -> u64 {
    300
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            debounce_ms: default_debounce_ms(),
            environment: Environment::default(),
            flags_file: None,
        }
    }
}

impl Config {
    pub fn new() -> Result<Self, figment::Error> {
        Figment::new()
            .merge(Toml::file(config_path()))
            .merge(Env::prefixed("TIDY_"))
            .extract()
    }

    pub fn filter_debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn fetch_policy(&self) -> FetchPolicy {
        match self.environment {
            Environment::Development => FetchPolicy::development(),
            Environment::Production => FetchPolicy::production(),
        }
    }

    pub fn flags_path(&self) -> PathBuf {
        self.flags_file.clone().unwrap_or_else(config_path)
    }
}

/// `TIDY_CONFIG` or `tidy.toml` in the working directory.
pub fn config_path() -> PathBuf {
    std::env::var_os("TIDY_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
}

// ============================================================================
// Feature flag source
// ============================================================================

#[derive(Deserialize, Debug, Default)]
struct FlagValues {
    enable_categories: Option<bool>,
    enable_dark_mode: Option<bool>,
}

/// Reads the `[flags]` table of a TOML file, overridden by `TIDY_FLAGS_*`
/// environment variables. The file is re-read on every fetch.
pub struct FileConfigSource {
    path: PathBuf,
}

impl FileConfigSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait]
impl ConfigSource for FileConfigSource {
    async fn fetch(&self) -> Result<HashMap<String, bool>, CoreError> {
        let values: FlagValues = Figment::from(Toml::file(&self.path))
            .focus("flags")
            .merge(Env::prefixed("TIDY_FLAGS_"))
            .extract()
            .map_err(|e| CoreError::Config(e.to_string()))?;

        let mut flags = HashMap::new();
        if let Some(enabled) = values.enable_categories {
            flags.insert(FLAG_ENABLE_CATEGORIES.to_string(), enabled);
        }
        if let Some(enabled) = values.enable_dark_mode {
            flags.insert(FLAG_ENABLE_DARK_MODE.to_string(), enabled);
        }
        Ok(flags)
    }
}
