//! Persistent CLI configuration and effective settings.

use std::path::{Path, PathBuf};
use std::time::Duration;

use pitchside_core::config::{normalize_origin, poll_interval_from_secs, DEFAULT_PUBLIC_ORIGIN};
use pitchside_core::util::normalize_text_option;
use pitchside_core::StoreKind;
use serde::{Deserialize, Serialize};

const CONFIG_FILE_NAME: &str = "config.json";
const APP_DIR_NAME: &str = "pitchside";

pub const DB_PATH_ENV: &str = "PITCHSIDE_DB_PATH";
pub const STORE_ENV: &str = "PITCHSIDE_STORE";
pub const ORIGIN_ENV: &str = "PITCHSIDE_ORIGIN";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CliConfig {
    #[serde(default = "default_config_version")]
    pub version: u32,
    #[serde(default)]
    pub store: Option<StoreKind>,
    #[serde(default)]
    pub public_origin: Option<String>,
    #[serde(default)]
    pub poll_interval_secs: Option<u64>,
    #[serde(default)]
    pub db_path: Option<PathBuf>,
}

const fn default_config_version() -> u32 {
    1
}

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
        .join(CONFIG_FILE_NAME)
}

pub fn default_store_path(store: StoreKind) -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
        .join(store.default_file_name())
}

impl CliConfig {
    pub fn load() -> Result<Self, String> {
        Self::load_from_path(&default_config_path())
    }

    pub fn load_from_path(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            return Ok(Self {
                version: default_config_version(),
                ..Self::default()
            });
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|error| format!("Failed to read config at {}: {}", path.display(), error))?;
        let mut config = serde_json::from_str::<Self>(&raw)
            .map_err(|error| format!("Failed to parse config at {}: {}", path.display(), error))?;
        config.normalize();
        Ok(config)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|error| {
                format!(
                    "Failed to create config directory {}: {}",
                    parent.display(),
                    error
                )
            })?;
        }

        let mut normalized = self.clone();
        normalized.normalize();
        let serialized = serde_json::to_string_pretty(&normalized)
            .map_err(|error| format!("Failed to serialize config: {error}"))?;
        std::fs::write(path, serialized)
            .map_err(|error| format!("Failed to write config at {}: {}", path.display(), error))
    }

    fn normalize(&mut self) {
        self.version = default_config_version();
        self.public_origin = normalize_text_option(self.public_origin.take());
        if self.poll_interval_secs == Some(0) {
            self.poll_interval_secs = None;
        }
    }
}

/// Values given on the command line
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub db_path: Option<PathBuf>,
    pub store: Option<StoreKind>,
    pub origin: Option<String>,
    pub poll_interval_secs: Option<u64>,
}

/// Effective settings after applying flag > environment > file > default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settings {
    pub store: StoreKind,
    pub db_path: PathBuf,
    pub public_origin: String,
    #[serde(serialize_with = "serialize_secs")]
    pub poll_interval: Duration,
}

fn serialize_secs<S: serde::Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(value.as_secs())
}

impl Settings {
    pub fn resolve(overrides: Overrides, config: &CliConfig) -> Result<Self, String> {
        Self::resolve_with_env(overrides, config, |key| std::env::var(key).ok())
    }

    pub fn resolve_with_env(
        overrides: Overrides,
        config: &CliConfig,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, String> {
        let env_store = normalize_text_option(env(STORE_ENV))
            .map(|value| value.parse::<StoreKind>())
            .transpose()?;
        let store = overrides
            .store
            .or(env_store)
            .or(config.store)
            .unwrap_or_default();

        let db_path = overrides
            .db_path
            .or_else(|| normalize_text_option(env(DB_PATH_ENV)).map(PathBuf::from))
            .or_else(|| config.db_path.clone())
            .unwrap_or_else(|| default_store_path(store));

        let origin = normalize_text_option(overrides.origin)
            .or_else(|| normalize_text_option(env(ORIGIN_ENV)))
            .or_else(|| config.public_origin.clone())
            .unwrap_or_else(|| DEFAULT_PUBLIC_ORIGIN.to_string());
        let public_origin = normalize_origin(&origin)?;

        let poll_interval = poll_interval_from_secs(
            overrides
                .poll_interval_secs
                .or(config.poll_interval_secs)
                .unwrap_or_default(),
        );

        Ok(Self {
            store,
            db_path,
            public_origin,
            poll_interval,
        })
    }
}
