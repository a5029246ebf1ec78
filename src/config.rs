//! Plugin settings read from `chatterConfig.json`.
//! Each key is read on its own: a missing or mistyped key keeps its default.

use std::fs;
use std::path::Path;

use serde_json::{Map, Value};
use thiserror::Error;

pub const DEFAULT_CONFIG_PATH: &str = "chatterConfig.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("config JSON is not an object")]
    NotAnObject,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatterConfig {
    pub idle_chatter: bool,
    pub ally_chatter: bool,
    pub self_chatter: bool,
    /// Restrict characters to factions their compatibility rules allow.
    pub faction_specific_characters: bool,
    pub min_missile_op_fraction_for_chatter: f64,
}

impl Default for ChatterConfig {
    fn default() -> Self {
        Self {
            idle_chatter: true,
            ally_chatter: true,
            self_chatter: false,
            faction_specific_characters: true,
            min_missile_op_fraction_for_chatter: 0.2,
        }
    }
}

impl ChatterConfig {
    /// Fails only when `raw` is not a JSON object; bad values fall back key by key.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let settings: Value = serde_json::from_str(raw)?;
        let settings = settings.as_object().ok_or(ConfigError::NotAnObject)?;
        Ok(Self::from_settings(settings))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    fn from_settings(settings: &Map<String, Value>) -> Self {
        let defaults = Self::default();
        Self {
            idle_chatter: opt_bool(settings, "idleChatter", defaults.idle_chatter),
            ally_chatter: opt_bool(settings, "allyChatter", defaults.ally_chatter),
            self_chatter: opt_bool(settings, "selfChatter", defaults.self_chatter),
            faction_specific_characters: opt_bool(
                settings,
                "factionSpecificCharacters",
                defaults.faction_specific_characters,
            ),
            min_missile_op_fraction_for_chatter: opt_f64(
                settings,
                "minMissileOPFractionForChatter",
                defaults.min_missile_op_fraction_for_chatter,
            ),
        }
    }
}

fn opt_bool(settings: &Map<String, Value>, key: &str, default: bool) -> bool {
    match settings.get(key) {
        None => default,
        Some(value) => value.as_bool().unwrap_or_else(|| {
            tracing::warn!(key, %value, "expected a boolean; keeping default {default}");
            default
        }),
    }
}

fn opt_f64(settings: &Map<String, Value>, key: &str, default: f64) -> f64 {
    match settings.get(key) {
        None => default,
        Some(value) => value.as_f64().unwrap_or_else(|| {
            tracing::warn!(key, %value, "expected a number; keeping default {default}");
            default
        }),
    }
}

/// Load settings from `path`. Returns defaults (and logs) if the file is missing or invalid.
pub fn load_config(path: impl AsRef<Path>) -> ChatterConfig {
    let path = path.as_ref();
    match ChatterConfig::from_path(path) {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(path = %path.display(), "{err}; using default chatter settings");
            ChatterConfig::default()
        }
    }
}
