use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

use super::{BindingTable, Controls};

pub const PRODUCTION_ENV_VAR: &str = "MAW_PRODUCTION";

#[derive(Debug, Clone)]
pub struct ControlsOptions {
    pub name: Option<String>,
    pub production: bool,
}

impl Default for ControlsOptions {
    fn default() -> Self {
        Self {
            name: None,
            production: resolve_production_mode(false),
        }
    }
}

/// On-disk description of a control set.
///
/// ```json
/// { "name": "Player", "actions": { "jump": { "keyboard": "space", "controller_one": ["a", "b"] } } }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ControlsConfig {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub production: Option<bool>,
    #[serde(default)]
    pub actions: BTreeMap<String, BindingTable>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read controls config at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid controls config at '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ControlsConfig {
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let deserializer = &mut serde_json::Deserializer::from_str(raw);
        serde_path_to_error::deserialize(deserializer).map_err(|error| {
            let path = error.path().to_string();
            ConfigError::Parse {
                path,
                source: error.into_inner(),
            }
        })
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&raw)?;
        info!(
            path = %path.display(),
            action_count = config.actions.len(),
            "controls_config_loaded"
        );
        Ok(config)
    }
}

impl Controls {
    pub fn from_config(config: ControlsConfig) -> Self {
        let options = ControlsOptions {
            name: config.name,
            production: config
                .production
                .unwrap_or_else(|| resolve_production_mode(false)),
        };
        let mut controls = Controls::with_options(options);
        for (action, table) in config.actions {
            controls.define_table(action, table);
        }
        controls
    }
}

fn resolve_production_mode(fallback: bool) -> bool {
    match env::var(PRODUCTION_ENV_VAR) {
        Ok(value) => match parse_production_flag(&value) {
            Some(production) => production,
            None => {
                warn!(
                    env_var = PRODUCTION_ENV_VAR,
                    value = value.as_str(),
                    "invalid production env var value; falling back to default"
                );
                fallback
            }
        },
        Err(env::VarError::NotPresent) => fallback,
        Err(err) => {
            warn!(
                env_var = PRODUCTION_ENV_VAR,
                error = %err,
                "unable to read production env var; falling back to default"
            );
            fallback
        }
    }
}

fn parse_production_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
