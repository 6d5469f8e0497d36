//! User configuration
//!
//! Stores defaults in `~/.config/typemark/config.yaml`

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::markup::HighlightClasses;

/// Defaults applied when the command line does not override them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Profile ids to activate (e.g., "libpmemobj", "libpmemobj-cpp")
    #[serde(default = "default_profiles")]
    pub profiles: Vec<String>,

    /// Class added to tokens recognised as types
    #[serde(default = "default_type_class")]
    pub type_class: String,

    /// Class carried by plain identifier spans
    #[serde(default = "default_identifier_class")]
    pub identifier_class: String,
}

fn default_profiles() -> Vec<String> {
    vec!["libpmemobj".to_string()]
}

fn default_type_class() -> String {
    "typ".to_string()
}

fn default_identifier_class() -> String {
    "pln".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            profiles: default_profiles(),
            type_class: default_type_class(),
            identifier_class: default_identifier_class(),
        }
    }
}

impl Config {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load config from a specific file, falling back to defaults on any error
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn classes(&self) -> HighlightClasses {
        HighlightClasses {
            type_class: self.type_class.clone(),
            identifier_class: self.identifier_class.clone(),
        }
    }
}
