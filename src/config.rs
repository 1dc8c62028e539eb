//! Assistant configuration persistence
//!
//! Stores user preferences in `~/.config/quill/config.yaml`

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Instruction sent with every generative request
pub const DEFAULT_SYSTEM_INSTRUCTION: &str = "You are a world-class writing assistant. Be kind, concise, and practical. When asked to rewrite or iterate, only return the modified text, without any preamble or explanation.";

/// Assistant configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistConfig {
    /// Quiet period after typing before a proactive analysis runs
    #[serde(default = "default_suggestion_debounce_ms")]
    pub suggestion_debounce_ms: u64,

    /// Quiet period after typing before a spellcheck pass runs
    #[serde(default = "default_spellcheck_debounce_ms")]
    pub spellcheck_debounce_ms: u64,

    /// Texts with fewer words are never analyzed
    #[serde(default = "default_min_suggestion_words")]
    pub min_suggestion_words: usize,

    /// Rephrase options kept from a response
    #[serde(default = "default_rephrase_option_limit")]
    pub rephrase_option_limit: usize,

    #[serde(default = "default_system_instruction")]
    pub system_instruction: String,

    /// Extra misspellings and their corrections, merged into the built-in list
    #[serde(default)]
    pub spelling: BTreeMap<String, Vec<String>>,
}

fn default_suggestion_debounce_ms() -> u64 {
    2000
}

fn default_spellcheck_debounce_ms() -> u64 {
    500
}

fn default_min_suggestion_words() -> usize {
    20
}

fn default_rephrase_option_limit() -> usize {
    3
}

fn default_system_instruction() -> String {
    DEFAULT_SYSTEM_INSTRUCTION.to_string()
}

impl Default for AssistConfig {
    fn default() -> Self {
        Self {
            suggestion_debounce_ms: default_suggestion_debounce_ms(),
            spellcheck_debounce_ms: default_spellcheck_debounce_ms(),
            min_suggestion_words: default_min_suggestion_words(),
            rephrase_option_limit: default_rephrase_option_limit(),
            system_instruction: default_system_instruction(),
            spelling: BTreeMap::new(),
        }
    }
}

impl AssistConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load config from a specific file, or return defaults on any failure
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

    /// Save config to the default location
    pub fn save(&self) -> Result<(), String> {
        let path = crate::config_paths::config_file()
            .ok_or_else(|| "No config directory available".to_string())?;
        self.save_to(&path)
    }

    /// Save config to a specific file, creating its directory
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = self.to_yaml()?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    pub fn to_yaml(&self) -> Result<String, String> {
        serde_yaml::to_string(self).map_err(|e| format!("Failed to serialize config: {}", e))
    }
}
