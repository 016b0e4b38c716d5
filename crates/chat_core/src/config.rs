use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::paths;

/// Default completion model for newly created branches.
pub const DEFAULT_MODEL: &str = "anthropic/claude-3.5-sonnet";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Where entity tables are stored. `None` means the platform data dir.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// Model assigned to branches that do not choose one explicitly.
    #[serde(default = "default_model")]
    pub default_model: String,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            default_model: default_model(),
        }
    }
}

impl ChatConfig {
    /// Load from config.json in the data directory, falling back to the
    /// defaults when the file is missing or unreadable.
    pub fn load() -> Self {
        paths::load_json(&paths::config_json_path()).unwrap_or_default()
    }

    pub fn save(&self) -> Result<(), String> {
        paths::save_json(&paths::config_json_path(), self)
    }

    /// Resolved storage directory for the entity tables.
    pub fn storage_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(paths::data_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_uses_default_model() {
        let config = ChatConfig::default();
        assert_eq!(config.default_model, DEFAULT_MODEL);
        assert!(config.data_dir.is_none());
    }

    #[test]
    fn test_storage_dir_prefers_explicit_dir() {
        let config = ChatConfig {
            data_dir: Some(PathBuf::from("/tmp/chat-test")),
            ..Default::default()
        };
        assert_eq!(config.storage_dir(), PathBuf::from("/tmp/chat-test"));
    }
}
