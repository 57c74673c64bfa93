use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Append "n of m" to entry announcements.
    #[serde(default = "default_announce_positions")]
    pub announce_positions: bool,
    /// Caption lines kept on screen in the demo host.
    #[serde(default = "default_caption_history")]
    pub caption_history: usize,
    /// Cross-category item flow in the build menu.
    #[serde(default = "default_cross_category_build")]
    pub cross_category_build: bool,
    /// Embedded sample data set the demo starts with.
    #[serde(default = "default_data_set")]
    pub data_set: String,
}

fn default_announce_positions() -> bool {
    true
}
fn default_caption_history() -> usize {
    6
}
fn default_cross_category_build() -> bool {
    true
}
fn default_data_set() -> String {
    "harbor-kingdom".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            announce_positions: default_announce_positions(),
            caption_history: default_caption_history(),
            cross_category_build: default_cross_category_build(),
            data_set: default_data_set(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    #[allow(dead_code)]
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("herald")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_toml() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.announce_positions);
        assert_eq!(config.caption_history, 6);
        assert!(config.cross_category_build);
        assert_eq!(config.data_set, "harbor-kingdom");
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let config: Config = toml::from_str("announce_positions = false").unwrap();
        assert!(!config.announce_positions);
        assert_eq!(config.data_set, "harbor-kingdom");
    }

    #[test]
    fn test_save_and_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("herald").join("config.toml");

        // Missing file falls back to defaults.
        let missing = Config::load_from(&path).unwrap();
        assert_eq!(missing.data_set, "harbor-kingdom");

        let config = Config {
            announce_positions: false,
            data_set: "frontier-post".to_string(),
            ..Config::default()
        };
        config.save_to(&path).unwrap();
        let back = Config::load_from(&path).unwrap();
        assert!(!back.announce_positions);
        assert_eq!(back.data_set, "frontier-post");
    }

    #[test]
    fn test_round_trip() {
        let config = Config {
            data_set: "frontier-post".to_string(),
            ..Config::default()
        };
        let text = toml::to_string_pretty(&config).unwrap();
        let back: Config = toml::from_str(&text).unwrap();
        assert_eq!(back.data_set, "frontier-post");
        assert_eq!(back.caption_history, 6);
    }
}
