use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::prompt::{Difficulty, PracticeFocus};

const MODES: &[&str] = &["time", "words", "infinite", "practice", "custom"];

/// Persisted user defaults. CLI flags override these per run; `save` writes
/// them back for the next one.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_mode")]
    pub mode: String,
    #[serde(default = "default_difficulty")]
    pub difficulty: String,
    #[serde(default = "default_seconds")]
    pub seconds: u32,
    #[serde(default = "default_words")]
    pub words: usize,
    #[serde(default = "default_focus")]
    pub focus: String,
}

fn default_mode() -> String {
    "time".to_string()
}
fn default_difficulty() -> String {
    "easy".to_string()
}
fn default_seconds() -> u32 {
    60
}
fn default_words() -> usize {
    20
}
fn default_focus() -> String {
    "common-words".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: default_mode(),
            difficulty: default_difficulty(),
            seconds: default_seconds(),
            words: default_words(),
            focus: default_focus(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("typrate")
            .join("config.toml")
    }

    /// Clamp limits to the accepted 1..=999 range and reset unknown variant
    /// names. Call after deserialization to handle stale or edited configs.
    pub fn normalize(&mut self) {
        self.seconds = self.seconds.clamp(1, 999);
        self.words = self.words.clamp(1, 999);
        if !MODES.contains(&self.mode.as_str()) {
            self.mode = default_mode();
        }
        if Difficulty::parse(&self.difficulty).is_none() {
            self.difficulty = default_difficulty();
        }
        if PracticeFocus::parse(&self.focus).is_none() {
            self.focus = default_focus();
        }
    }
}
