//! Configuration loading and parsing.
//!
//! Parses `gridpad.toml` (or an override path supplied by the binary) for the
//! window and character-cell sizes the grid derives from, plus the default
//! document stem. Unknown fields are ignored so the file can grow without
//! breaking older binaries; a missing or unparseable file falls back to the
//! built-in defaults that reproduce the classic 640x480 / 12x20 grid.

use anyhow::Result;
use serde::Deserialize;
use std::{fs, path::PathBuf};
use tracing::warn;

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct WindowConfig {
    #[serde(default = "WindowConfig::default_width")]
    pub width: u32,
    #[serde(default = "WindowConfig::default_height")]
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: Self::default_width(),
            height: Self::default_height(),
        }
    }
}

impl WindowConfig {
    const fn default_width() -> u32 {
        640
    }
    const fn default_height() -> u32 {
        480
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct FontConfig {
    #[serde(default = "FontConfig::default_char_width")]
    pub char_width: u32,
    #[serde(default = "FontConfig::default_char_height")]
    pub char_height: u32,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            char_width: Self::default_char_width(),
            char_height: Self::default_char_height(),
        }
    }
}

impl FontConfig {
    const fn default_char_width() -> u32 {
        12
    }
    const fn default_char_height() -> u32 {
        20
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct DocumentConfig {
    /// Basename of the document; the pad reads and writes `<stem>.txt`.
    #[serde(default = "DocumentConfig::default_stem")]
    pub stem: String,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            stem: Self::default_stem(),
        }
    }
}

impl DocumentConfig {
    fn default_stem() -> String {
        "text".to_string()
    }
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub font: FontConfig,
    #[serde(default)]
    pub document: DocumentConfig,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Original file string, when one was read.
    pub raw: Option<String>,
    /// Parsed (or default) data.
    pub file: ConfigFile,
}

/// Best-effort config path: working-directory `gridpad.toml` first, then the
/// platform config dir.
pub fn discover() -> PathBuf {
    let local = PathBuf::from("gridpad.toml");
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("gridpad").join("gridpad.toml");
    }
    PathBuf::from("gridpad.toml")
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    if let Ok(content) = fs::read_to_string(&path) {
        match toml::from_str::<ConfigFile>(&content) {
            Ok(file) => Ok(Config {
                raw: Some(content),
                file,
            }),
            Err(e) => {
                warn!(target: "config", %e, file = %path.display(), "config_parse_failed_using_defaults");
                Ok(Config::default())
            }
        }
    } else {
        Ok(Config::default())
    }
}
