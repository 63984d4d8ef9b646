//! core/settings.rs
//!
//! User preferences, persisted as a flat JSON object of string values:
//!
//! ```json
//! { "theme": "dark", "id3_version": "2.4", "cover_quality": "90" }
//! ```
//!
//! Keys we don't know about are kept as-is, so other front ends can
//! store their own preferences (like `theme`) in the same file.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::error::Result;
use super::session::SaveOptions;

pub const KEY_ID3_VERSION: &str = "id3_version";
pub const KEY_COVER_QUALITY: &str = "cover_quality";

/// Default location: `<config dir>/sonora/settings.json`.
pub fn default_path() -> PathBuf {
    directories::ProjectDirs::from("", "", "sonora")
        .map(|p| p.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".sonora"))
        .join("settings.json")
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Settings {
    values: BTreeMap<String, String>,
}

impl Settings {
    /// Missing file = defaults. A file we can't parse is an error
    /// (we'd rather not overwrite it silently).
    pub fn load(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(json) => Ok(serde_json::from_str(&json)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("{}: no settings file, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.values.remove(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Save options from the stored preferences.
    /// Bad values fall back to the defaults (with a warning).
    pub fn save_options(&self) -> SaveOptions {
        let mut options = SaveOptions::default();

        if let Some(v) = self.get(KEY_ID3_VERSION) {
            match v.parse() {
                Ok(version) => options.version = version,
                Err(e) => log::warn!("ignoring {KEY_ID3_VERSION}: {e}"),
            }
        }

        if let Some(v) = self.get(KEY_COVER_QUALITY) {
            match v.trim().parse::<u8>() {
                Ok(q @ 1..=100) => options.cover_quality = q,
                _ => log::warn!("ignoring {KEY_COVER_QUALITY}: {v:?} is not 1-100"),
            }
        }

        options
    }
}
