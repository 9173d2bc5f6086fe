//! Optional JSON config file, in the legacy `wallabag.json` layout.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Legacy location, relative to the home directory.
const DEFAULT_CONFIG_PATH: &str = ".config/t.me/wallabag.json";

/// Every field is optional; environment variables fill or override them.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct FileConfig {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub wallabag_site: Option<String>,
    #[serde(default)]
    pub client_id: Option<String>,
    #[serde(default)]
    pub client_secret: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub filter_users: Vec<String>,
}

impl FileConfig {
    pub fn read(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Fail to read bot config {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Fail to parse bot config {}", path.display()))
    }

    /// `~/.config/t.me/wallabag.json`, if a home directory is known.
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(DEFAULT_CONFIG_PATH))
    }

    /// Picks the file to read: an explicit path or `WALLABOT_CONFIG` must exist; the
    /// legacy default is used only when present.
    pub fn resolve(explicit: Option<PathBuf>) -> Result<Option<Self>> {
        let requested = explicit.or_else(|| std::env::var_os("WALLABOT_CONFIG").map(PathBuf::from));
        if let Some(path) = requested {
            return Self::read(&path).map(Some);
        }

        match Self::default_path() {
            Some(path) if path.exists() => Self::read(&path).map(Some),
            _ => Ok(None),
        }
    }
}
