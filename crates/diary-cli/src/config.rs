//! Config file and default paths.
//!
//! The config file is optional TOML; every key has a default and most can be
//! overridden from the environment or the command line.
//!
//! ```toml
//! [diary]
//! dir = "~/diary"
//!
//! [security]
//! salt = "..."
//! kdf_iterations = 480000
//! allow_external_paths = true
//!
//! [editor]
//! command = "vim"
//! new_args = []
//! read_args = ["-R"]
//! template = "~/diary-template.txt"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct DiaryFileConfig {
    #[serde(default)]
    pub diary: DiarySection,
    #[serde(default)]
    pub security: SecuritySection,
    #[serde(default)]
    pub editor: EditorSection,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct DiarySection {
    pub dir: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SecuritySection {
    /// Salt text; its UTF-8 bytes are the KDF salt
    pub salt: Option<String>,
    pub kdf_iterations: Option<u32>,
    pub allow_external_paths: Option<bool>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct EditorSection {
    pub command: Option<String>,
    pub new_args: Option<Vec<String>>,
    pub read_args: Option<Vec<String>>,
    pub template: Option<String>,
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_config_dir()?.join("config.toml"))
}

pub fn default_diary_dir() -> anyhow::Result<PathBuf> {
    Ok(home_dir()?.join("diary"))
}

/// Read the config file, or defaults if it does not exist.
pub fn read_config(path: &Path) -> anyhow::Result<DiaryFileConfig> {
    if !path.exists() {
        return Ok(DiaryFileConfig::default());
    }
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
    parse_config(&contents)
        .map_err(|e| anyhow::anyhow!("Failed to parse config {}: {}", path.display(), e))
}

pub fn parse_config(contents: &str) -> Result<DiaryFileConfig, toml::de::Error> {
    toml::from_str(contents)
}

pub fn xdg_config_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_CONFIG_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("diary"));
        }
    }
    Ok(home_dir()?.join(".config").join("diary"))
}

/// Expand a leading `~` to the home directory.
pub fn expand_tilde(path: &str) -> anyhow::Result<PathBuf> {
    if path == "~" {
        return home_dir();
    }
    if let Some(rest) = path.strip_prefix("~/") {
        return Ok(home_dir()?.join(rest));
    }
    Ok(PathBuf::from(path))
}

fn home_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .map_err(|_| anyhow::anyhow!("HOME is not set; cannot resolve default paths"))?;
    Ok(PathBuf::from(home))
}
