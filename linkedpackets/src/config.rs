use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_DIR_NAME: &str = ".linkedpackets";
const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Debug, Deserialize, Serialize, Default, Clone, PartialEq, Eq)]
pub struct Config {
    pub storage_path: Option<PathBuf>,
    pub logs_path: Option<PathBuf>,
    pub logs_enabled: Option<bool>,
    pub log_level: Option<String>,
    /// Address allowed to update module params.
    pub authority: Option<String>,
}

impl Config {
    /// Paths in the file are relative to the file's directory.
    pub fn from_filepath(path: &Path) -> Result<Config> {
        let file = fs::File::open(path)
            .with_context(|| format!("Failed to open config file {}", path.display()))?;
        let mut config: Config = serde_json::from_reader(file)
            .context("Failed to parse config file")?;

        let config_dir = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        };

        if let Some(storage_path) = config.storage_path.take() {
            config.storage_path = Some(to_absolute_path(&config_dir, &storage_path)?);
        }
        if let Some(logs_path) = config.logs_path.take() {
            config.logs_path = Some(to_absolute_path(&config_dir, &logs_path)?);
        }

        Ok(config)
    }

    /// Reads `path` when given; otherwise the file in the default directory
    /// if there is one, else an empty config.
    pub fn load(path: Option<&Path>) -> Result<Config> {
        if let Some(path) = path {
            return Self::from_filepath(path);
        }
        match default_dir() {
            Some(dir) if dir.join(CONFIG_FILE_NAME).exists() => Self::from_filepath(&dir.join(CONFIG_FILE_NAME)),
            _ => Ok(Config::default()),
        }
    }

    pub fn storage_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.storage_path {
            return Ok(path.clone());
        }
        default_dir()
            .map(|dir| dir.join("storage"))
            .ok_or_else(|| anyhow!("No storage path configured and no home directory found"))
    }

    pub fn authority(&self) -> Result<&str> {
        self.authority
            .as_deref()
            .ok_or_else(|| anyhow!("No module authority configured; set `authority` in the config file"))
    }
}

pub fn default_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(DEFAULT_DIR_NAME))
}

pub fn to_absolute_path(base_dir: &Path, relative_path: &Path) -> Result<PathBuf> {
    if relative_path.is_absolute() {
        return Ok(relative_path.to_path_buf());
    }
    let base_dir = base_dir
        .canonicalize()
        .with_context(|| format!("Failed to resolve {}", base_dir.display()))?;
    Ok(base_dir.join(relative_path))
}
