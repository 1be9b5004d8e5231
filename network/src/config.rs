// SPDX-License-Identifier: MIT OR Apache-2.0

//! Connection settings and TOML config file plumbing

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Default config file name inside the platform config directory
pub const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// `host:port` of the game server
    pub server_addr: String,
    pub connect_timeout_secs: u64,
    /// Longest inbound line accepted; longer lines are skipped
    pub max_line_bytes: usize,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            server_addr: "127.0.0.1:4000".to_string(),
            connect_timeout_secs: 10,
            max_line_bytes: 64 * 1024,
        }
    }
}

impl NetworkConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

/// Path of the config file in the platform config directory
pub fn default_config_path() -> Result<PathBuf> {
    let proj_dirs =
        ProjectDirs::from("io", "gridmark", "gridmark").context("Failed to determine config directory")?;
    Ok(proj_dirs.config_dir().join(CONFIG_FILE))
}

/// Load a TOML config, writing the defaults out first if the file is missing
pub fn load_or_create<T>(path: &Path) -> Result<T>
where
    T: Serialize + DeserializeOwned + Default,
{
    if !path.exists() {
        tracing::info!("Config file not found, creating default at: {}", path.display());
        let config = T::default();
        save(path, &config)?;
        return Ok(config);
    }

    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read config file: {}", path.display()))?;

    toml::from_str(&content).with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Write a config as pretty TOML, creating parent directories
pub fn save<T: Serialize>(path: &Path, config: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    let toml_content = toml::to_string_pretty(config).context("Failed to serialize config")?;

    fs::write(path, toml_content).with_context(|| format!("Failed to write config file: {}", path.display()))?;

    tracing::debug!("Saved config to: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_writes_defaults() -> Result<()> {
        let temp_dir = tempdir()?;
        let path = temp_dir.path().join("nested").join(CONFIG_FILE);

        let config: NetworkConfig = load_or_create(&path)?;
        assert_eq!(config, NetworkConfig::default());
        assert!(path.exists());

        let reloaded: NetworkConfig = load_or_create(&path)?;
        assert_eq!(reloaded, config);
        Ok(())
    }

    #[test]
    fn partial_file_fills_defaults() -> Result<()> {
        let temp_dir = tempdir()?;
        let path = temp_dir.path().join(CONFIG_FILE);
        fs::write(&path, "server_addr = \"game.example:9000\"\n")?;

        let config: NetworkConfig = load_or_create(&path)?;
        assert_eq!(config.server_addr, "game.example:9000");
        assert_eq!(config.connect_timeout(), Duration::from_secs(10));
        assert_eq!(config.max_line_bytes, 64 * 1024);
        Ok(())
    }

    #[test]
    fn malformed_file_is_an_error() -> Result<()> {
        let temp_dir = tempdir()?;
        let path = temp_dir.path().join(CONFIG_FILE);
        fs::write(&path, "server_addr = [")?;

        let err = load_or_create::<NetworkConfig>(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
        Ok(())
    }
}
