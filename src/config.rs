use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub tvdb: TvdbConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub database_path: String,

    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        let db_path = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("seriarr")
            .join("seriarr.db");

        Self {
            database_path: format!("sqlite:{}", db_path.display()),
            log_level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TvdbConfig {
    pub base_url: String,

    pub api_key: String,
}

impl Default for TvdbConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.thetvdb.com".to_string(),
            api_key: String::new(),
        }
    }
}

impl Config {
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("seriarr")
            .join("config.toml")
    }

    /// Loads the config file, falling back to defaults when it does not exist.
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file at {}", path.display()))?;

        let config: Self = toml::from_str(&contents).context("Failed to parse config file")?;

        Ok(config)
    }

    pub fn create_default_if_missing() -> Result<()> {
        let path = Self::config_path();
        if path.exists() {
            return Ok(());
        }

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(&Self::default())?;
        std::fs::write(&path, contents)
            .with_context(|| format!("Failed to write config file at {}", path.display()))?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.tvdb.base_url).context("Invalid TVDB base URL")?;

        if self.general.database_path.is_empty() {
            anyhow::bail!("database_path must not be empty");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn bad_base_url_is_rejected() {
        let mut config = Config::default();
        config.tvdb.base_url = "not a url".to_string();
        assert!(config.validate().is_err());
    }
}
