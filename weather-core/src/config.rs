use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

/// Environment variable (or `.env` entry) holding the OpenWeatherMap key.
pub const API_KEY_VAR: &str = "OPENWEATHER_API_KEY";

/// Credentials for the OpenWeatherMap API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub api_key: String,
}

/// Configuration stored on disk.
///
/// Example TOML:
/// [openweather]
/// api_key = "..."
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub openweather: Option<ProviderConfig>,
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(path)
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-task", "weather-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.openweather = Some(ProviderConfig { api_key });
    }

    /// API key stored in the file, if any.
    pub fn api_key(&self) -> Option<&str> {
        self.openweather
            .as_ref()
            .map(|cfg| cfg.api_key.trim())
            .filter(|key| !key.is_empty())
    }

    /// Pick the API key: a non-blank environment value beats the file.
    pub fn resolve_api_key(&self, from_env: Option<String>) -> Result<String> {
        let from_env = from_env.map(|k| k.trim().to_string()).filter(|k| !k.is_empty());

        if let Some(key) = from_env {
            debug!("using API key from environment");
            return Ok(key);
        }

        self.api_key().map(str::to_owned).ok_or_else(|| {
            anyhow!(
                "No OpenWeatherMap API key configured.\n\
                 Hint: set {API_KEY_VAR} in a .env file or the environment, \
                 or run `weather configure`."
            )
        })
    }
}

/// Read `.env` (if there is one) into the process environment.
///
/// A missing file is fine; a malformed one is not.
pub fn load_dotenv() -> Result<()> {
    match dotenvy::dotenv() {
        Ok(path) => debug!(path = %path.display(), "loaded .env file"),
        Err(err) if err.not_found() => debug!("no .env file found"),
        Err(err) => return Err(err).context("Failed to load .env file"),
    }
    Ok(())
}

/// Resolve the API key from `.env`, the environment, then the config file.
pub fn load_api_key() -> Result<String> {
    load_dotenv()?;
    let from_env = std::env::var(API_KEY_VAR).ok();
    Config::load()?.resolve_api_key(from_env)
}
