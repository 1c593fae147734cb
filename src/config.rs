//! Application configuration.

use crate::consts::dashboard_consts::{API_URL_ENV, APP_DIR, CONFIG_FILE, DEFAULT_API_URL};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the marketplace backend, without a trailing `/api`.
    pub api_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Config::new(DEFAULT_API_URL.to_string())
    }
}

impl Config {
    /// Create Config with the given API URL.
    pub fn new(api_url: String) -> Self {
        Config { api_url }
    }

    /// Loads configuration from a JSON file at the given path.
    ///
    /// # Errors
    /// Returns an `std::io::Error` if reading from file fails or JSON is invalid.
    pub fn load_from_file(path: &Path) -> Result<Self, std::io::Error> {
        let buf = fs::read(path)?;
        let config: Config = serde_json::from_slice(&buf)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        Ok(config)
    }

    /// Saves the configuration to a JSON file at the given path.
    ///
    /// Directories will be created if they don't exist. This method overwrites existing files.
    ///
    /// # Errors
    /// Returns an `std::io::Error` if writing to file fails or serialization fails.
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("Serialization failed: {}", e),
            )
        })?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Resolves the effective API URL.
    ///
    /// Precedence: explicit flag, then `NANNY_API_URL`, then the config file,
    /// then the built-in default.
    pub fn resolve_api_url(flag: Option<String>, config_path: &Path) -> String {
        if let Some(url) = flag.filter(|u| !u.trim().is_empty()) {
            return url;
        }
        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                return url;
            }
        }
        match Config::load_from_file(config_path) {
            Ok(config) if !config.api_url.trim().is_empty() => config.api_url,
            Ok(_) => DEFAULT_API_URL.to_string(),
            Err(e) => {
                if config_path.exists() {
                    log::warn!("Ignoring unreadable config {}: {}", config_path.display(), e);
                }
                DEFAULT_API_URL.to_string()
            }
        }
    }
}

/// Directory holding the config file and session storage.
pub fn get_app_dir() -> Result<PathBuf, std::io::Error> {
    let home = home::home_dir().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not determine the home directory",
        )
    })?;
    Ok(home.join(APP_DIR))
}

/// Path of the config file, `~/.nanny/config.json`.
pub fn get_config_path() -> Result<PathBuf, std::io::Error> {
    Ok(get_app_dir()?.join(CONFIG_FILE))
}
