//! Client configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use url::Url;

use crate::error::CoreError;
use crate::Result;

pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";

/// Environment variable overriding [`Config::api_base_url`]
pub const API_URL_ENV: &str = "STUDYBUDDY_API_URL";
/// Environment variable overriding the data directory
pub const DATA_DIR_ENV: &str = "STUDYBUDDY_DATA_DIR";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// REST API root, e.g. `http://localhost:5000/api`
    pub api_base_url: String,
    /// Path to the local storage database file
    pub database_path: PathBuf,
}

impl Config {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            database_path: data_dir.join("studybuddy.db"),
        }
    }

    /// Defaults with `STUDYBUDDY_API_URL` and `STUDYBUDDY_DATA_DIR` applied
    pub fn from_env() -> Result<Self> {
        Self::resolve(
            std::env::var(API_URL_ENV).ok(),
            std::env::var(DATA_DIR_ENV).ok().map(PathBuf::from),
        )
    }

    /// Defaults with the given overrides applied. Empty values are ignored.
    pub fn resolve(api_url: Option<String>, data_dir: Option<PathBuf>) -> Result<Self> {
        let data_dir = data_dir
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or_else(Self::data_dir);

        let mut config = Self::new(data_dir);
        if let Some(api_url) = api_url.filter(|url| !url.trim().is_empty()) {
            config.api_base_url = api_url.trim().to_string();
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.api_base_url)
            .map_err(|e| CoreError::Config(format!("invalid API URL {}: {e}", self.api_base_url)))?;

        match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(CoreError::Config(format!(
                "unsupported API URL scheme: {scheme}"
            ))),
        }
    }

    pub fn data_dir() -> PathBuf {
        dirs::data_local_dir()
            .map(|d| d.join("StudyBuddy"))
            .unwrap_or_else(|| PathBuf::from(".studybuddy"))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(Self::data_dir())
    }
}

mod dirs {
    use std::path::PathBuf;

    pub fn data_local_dir() -> Option<PathBuf> {
        #[cfg(target_os = "windows")]
        {
            std::env::var("LOCALAPPDATA").ok().map(PathBuf::from)
        }
        #[cfg(target_os = "macos")]
        {
            std::env::var("HOME")
                .ok()
                .map(|h| PathBuf::from(h).join("Library/Application Support"))
        }
        #[cfg(target_os = "linux")]
        {
            std::env::var("XDG_DATA_HOME")
                .ok()
                .map(PathBuf::from)
                .or_else(|| {
                    std::env::var("HOME")
                        .ok()
                        .map(|h| PathBuf::from(h).join(".local/share"))
                })
        }
        #[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
        {
            None
        }
    }
}
