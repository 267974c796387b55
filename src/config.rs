use std::path::PathBuf;

use directories::ProjectDirs;
use serde::Deserialize;

use crate::error::{RedmineError, Result};

pub const URL_ENV: &str = "REDMINE_URL";
pub const API_KEY_ENV: &str = "REDMINE_API_KEY";

#[derive(Deserialize, Default, Debug)]
pub struct Config {
    pub url: Option<String>,
    pub api_key: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            return Ok(Config::default());
        }

        let contents =
            std::fs::read_to_string(&config_path).map_err(|e| RedmineError::ConfigRead {
                path: config_path.clone(),
                source: e,
            })?;

        toml::from_str(&contents).map_err(|e| RedmineError::ConfigParse {
            path: config_path,
            source: e,
        })
    }

    pub fn config_path() -> Result<PathBuf> {
        ProjectDirs::from("", "", "redmine")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .ok_or(RedmineError::NoConfigDir)
    }

    /// Get API key with env var taking precedence over config file
    pub fn api_key(&self) -> Result<String> {
        resolve(std::env::var(API_KEY_ENV).ok(), self.api_key.as_deref())
            .ok_or(RedmineError::MissingApiKey)
    }

    /// Get the server URL with env var taking precedence over config file
    pub fn url(&self) -> Result<String> {
        resolve(std::env::var(URL_ENV).ok(), self.url.as_deref())
            .ok_or(RedmineError::MissingEndpoint)
    }
}

fn resolve(env: Option<String>, file: Option<&str>) -> Option<String> {
    env.filter(|v| !v.trim().is_empty())
        .or_else(|| file.map(String::from))
        .filter(|v| !v.trim().is_empty())
}
