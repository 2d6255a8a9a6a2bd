//! Configuration management for sportrend.
//!
//! Values come from environment variables, optionally seeded from a `.env`
//! file in the local data directory:
//! - Linux: `~/.local/share/sportrend/.env`
//! - macOS: `~/Library/Application Support/sportrend/.env`
//! - Windows: `%LOCALAPPDATA%/sportrend/.env`
//!
//! Environment variables that are already set take priority over the file.

use std::{env, path::PathBuf, time::Duration};

use crate::{errors::ConfigError, language::Language};

pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(300);

/// Well-known artists seeding the baseline artist list.
pub const POPULAR_ARTISTS: [&str; 8] = [
    "Taylor Swift",
    "The Weeknd",
    "Bad Bunny",
    "Drake",
    "Arijit Singh",
    "BTS",
    "Ed Sheeran",
    "Billie Eilish",
];

/// Loads environment variables from `sportrend/.env` in the local data directory.
///
/// The directory is created if needed. A missing file is fine, every setting
/// can come from the process environment instead; a malformed one is an error.
pub async fn load_env() -> Result<(), ConfigError> {
    let path = env_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent).await?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| ConfigError::EnvFile(e.to_string()))?;
    }
    Ok(())
}

pub fn env_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("sportrend/.env");
    path
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub client_id: String,
    pub client_secret: String,
    pub api_url: String,
    pub token_url: String,
    pub language: Language,
    pub refresh_interval: Duration,
    pub roster: Vec<String>,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        let language = match optional("SPORTREND_LANGUAGE") {
            Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
                key: "SPORTREND_LANGUAGE",
                value,
            })?,
            None => Language::default(),
        };

        let refresh_interval = match optional("SPORTREND_REFRESH_INTERVAL") {
            Some(value) => parse_interval(&value).ok_or(ConfigError::Invalid {
                key: "SPORTREND_REFRESH_INTERVAL",
                value,
            })?,
            None => DEFAULT_REFRESH_INTERVAL,
        };

        Ok(Self {
            client_id: required("SPOTIFY_API_AUTH_CLIENT_ID")?,
            client_secret: required("SPOTIFY_API_AUTH_CLIENT_SECRET")?,
            api_url: optional("SPOTIFY_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            token_url: optional("SPOTIFY_API_TOKEN_URL")
                .unwrap_or_else(|| DEFAULT_TOKEN_URL.to_string()),
            language,
            refresh_interval,
            roster: POPULAR_ARTISTS.iter().map(|name| name.to_string()).collect(),
        })
    }
}

/// Parses a refresh interval in whole seconds. Zero is rejected.
pub fn parse_interval(value: &str) -> Option<Duration> {
    match value.trim().parse::<u64>() {
        Ok(0) | Err(_) => None,
        Ok(secs) => Some(Duration::from_secs(secs)),
    }
}

fn required(key: &'static str) -> Result<String, ConfigError> {
    optional(key).ok_or(ConfigError::Missing(key))
}

fn optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}
