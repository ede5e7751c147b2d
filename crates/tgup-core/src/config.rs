use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::Deserialize;

use crate::{errors::Error, Result};

/// Database file kept next to the config file.
pub const DATABASE_FILE_NAME: &str = "tg-upload.db";

const DEFAULT_SEND_INTERVAL_MS: u64 = 2_000;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 600;

/// On-disk YAML layout.
#[derive(Debug, Deserialize)]
struct ConfigFile {
    api_id: i32,
    api_hash: String,
    bot_token: String,
    #[serde(default)]
    send_interval_ms: Option<u64>,
    #[serde(default)]
    request_timeout_secs: Option<u64>,
}

/// Typed configuration.
#[derive(Clone, Debug)]
pub struct Config {
    // Telegram credentials
    pub api_id: i32,
    pub api_hash: String,
    pub bot_token: String,

    // Runtime constants
    pub send_interval: Duration,
    pub request_timeout: Duration,

    // Persisted state
    pub database_path: PathBuf,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("failed to read config {}: {e}", path.display()))
        })?;
        let dir = path.parent().unwrap_or_else(|| Path::new(""));
        Self::from_yaml(&contents, dir)
    }

    /// Parse config text; `dir` is where the database file lives.
    pub fn from_yaml(contents: &str, dir: &Path) -> Result<Self> {
        let raw: ConfigFile = serde_yaml::from_str(contents)?;

        if raw.bot_token.trim().is_empty() {
            return Err(Error::Config("bot_token must not be empty".to_string()));
        }
        if raw.api_hash.trim().is_empty() {
            return Err(Error::Config("api_hash must not be empty".to_string()));
        }

        Ok(Self {
            api_id: raw.api_id,
            api_hash: raw.api_hash,
            bot_token: raw.bot_token.trim().to_string(),
            send_interval: Duration::from_millis(
                raw.send_interval_ms.unwrap_or(DEFAULT_SEND_INTERVAL_MS),
            ),
            request_timeout: Duration::from_secs(
                raw.request_timeout_secs
                    .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
            ),
            database_path: dir.join(DATABASE_FILE_NAME),
        })
    }
}
