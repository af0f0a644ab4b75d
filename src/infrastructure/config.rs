use crate::domain::{DEFAULT_MODEL, ReportError, ReportResult};
use std::collections::HashMap;
use std::env;
use std::fmt;
use std::path::Path;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

#[derive(Clone)]
pub struct Config {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl Config {
    /// Loads `.env` if present, then reads the process environment.
    pub fn from_env() -> ReportResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads configuration from a dotenv-style file only.
    pub fn from_env_file(path: &Path) -> ReportResult<Self> {
        let iter = dotenvy::from_path_iter(path)
            .map_err(|e| ReportError::Configuration(format!("cannot read {}: {e}", path.display())))?;
        let mut values = HashMap::new();
        for item in iter {
            let (key, value) = item.map_err(|e| {
                ReportError::Configuration(format!("invalid line in {}: {e}", path.display()))
            })?;
            values.insert(key, value);
        }
        Self::from_lookup(|key| values.get(key).cloned())
    }

    pub fn from_lookup<F>(lookup: F) -> ReportResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("API_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                ReportError::Configuration("API_KEY environment variable not set".to_string())
            })?;

        Ok(Self {
            api_key,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }
}
