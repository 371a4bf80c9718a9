mod types;

pub use types::*;

use crate::{Error, Result};
use std::env;
use tracing::{debug, warn};

const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Loads the configuration file named by `CONFIG_PATH` (or `config.yaml`)
/// and applies the `GEMINI_API_KEY` and `PORT` environment overrides.
pub async fn load() -> Result<Config> {
    let explicit_path = env::var("CONFIG_PATH").ok();
    let mut config = load_file(explicit_path.as_deref()).await?;

    config.apply_overrides(env::var("GEMINI_API_KEY").ok(), env::var("PORT").ok())?;

    Ok(config)
}

/// Reads a YAML config. With no explicit path a missing `config.yaml` is not
/// an error and the built-in defaults are used.
pub async fn load_file(path: Option<&str>) -> Result<Config> {
    let config_path = path.unwrap_or(DEFAULT_CONFIG_PATH);

    debug!("Loading configuration from: {}", config_path);

    let config_str = match tokio::fs::read_to_string(config_path).await {
        Ok(s) => s,
        Err(e) if path.is_none() && e.kind() == std::io::ErrorKind::NotFound => {
            debug!("No {} found, using defaults", config_path);
            return Ok(Config::default());
        }
        Err(e) => return Err(e.into()),
    };

    // An empty file is valid YAML for "all defaults".
    if config_str.trim().is_empty() {
        return Ok(Config::default());
    }

    let config: Config = serde_yaml::from_str(&config_str)?;
    Ok(config)
}

impl Config {
    /// Warns when no API key is configured. Returns whether one is present.
    /// Call after the tracing subscriber is installed.
    pub fn check_api_key(&self) -> bool {
        if self.imagen.api_key.is_empty() {
            warn!("GEMINI_API_KEY is not set; upstream requests will be rejected");
            return false;
        }
        true
    }

    pub fn apply_overrides(&mut self, api_key: Option<String>, port: Option<String>) -> Result<()> {
        if let Some(key) = api_key {
            self.imagen.api_key = key;
        }

        if let Some(port) = port {
            self.server.port = port
                .trim()
                .parse()
                .map_err(|_| Error::config(format!("Invalid PORT value: '{}'", port)))?;
        }

        Ok(())
    }
}
