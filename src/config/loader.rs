use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::DoubanError;

use super::env::expand_client_config;
use super::types::ClientConfig;

/// Values supplied on the command line or through `DOUBAN_*` variables.
/// Each one that is set wins over the config file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub redirect_uri: Option<String>,
    pub scope: Option<Vec<String>>,
}

impl ConfigOverrides {
    pub fn apply(self, config: &mut ClientConfig) {
        if self.client_id.is_some() {
            config.client_id = self.client_id;
        }
        if self.client_secret.is_some() {
            config.client_secret = self.client_secret;
        }
        if self.redirect_uri.is_some() {
            config.redirect_uri = self.redirect_uri;
        }
        if let Some(scope) = self.scope {
            config.scope = scope;
        }
    }
}

/// Resolve which config file to read.
///
/// Precedence:
/// 1. `--config` CLI flag (must exist)
/// 2. `DOUBAN_CONFIG` env var (must exist)
/// 3. `~/.douban/config.json` (optional)
pub fn config_path(cli_config: Option<&str>) -> Option<(PathBuf, bool)> {
    if let Some(path) = cli_config {
        return Some((PathBuf::from(path), true));
    }
    if let Ok(env_path) = std::env::var("DOUBAN_CONFIG") {
        if !env_path.is_empty() {
            return Some((PathBuf::from(env_path), true));
        }
    }
    dirs::home_dir().map(|home| (home.join(".douban").join("config.json"), false))
}

/// Load a single config file.
pub fn load_config_file(path: &Path) -> Result<ClientConfig, DoubanError> {
    let content = std::fs::read_to_string(path).map_err(|e| DoubanError::Config {
        path: path.to_path_buf(),
        detail: format!("Cannot read file: {e}"),
    })?;

    let mut config: ClientConfig =
        serde_json::from_str(&content).map_err(|e| DoubanError::Config {
            path: path.to_path_buf(),
            detail: format!("Invalid JSON: {e}"),
        })?;
    config.source = Some(path.to_path_buf());
    Ok(config)
}

/// Load the config file (if any), apply overrides, and expand environment
/// variables.
///
/// An explicitly named file that cannot be read is an error; a missing
/// default file yields an empty config.
pub fn load_config(
    cli_config: Option<&str>,
    overrides: ConfigOverrides,
) -> Result<ClientConfig, DoubanError> {
    let mut config = match config_path(cli_config) {
        Some((path, true)) => load_config_file(&path)?,
        Some((path, false)) if path.exists() => load_config_file(&path)?,
        _ => ClientConfig::default(),
    };
    debug!(source = ?config.source, "Loaded client config");

    overrides.apply(&mut config);
    expand_client_config(&mut config)?;
    Ok(config)
}
