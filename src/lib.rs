pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod oauth;
pub mod resources;
pub mod urlencode;

use std::sync::Arc;

pub use client::ResourceClient;
pub use config::{load_config, ClientConfig, ConfigOverrides};
pub use error::DoubanError;
pub use http::HttpSettings;
pub use oauth::{Credentials, Endpoints, Token, TokenManager};
pub use urlencode::urlencode;

/// Build a token manager and a resource client sharing one HTTP connection
/// pool from a loaded config.
pub fn client_from_config(config: &ClientConfig) -> Result<ResourceClient, DoubanError> {
    let http = config.http_settings().build_client()?;
    let tokens = TokenManager::with_client(config.credentials()?, config.endpoints()?, http.clone());
    Ok(ResourceClient::with_client(Arc::new(tokens), http))
}
