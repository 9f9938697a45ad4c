use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::DoubanError;
use crate::http::{HttpSettings, DEFAULT_USER_AGENT};
use crate::oauth::{Credentials, Endpoints, API_HOST, AUTH_HOST};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    #[serde(default)]
    pub client_id: Option<String>,
    #[serde(default)]
    pub client_secret: Option<String>,
    #[serde(default)]
    pub redirect_uri: Option<String>,
    #[serde(default)]
    pub scope: Vec<String>,
    #[serde(default)]
    pub auth_host: Option<String>,
    #[serde(default)]
    pub api_host: Option<String>,
    #[serde(default)]
    pub timeout_ms: Option<u64>,
    #[serde(default)]
    pub user_agent: Option<String>,
    /// Where this config was read from, for error messages.
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl ClientConfig {
    pub fn credentials(&self) -> Result<Credentials, DoubanError> {
        Ok(Credentials::new(
            self.require(&self.client_id, "clientId")?,
            self.require(&self.client_secret, "clientSecret")?,
            self.require(&self.redirect_uri, "redirectUri")?,
            self.scope.clone(),
        ))
    }

    pub fn endpoints(&self) -> Result<Endpoints, DoubanError> {
        Endpoints::new(
            self.auth_host.as_deref().unwrap_or(AUTH_HOST),
            self.api_host.as_deref().unwrap_or(API_HOST),
        )
    }

    pub fn http_settings(&self) -> HttpSettings {
        HttpSettings {
            timeout: self.timeout_ms.map(Duration::from_millis),
            user_agent: self
                .user_agent
                .clone()
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
        }
    }

    fn require(&self, value: &Option<String>, field: &str) -> Result<String, DoubanError> {
        match value.as_deref() {
            Some(v) if !v.is_empty() => Ok(v.to_string()),
            _ => Err(DoubanError::Config {
                path: self
                    .source
                    .clone()
                    .unwrap_or_else(|| PathBuf::from("<config>")),
                detail: format!("missing {field}"),
            }),
        }
    }
}
