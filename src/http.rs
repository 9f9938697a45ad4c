use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};

use crate::error::DoubanError;

pub const DEFAULT_USER_AGENT: &str = concat!("douban-client/", env!("CARGO_PKG_VERSION"));

/// Settings shared by the token endpoint and resource HTTP clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpSettings {
    /// Deadline applied to every request, connect through body read.
    pub timeout: Option<Duration>,
    pub user_agent: String,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl HttpSettings {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn build_client(&self) -> Result<reqwest::Client, DoubanError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            reqwest::header::ACCEPT,
            HeaderValue::from_static("application/json"),
        );

        let mut builder = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(self.user_agent.as_str());
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        builder
            .build()
            .map_err(|e| DoubanError::Transport(Box::new(e)))
    }
}
