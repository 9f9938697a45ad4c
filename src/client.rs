use std::sync::Arc;

use bytes::Bytes;
use reqwest::header::AUTHORIZATION;
use tracing::debug;

use crate::error::DoubanError;
use crate::http::HttpSettings;
use crate::oauth::TokenManager;

/// Issues authenticated GET requests against the Douban API host.
///
/// The access token is read from the shared [`TokenManager`] on every call, so
/// a refresh performed elsewhere takes effect on the next request.
#[derive(Debug, Clone)]
pub struct ResourceClient {
    http: reqwest::Client,
    tokens: Arc<TokenManager>,
}

impl ResourceClient {
    pub fn new(tokens: Arc<TokenManager>) -> Result<Self, DoubanError> {
        Self::with_settings(tokens, &HttpSettings::default())
    }

    pub fn with_settings(tokens: Arc<TokenManager>, settings: &HttpSettings) -> Result<Self, DoubanError> {
        Ok(Self::with_client(tokens, settings.build_client()?))
    }

    pub fn with_client(tokens: Arc<TokenManager>, http: reqwest::Client) -> Self {
        Self { http, tokens }
    }

    pub fn tokens(&self) -> &Arc<TokenManager> {
        &self.tokens
    }

    /// GET `{api_host}{path}` and return the raw body.
    ///
    /// The status code is not inspected: a 4xx/5xx response with an error
    /// payload comes back as `Ok` with those bytes. Only transport failures
    /// are errors.
    pub async fn get(&self, path: &str) -> Result<Bytes, DoubanError> {
        let access_token = self.tokens.access_token().ok_or(DoubanError::AuthRequired)?;
        let url = self.tokens.endpoints().api_url(path)?;

        let resp = self
            .http
            .get(url)
            .header(AUTHORIZATION, format!("Bearer {access_token}"))
            .send()
            .await
            .map_err(|e| request_error(path, e))?;

        let status = resp.status();
        let body = resp.bytes().await.map_err(|e| request_error(path, e))?;
        debug!(path, %status, bytes = body.len(), "Resource response");
        Ok(body)
    }
}

fn request_error(path: &str, source: reqwest::Error) -> DoubanError {
    DoubanError::Request {
        path: path.to_string(),
        source: Box::new(source),
    }
}
