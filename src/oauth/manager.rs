use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Utc};
use reqwest::Url;
use tracing::{debug, info};

use crate::error::DoubanError;
use crate::http::HttpSettings;
use crate::oauth::credentials::{Credentials, Endpoints};
use crate::oauth::token::Token;

#[derive(Debug)]
struct TokenState {
    token: Token,
    installed_at: DateTime<Utc>,
}

impl TokenState {
    fn new(token: Token) -> Arc<Self> {
        Arc::new(Self {
            token,
            installed_at: Utc::now(),
        })
    }

    fn expires_at(&self) -> Option<DateTime<Utc>> {
        let lifetime = chrono::Duration::try_seconds(self.token.expires_in()?)?;
        self.installed_at.checked_add_signed(lifetime)
    }
}

/// Owns the OAuth2 client credentials and the live token.
///
/// The token is swapped as a whole behind an `Arc`, so concurrent readers see
/// either the previous token or its replacement. Code exchange and refresh
/// are serialized against each other.
#[derive(Debug)]
pub struct TokenManager {
    http: reqwest::Client,
    credentials: Credentials,
    endpoints: Endpoints,
    current: RwLock<Option<Arc<TokenState>>>,
    update: tokio::sync::Mutex<()>,
}

impl TokenManager {
    /// Manager against the public Douban hosts with default HTTP settings.
    pub fn new(credentials: Credentials) -> Result<Self, DoubanError> {
        Self::with_options(credentials, Endpoints::default(), &HttpSettings::default())
    }

    pub fn with_options(
        credentials: Credentials,
        endpoints: Endpoints,
        settings: &HttpSettings,
    ) -> Result<Self, DoubanError> {
        Ok(Self::with_client(credentials, endpoints, settings.build_client()?))
    }

    pub fn with_client(credentials: Credentials, endpoints: Endpoints, http: reqwest::Client) -> Self {
        Self {
            http,
            credentials,
            endpoints,
            current: RwLock::new(None),
            update: tokio::sync::Mutex::new(()),
        }
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// URL the user visits to grant access. No network call is made.
    pub fn authorization_url(&self) -> Url {
        let mut url = self.endpoints.authorize_url();
        url.query_pairs_mut()
            .append_pair("client_id", self.credentials.client_id())
            .append_pair("redirect_uri", self.credentials.redirect_uri())
            .append_pair("response_type", "code")
            .append_pair("scope", &self.credentials.joined_scope());
        url
    }

    /// Authorization URL carrying an opaque `state` value echoed back on redirect.
    pub fn authorization_url_with_state(&self, state: &str) -> Url {
        let mut url = self.authorization_url();
        url.query_pairs_mut().append_pair("state", state);
        url
    }

    /// Install a previously obtained token, bypassing the handshake.
    pub fn set_token(&self, token: Token) {
        self.install(token);
    }

    pub fn token(&self) -> Option<Token> {
        self.snapshot().map(|state| state.token.clone())
    }

    pub fn access_token(&self) -> Option<String> {
        self.snapshot()
            .and_then(|state| state.token.access_token().map(str::to_string))
    }

    /// When the current token lapses, if it declared a lifetime.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.snapshot().and_then(|state| state.expires_at())
    }

    /// `false` when there is no token or it carries no `expires_in`.
    pub fn is_expired(&self) -> bool {
        self.expires_at().is_some_and(|at| Utc::now() >= at)
    }

    /// Exchange an authorization code for a token and store it.
    ///
    /// On failure the previously stored token, if any, is kept.
    pub async fn exchange_code(&self, code: &str) -> Result<Token, DoubanError> {
        let _guard = self.update.lock().await;
        let token = self
            .request_token(
                "authorization_code",
                &[
                    ("client_id", self.credentials.client_id()),
                    ("client_secret", self.credentials.client_secret()),
                    ("redirect_uri", self.credentials.redirect_uri()),
                    ("grant_type", "authorization_code"),
                    ("code", code),
                ],
            )
            .await?;
        self.install(token.clone());
        info!(expires_in = ?token.expires_in(), "Exchanged authorization code for access token");
        Ok(token)
    }

    /// Trade the stored refresh token for a new token, replacing the old one
    /// wholesale.
    pub async fn refresh_token(&self) -> Result<Token, DoubanError> {
        let _guard = self.update.lock().await;
        self.refresh_locked().await
    }

    /// Refresh only when the current token has lapsed. Returns whether a
    /// refresh happened.
    ///
    /// Expiry is checked again under the update lock, so callers racing on
    /// the same lapsed token trigger a single refresh.
    pub async fn refresh_if_expired(&self) -> Result<bool, DoubanError> {
        if !self.is_expired() {
            return Ok(false);
        }
        let _guard = self.update.lock().await;
        if !self.is_expired() {
            return Ok(false);
        }
        self.refresh_locked().await?;
        Ok(true)
    }

    // Caller holds `update`.
    async fn refresh_locked(&self) -> Result<Token, DoubanError> {
        let refresh = self
            .snapshot()
            .and_then(|state| state.token.refresh_token().map(str::to_string))
            .ok_or_else(|| {
                DoubanError::Auth("No refresh_token available; authorize first".to_string())
            })?;

        let token = self
            .request_token(
                "refresh_token",
                &[
                    ("client_id", self.credentials.client_id()),
                    ("client_secret", self.credentials.client_secret()),
                    ("redirect_uri", self.credentials.redirect_uri()),
                    ("grant_type", "refresh_token"),
                    ("refresh_token", refresh.as_str()),
                ],
            )
            .await?;
        self.install(token.clone());
        info!(expires_in = ?token.expires_in(), "Refreshed access token");
        Ok(token)
    }

    async fn request_token(
        &self,
        grant_type: &str,
        form: &[(&str, &str)],
    ) -> Result<Token, DoubanError> {
        let resp = self
            .http
            .post(self.endpoints.token_url())
            .form(form)
            .send()
            .await
            .map_err(|e| DoubanError::Auth(format!("Token request ({grant_type}) failed: {e}")))?;

        let status = resp.status();
        debug!(grant_type, %status, "Token endpoint responded");
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(DoubanError::Auth(format!(
                "Token request ({grant_type}) failed with status {status}: {body}"
            )));
        }

        let body = resp.bytes().await.map_err(|e| {
            DoubanError::Auth(format!("Failed to read token response: {e}"))
        })?;
        Token::from_slice(&body)
    }

    fn snapshot(&self) -> Option<Arc<TokenState>> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn install(&self, token: Token) {
        let state = TokenState::new(token);
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Some(state);
    }
}
