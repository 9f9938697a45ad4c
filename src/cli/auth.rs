use std::path::Path;
use std::time::Duration;

use serde_json::{Map, Value};
use tracing::warn;

use crate::error::DoubanError;
use crate::oauth::{generate_state, listen_for_callback, CallbackTarget, Token, TokenManager};

/// Where a previously obtained token can come from on the command line.
#[derive(Debug, Clone, Default)]
pub struct TokenSources<'a> {
    pub token_file: Option<&'a Path>,
    pub access_token: Option<&'a str>,
    pub refresh_token: Option<&'a str>,
}

impl TokenSources<'_> {
    /// Combine the token file with individual overrides. `None` when no
    /// source was given.
    pub fn resolve(&self) -> Result<Option<Token>, DoubanError> {
        let mut fields = match self.token_file {
            Some(path) => read_token_file(path)?,
            None => Map::new(),
        };
        if let Some(access) = self.access_token {
            fields.insert("access_token".into(), Value::String(access.to_string()));
        }
        if let Some(refresh) = self.refresh_token {
            fields.insert("refresh_token".into(), Value::String(refresh.to_string()));
        }
        if fields.is_empty() {
            return Ok(None);
        }
        Ok(Some(Token::new(fields)))
    }
}

fn read_token_file(path: &Path) -> Result<Map<String, Value>, DoubanError> {
    let data = std::fs::read_to_string(path)?;
    match serde_json::from_str(&data) {
        Ok(Value::Object(fields)) => Ok(fields),
        Ok(_) => Err(DoubanError::Auth(format!(
            "Token file {} does not hold a JSON object",
            path.display()
        ))),
        Err(e) => Err(DoubanError::Auth(format!(
            "Failed to parse token file {}: {e}",
            path.display()
        ))),
    }
}

/// Run the browser round trip: open the authorization URL, wait for the
/// redirect on the loopback redirect URI, and exchange the code.
pub async fn run_login(
    tokens: &TokenManager,
    timeout: Duration,
    open_browser: bool,
) -> Result<Token, DoubanError> {
    let target = CallbackTarget::from_redirect_uri(tokens.credentials().redirect_uri())?;
    let state = generate_state();
    let auth_url = tokens.authorization_url_with_state(&state);

    if !open_browser || webbrowser::open(auth_url.as_str()).is_err() {
        if open_browser {
            warn!("Could not open browser automatically");
        }
        eprintln!("Open this URL to authorize:\n{auth_url}");
    }

    let code = listen_for_callback(&target, &state, timeout).await?;
    tokens.exchange_code(&code).await
}
