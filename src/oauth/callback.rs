use std::time::Duration;

use reqwest::Url;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tracing::debug;

use crate::error::DoubanError;

/// Loopback address and path the redirect URI points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackTarget {
    pub port: u16,
    pub path: String,
}

impl CallbackTarget {
    /// Derive the listener target from a redirect URI.
    ///
    /// Only `http://localhost` / `127.0.0.1` redirect URIs can be served
    /// locally.
    pub fn from_redirect_uri(redirect_uri: &str) -> Result<Self, DoubanError> {
        let url = Url::parse(redirect_uri).map_err(|e| {
            DoubanError::Auth(format!("Invalid redirect URI '{redirect_uri}': {e}"))
        })?;
        let loopback = matches!(url.host_str(), Some("localhost" | "127.0.0.1"));
        if url.scheme() != "http" || !loopback {
            return Err(DoubanError::Auth(format!(
                "Redirect URI '{redirect_uri}' is not a local http:// address; \
                 open the authorization URL manually and run `douban exchange <code>`"
            )));
        }
        Ok(Self {
            port: url.port().unwrap_or(80),
            path: url.path().to_string(),
        })
    }
}

/// Wait for the OAuth redirect and return the authorization code.
///
/// The `state` query parameter must match `expected_state`.
pub async fn listen_for_callback(
    target: &CallbackTarget,
    expected_state: &str,
    timeout: Duration,
) -> Result<String, DoubanError> {
    let listener = TcpListener::bind(("127.0.0.1", target.port)).await?;
    debug!(port = target.port, path = %target.path, "Waiting for OAuth callback");

    let accept_future = async {
        let (mut stream, _) = listener.accept().await?;

        let mut buf = vec![0u8; 4096];
        let n = stream.read(&mut buf).await?;
        let request = String::from_utf8_lossy(&buf[..n]);

        let outcome = parse_callback(&request, &target.path, expected_state);
        let body = match &outcome {
            Ok(_) => {
                "<!DOCTYPE html><html><body><h1>Authorization complete</h1>\
                 <p>You can close this window and return to the terminal.</p></body></html>"
            }
            Err(_) => {
                "<!DOCTYPE html><html><body><h1>Authorization failed</h1>\
                 <p>See the terminal for details.</p></body></html>"
            }
        };
        let response = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: text/html; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            body.len(),
            body
        );
        stream.write_all(response.as_bytes()).await?;
        stream.shutdown().await?;

        outcome
    };

    tokio::time::timeout(timeout, accept_future)
        .await
        .map_err(|_| {
            DoubanError::Auth(format!(
                "Timed out waiting for OAuth callback after {}s",
                timeout.as_secs()
            ))
        })?
}

fn parse_callback(request: &str, expected_path: &str, expected_state: &str) -> Result<String, DoubanError> {
    // "GET /callback?code=...&state=... HTTP/1.1"
    let target = request
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .ok_or_else(|| DoubanError::Auth("Malformed OAuth callback request".to_string()))?;
    let (path, query) = target.split_once('?').unwrap_or((target, ""));
    if path != expected_path {
        return Err(DoubanError::Auth(format!(
            "OAuth callback arrived on unexpected path '{path}'"
        )));
    }

    let mut code = None;
    let mut state = None;
    let mut error = None;
    for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
        match &*key {
            "code" if !value.is_empty() => code = Some(value.into_owned()),
            "state" => state = Some(value.into_owned()),
            "error" => error = Some(value.into_owned()),
            _ => {}
        }
    }

    if let Some(error) = error {
        return Err(DoubanError::Auth(format!("Authorization denied: {error}")));
    }
    if state.as_deref() != Some(expected_state) {
        return Err(DoubanError::Auth(
            "OAuth callback state does not match the request".to_string(),
        ));
    }
    code.ok_or_else(|| {
        DoubanError::Auth("No authorization code found in callback request".to_string())
    })
}
