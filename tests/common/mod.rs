pub mod http_mock;

use std::sync::Arc;

use douban_client::{Credentials, Endpoints, HttpSettings, ResourceClient, TokenManager};
use wiremock::MockServer;

pub const CLIENT_ID: &str = "0b5405e19c58e4cc21fc11a4d50aae64";
pub const CLIENT_SECRET: &str = "edfc4e395ef93375";
pub const REDIRECT_URI: &str = "http://localhost:8765/back";

#[allow(dead_code)]
pub fn credentials() -> Credentials {
    Credentials::new(
        CLIENT_ID,
        CLIENT_SECRET,
        REDIRECT_URI,
        vec!["douban_basic_common".into(), "book_basic_r".into()],
    )
}

/// Token manager whose auth and API hosts both point at the mock server.
#[allow(dead_code)]
pub fn token_manager(server: &MockServer) -> Arc<TokenManager> {
    let endpoints = Endpoints::new(&server.uri(), &server.uri()).unwrap();
    Arc::new(TokenManager::with_options(credentials(), endpoints, &HttpSettings::default()).unwrap())
}

/// Base URI of a loopback port with nothing listening on it.
#[allow(dead_code)]
pub fn closed_port_uri() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}

/// Token manager whose hosts both point at a closed port.
#[allow(dead_code)]
pub fn unreachable_token_manager() -> Arc<TokenManager> {
    let uri = closed_port_uri();
    let endpoints = Endpoints::new(&uri, &uri).unwrap();
    Arc::new(TokenManager::with_options(credentials(), endpoints, &HttpSettings::default()).unwrap())
}

/// Resource client sharing a token manager with the caller.
#[allow(dead_code)]
pub fn resource_client(server: &MockServer) -> (Arc<TokenManager>, ResourceClient) {
    let tokens = token_manager(server);
    let client = ResourceClient::new(Arc::clone(&tokens)).unwrap();
    (tokens, client)
}

/// A token with only an access token, as if loaded from storage.
#[allow(dead_code)]
pub fn bare_token(access: &str) -> douban_client::Token {
    let mut fields = serde_json::Map::new();
    fields.insert("access_token".into(), serde_json::Value::String(access.into()));
    douban_client::Token::new(fields)
}
