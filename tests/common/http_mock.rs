use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TOKEN_PATH: &str = "/service/auth2/token";

/// Mount a token endpoint answering one grant type with the given response.
#[allow(dead_code)]
pub async fn mount_token_endpoint(
    server: &MockServer,
    grant_type: &str,
    response: ResponseTemplate,
) {
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .and(body_string_contains(format!("grant_type={grant_type}")))
        .respond_with(response)
        .mount(server)
        .await;
}

/// Token endpoint returning a standard Douban token payload.
#[allow(dead_code)]
pub async fn mount_code_exchange(server: &MockServer, access: &str, refresh: &str) {
    mount_token_endpoint(
        server,
        "authorization_code",
        ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": access,
            "refresh_token": refresh,
            "expires_in": 3600,
            "douban_user_id": "1221"
        })),
    )
    .await;
}
