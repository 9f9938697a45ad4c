use assert_cmd::Command;
use predicates::prelude::*;
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod common;

/// Command isolated from the caller's environment and home directory.
fn douban_cmd(home: &tempfile::TempDir) -> Command {
    let mut cmd = Command::cargo_bin("douban").unwrap();
    cmd.env_clear()
        .env("HOME", home.path())
        .env("DOUBAN_LOG_LEVEL", "off");
    cmd
}

fn write_config(dir: &tempfile::TempDir, server: Option<&MockServer>) -> std::path::PathBuf {
    let mut config = serde_json::json!({
        "clientId": common::CLIENT_ID,
        "clientSecret": common::CLIENT_SECRET,
        "redirectUri": common::REDIRECT_URI,
        "scope": ["douban_basic_common", "movie_basic_r"]
    });
    if let Some(server) = server {
        config["authHost"] = server.uri().into();
        config["apiHost"] = server.uri().into();
    }
    let path = dir.path().join("douban.json");
    std::fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();
    path
}

#[test]
fn auth_url_prints_authorize_endpoint() {
    let home = tempfile::tempdir().unwrap();
    let config = write_config(&home, None);
    douban_cmd(&home)
        .args(["auth-url", "--config"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "https://www.douban.com/service/auth2/auth?",
        ))
        .stdout(predicate::str::contains(format!("client_id={}", common::CLIENT_ID)))
        .stdout(predicate::str::contains("response_type=code"))
        .stdout(predicate::str::contains("scope=douban_basic_common%2Cmovie_basic_r"));
}

#[test]
fn auth_url_from_environment_only() {
    let home = tempfile::tempdir().unwrap();
    douban_cmd(&home)
        .arg("auth-url")
        .env("DOUBAN_CLIENT_ID", "env-id")
        .env("DOUBAN_CLIENT_SECRET", "env-secret")
        .env("DOUBAN_REDIRECT_URI", "http://localhost:9000/cb")
        .env("DOUBAN_SCOPE", "book_basic_r")
        .assert()
        .success()
        .stdout(predicate::str::contains("client_id=env-id"))
        .stdout(predicate::str::contains("scope=book_basic_r"));
}

#[test]
fn auth_url_without_credentials_fails() {
    let home = tempfile::tempdir().unwrap();
    douban_cmd(&home)
        .arg("auth-url")
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing clientId"));
}

#[test]
fn get_without_token_fails() {
    let home = tempfile::tempdir().unwrap();
    douban_cmd(&home)
        .args(["get", "/v2/user/~me"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No access token"));
}

#[test]
fn json_errors_go_to_stdout() {
    let home = tempfile::tempdir().unwrap();
    douban_cmd(&home)
        .args(["--json", "movie", "top250"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("\"auth_required\""));
}

#[tokio::test(flavor = "multi_thread")]
async fn get_writes_raw_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/movie/search"))
        .and(query_param("q", "solaris"))
        .and(header("authorization", "Bearer A"))
        .respond_with(ResponseTemplate::new(404).set_body_string(r#"{"msg":"not found"}"#))
        .mount(&server)
        .await;

    let home = tempfile::tempdir().unwrap();
    let config = write_config(&home, Some(&server));
    douban_cmd(&home)
        .args(["movie", "search", "solaris", "--access-token", "A", "--config"])
        .arg(&config)
        .assert()
        .success()
        .stdout(r#"{"msg":"not found"}"#);
}

#[tokio::test(flavor = "multi_thread")]
async fn exchange_prints_token_json() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(common::http_mock::TOKEN_PATH))
        .and(body_string_contains("code=abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "A",
            "refresh_token": "R",
            "expires_in": 3600
        })))
        .expect(1)
        .mount(&server)
        .await;

    let home = tempfile::tempdir().unwrap();
    let config = write_config(&home, Some(&server));
    douban_cmd(&home)
        .args(["exchange", "abc", "--config"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"access_token\": \"A\""))
        .stdout(predicate::str::contains("\"refresh_token\": \"R\""));
}

#[tokio::test(flavor = "multi_thread")]
async fn refresh_uses_token_file() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(common::http_mock::TOKEN_PATH))
        .and(body_string_contains("grant_type=refresh_token"))
        .and(body_string_contains("refresh_token=R"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "A2",
            "refresh_token": "R2"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let home = tempfile::tempdir().unwrap();
    let config = write_config(&home, Some(&server));
    let token_file = home.path().join("token.json");
    std::fs::write(&token_file, r#"{"access_token":"A","refresh_token":"R"}"#).unwrap();

    douban_cmd(&home)
        .args(["refresh", "--config"])
        .arg(&config)
        .arg("--token-file")
        .arg(&token_file)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"access_token\": \"A2\""));
}
