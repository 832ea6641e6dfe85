//! Common test harness for Sensu Go Rust SDK integration tests.

use std::sync::Once;

use sensu_go::{ApiKeyCredentialsConfig, Client, UserPassCredentialsConfig};
use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const USERNAME: &str = "admin";
pub const PASSWORD: &str = "P@ssw0rd!";
pub const ACCESS_TOKEN: &str = "access-token";
pub const API_KEY: &str = "83abef1e-e7d7-4beb-91fc-79ad90084d5b";

static TRACING: Once = Once::new();

/// Installs a log subscriber honouring `RUST_LOG`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Starts a mock backend.
pub async fn start_backend() -> MockServer {
    init_tracing();
    MockServer::start().await
}

/// Mounts a successful `/auth` exchange, expected exactly `times` times.
pub async fn mount_login(server: &MockServer, times: u64) {
    Mock::given(method("GET"))
        .and(path("/auth"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": ACCESS_TOKEN,
            "refresh_token": "refresh-token",
            "expires_at": 1_700_000_000,
        })))
        .expect(times)
        .mount(server)
        .await;
}

/// A client logging in with username and password.
pub fn user_pass_client(server: &MockServer) -> anyhow::Result<Client> {
    Ok(Client::builder()
        .url(server.uri())
        .credentials(UserPassCredentialsConfig::new(USERNAME, PASSWORD))
        .build()?)
}

/// A client authenticating with an API key.
pub fn api_key_client(server: &MockServer) -> anyhow::Result<Client> {
    Ok(Client::builder()
        .url(server.uri())
        .credentials(ApiKeyCredentialsConfig::new(API_KEY))
        .build()?)
}

/// The `Authorization` header an API key client sends.
pub fn api_key_header() -> String {
    format!("Key {}", API_KEY)
}

/// Wire form of a check in the `default` namespace.
pub fn check_json(name: &str) -> Value {
    json!({
        "command": format!("{}.sh", name),
        "interval": 60,
        "subscriptions": ["linux"],
        "metadata": {"name": name, "namespace": "default"},
    })
}

/// A JSON array of `count` checks named `check-<start>`, `check-<start+1>`, ...
pub fn check_page(start: usize, count: usize) -> Value {
    Value::Array(
        (start..start + count)
            .map(|i| check_json(&format!("check-{}", i)))
            .collect(),
    )
}
