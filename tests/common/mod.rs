#![allow(dead_code)]

use std::sync::{Arc, OnceLock};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use contacts_api::config::AppConfig;
use contacts_api::database::MemoryStore;
use contacts_api::state::AppState;
use reqwest::StatusCode;
use serde_json::{json, Value};

static SERVER: OnceLock<TestServer> = OnceLock::new();

pub const TEST_SECRET: &str = "integration-test-secret";

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
}

impl TestServer {
    fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let config = AppConfig::from_lookup(|name| match name {
            "JWT_SECRET" => Some(TEST_SECRET.to_string()),
            "SECURITY_BCRYPT_COST" => Some("4".to_string()),
            _ => None,
        })?;
        let state = AppState::new(config, Arc::new(MemoryStore::new()));

        // The server gets its own runtime so it outlives each test's runtime
        std::thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .expect("failed to build server runtime");
            runtime.block_on(async move {
                let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
                    .await
                    .expect("failed to bind test port");
                axum::serve(listener, contacts_api::app(state))
                    .await
                    .expect("server");
            });
        });

        Ok(Self { port, base_url })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            let url = format!("{}/health", self.base_url);
            if let Ok(resp) = client.get(&url).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/api/v1{}", self.base_url, path)
    }
}

pub async fn ensure_server() -> Result<&'static TestServer> {
    let server = SERVER.get_or_init(|| TestServer::spawn().expect("failed to spawn test server"));
    server.wait_ready(Duration::from_secs(10)).await?;
    Ok(server)
}

/// Email nobody else in the shared server has used.
pub fn unique_email() -> String {
    format!("user-{}@example.com", uuid_suffix())
}

fn uuid_suffix() -> String {
    // portable uniqueness without pulling uuid into dev-dependencies
    use std::sync::atomic::{AtomicU64, Ordering};
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    format!("{}-{}", nanos, COUNTER.fetch_add(1, Ordering::Relaxed))
}

/// Sign up a fresh user and return their bearer token.
pub async fn signup_user(server: &TestServer, client: &reqwest::Client) -> Result<String> {
    let res = client
        .post(server.url("/users/signup"))
        .json(&json!({
            "name": "Test User",
            "email": unique_email(),
            "password": "password123",
        }))
        .send()
        .await?;
    anyhow::ensure!(res.status() == StatusCode::CREATED, "signup failed: {}", res.status());
    let body: Value = res.json().await?;
    body["token"]
        .as_str()
        .map(str::to_string)
        .context("signup response has no token")
}

pub async fn create_contact(server: &TestServer, client: &reqwest::Client, token: &str, body: Value) -> Result<Value> {
    let res = client
        .post(server.url("/contacts"))
        .bearer_auth(token)
        .json(&body)
        .send()
        .await?;
    anyhow::ensure!(res.status() == StatusCode::CREATED, "create failed: {}", res.status());
    let body: Value = res.json().await?;
    Ok(body["data"].clone())
}
