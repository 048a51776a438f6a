#![allow(dead_code)]

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use uuid::Uuid;

use course_api::auth::{generate_jwt, Claims};
use course_api::config::AppConfig;
use course_api::database::models::Role;
use course_api::database::MemoryCourseStore;
use course_api::routes;
use course_api::state::AppState;

pub const JWT_SECRET: &str = "integration-test-secret";

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    pub client: reqwest::Client,
}

impl TestServer {
    /// Serve the app over a fresh in-memory store on an unused local port
    pub async fn spawn() -> Result<Self> {
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let mut config = AppConfig::from_env();
        config.server.host = "127.0.0.1".to_string();
        config.server.port = port;
        config.server.enable_request_logging = false;

        let state = AppState::new(Arc::new(MemoryCourseStore::new()), JWT_SECRET);
        let app = routes::app(state, &config);
        let listener = tokio::net::TcpListener::bind(config.bind_addr())
            .await
            .with_context(|| format!("failed to bind {}", config.bind_addr()))?;

        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        let server = Self {
            port,
            base_url,
            client: reqwest::Client::new(),
        };
        server.wait_ready(Duration::from_secs(10)).await?;
        Ok(server)
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            let url = format!("{}/health", self.base_url);
            if let Ok(resp) = self.client.get(&url).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// A user identity with a signed bearer token
pub struct TestUser {
    pub id: Uuid,
    pub role: Role,
    pub token: String,
}

impl TestUser {
    pub fn new(role: Role) -> Self {
        let id = Uuid::new_v4();
        let claims = Claims::new(id, role, 1).expect("claims");
        let token = generate_jwt(&claims, JWT_SECRET).expect("token");
        Self { id, role, token }
    }

    pub fn instructor() -> Self {
        Self::new(Role::Instructor)
    }

    pub fn student() -> Self {
        Self::new(Role::Student)
    }

    pub fn admin() -> Self {
        Self::new(Role::Admin)
    }

    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}
