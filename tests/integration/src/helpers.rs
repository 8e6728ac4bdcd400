//! Test helpers for integration tests
//!
//! Provides utilities for spawning a test server and making HTTP requests
//! against it.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Result;
use comment_api::{create_app, create_app_state};
use comment_common::{
    AppConfig, AppSettings, CacheConfig, CaptchaConfig, CorsConfig, DatabaseConfig, Environment,
    RateLimitConfig, RedisConfig, ServerConfig, SnowflakeConfig, StorageConfig,
};
use reqwest::{Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Check whether the test environment is available.
///
/// Integration tests need PostgreSQL and Redis; when the environment
/// variables are absent the tests return early instead of failing.
pub async fn check_test_env() -> bool {
    let _ = dotenvy::dotenv();
    let available =
        std::env::var("DATABASE_URL").is_ok() && std::env::var("REDIS_URL").is_ok();
    if !available {
        eprintln!("Skipping: DATABASE_URL / REDIS_URL not configured");
    }
    available
}

/// Build a test configuration from the environment
pub fn test_config() -> Result<AppConfig> {
    let _ = dotenvy::dotenv();

    Ok(AppConfig {
        app: AppSettings {
            name: "comment-server-test".to_string(),
            env: Environment::Development,
        },
        api: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        gateway: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        database: DatabaseConfig {
            url: std::env::var("DATABASE_URL")?,
            max_connections: 5,
            min_connections: 1,
        },
        redis: RedisConfig {
            url: std::env::var("REDIS_URL")?,
            max_connections: 5,
        },
        cache: CacheConfig { page_ttl_secs: 300 },
        storage: StorageConfig {
            upload_dir: std::env::temp_dir()
                .join("comment-server-test-uploads")
                .to_string_lossy()
                .into_owned(),
            public_base: "/media".to_string(),
        },
        captcha: CaptchaConfig {
            enabled: false,
            verify_url: String::new(),
            secret: String::new(),
            timeout_secs: 5,
        },
        rate_limit: RateLimitConfig {
            requests_per_second: 1000,
            burst: 1000,
        },
        cors: CorsConfig {
            allowed_origins: Vec::new(),
        },
        snowflake: SnowflakeConfig { worker_id: 1 },
    })
}

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a new test server
    pub async fn start() -> Result<Self> {
        let config = test_config()?;
        Self::start_with_config(config).await
    }

    /// Start a test server with custom config
    pub async fn start_with_config(config: AppConfig) -> Result<Self> {
        // Create app state
        let state = create_app_state(config).await?;

        // Build application
        let app = create_app(state);

        // Bind to an ephemeral port
        let listener = TcpListener::bind(("127.0.0.1", 0)).await?;
        let addr = listener.local_addr()?;

        // Spawn server task
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        // Wait for server to be ready
        tokio::time::sleep(Duration::from_millis(100)).await;

        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            addr,
            client,
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.get(&url).send().await?)
    }

    /// Make a multipart POST request with the given sender identity
    pub async fn post_multipart(
        &self,
        path: &str,
        user_id: i64,
        form: reqwest::multipart::Form,
    ) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self
            .client
            .post(&url)
            .header("x-user-id", user_id.to_string())
            .multipart(form)
            .send()
            .await?)
    }

    /// Make a multipart POST request without an identity header
    pub async fn post_multipart_anonymous(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.post(&url).multipart(form).send().await?)
    }

    /// Make a PATCH request with JSON body and the given sender identity
    pub async fn patch<T: Serialize>(
        &self,
        path: &str,
        user_id: i64,
        body: &T,
    ) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self
            .client
            .patch(&url)
            .header("x-user-id", user_id.to_string())
            .json(body)
            .send()
            .await?)
    }
}

/// Assert a response status, consuming the response
pub async fn assert_status(response: Response, expected: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected {
        let body = response.text().await.unwrap_or_default();
        anyhow::bail!("Expected {expected}, got {status}: {body}");
    }
    Ok(())
}

/// Assert a response status and deserialize the JSON body
pub async fn assert_json<T: DeserializeOwned>(
    response: Response,
    expected: StatusCode,
) -> Result<T> {
    let status = response.status();
    let body = response.text().await?;
    if status != expected {
        anyhow::bail!("Expected {expected}, got {status}: {body}");
    }
    Ok(serde_json::from_str(&body)?)
}
