//! Gateway traits (ports) for external collaborators
//!
//! Blob storage, CAPTCHA verification, and live-update publishing are
//! external services from the domain's point of view. Each is an explicit,
//! injectable port; there is no hidden coupling through save-hooks or
//! globals.

use async_trait::async_trait;
use thiserror::Error;

/// Errors from external collaborators
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Blob storage error: {0}")]
    Storage(String),

    #[error("CAPTCHA verification error: {0}")]
    Captcha(String),

    #[error("Publish error: {0}")]
    Publish(String),
}

/// Binary blob storage keyed by caller-generated identifiers
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store bytes under `key`; returns a retrievable URL
    async fn put(&self, key: &str, bytes: &[u8]) -> Result<String, GatewayError>;
}

/// Third-party CAPTCHA verification
#[async_trait]
pub trait CaptchaVerifier: Send + Sync {
    /// Verify a client token; returns whether the challenge passed
    async fn verify(&self, token: &str, remote_ip: Option<&str>) -> Result<bool, GatewayError>;
}

/// Live-update fan-out to the comment stream's subscribers
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Publish a `new_comment` event carrying the serialized comment.
    ///
    /// Callers treat failures as fire-and-forget: log, never roll back the
    /// write that triggered the event.
    async fn publish_new_comment(&self, comment: &serde_json::Value) -> Result<(), GatewayError>;
}
