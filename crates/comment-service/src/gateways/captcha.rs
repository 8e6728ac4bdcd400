//! CAPTCHA verification gateway
//!
//! POSTs the client token to the configured verify endpoint and reads the
//! boolean result. The HTTP client carries a request timeout so a slow
//! verifier cannot stall the create path.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

use comment_common::CaptchaConfig;
use comment_core::traits::{CaptchaVerifier, GatewayError};

/// Verifier response body (reCAPTCHA-compatible shape)
#[derive(Debug, Deserialize)]
struct VerifyResponse {
    success: bool,
}

/// CAPTCHA verifier calling an HTTP endpoint
#[derive(Debug, Clone)]
pub struct HttpCaptchaVerifier {
    client: reqwest::Client,
    verify_url: String,
    secret: String,
}

impl HttpCaptchaVerifier {
    /// Create a verifier from configuration
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be constructed
    pub fn new(config: &CaptchaConfig) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GatewayError::Captcha(e.to_string()))?;

        Ok(Self {
            client,
            verify_url: config.verify_url.clone(),
            secret: config.secret.clone(),
        })
    }
}

#[async_trait]
impl CaptchaVerifier for HttpCaptchaVerifier {
    async fn verify(&self, token: &str, remote_ip: Option<&str>) -> Result<bool, GatewayError> {
        let mut form = vec![("secret", self.secret.as_str()), ("response", token)];
        if let Some(ip) = remote_ip {
            form.push(("remoteip", ip));
        }

        let response = self
            .client
            .post(&self.verify_url)
            .form(&form)
            .send()
            .await
            .map_err(|e| GatewayError::Captcha(e.to_string()))?;

        let body: VerifyResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::Captcha(e.to_string()))?;

        Ok(body.success)
    }
}

/// Pass-through verifier wired when CAPTCHA is disabled (development)
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCaptchaVerifier;

#[async_trait]
impl CaptchaVerifier for NoopCaptchaVerifier {
    async fn verify(&self, _token: &str, _remote_ip: Option<&str>) -> Result<bool, GatewayError> {
        Ok(true)
    }
}
