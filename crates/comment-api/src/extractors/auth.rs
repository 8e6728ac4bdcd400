//! Authenticated identity extractor
//!
//! Identity issuance (registration, passwords, token verification) happens
//! upstream; by the time a request reaches this service, the authenticating
//! proxy has resolved the caller and injected `x-user-id`. This extractor
//! only reads that header.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use comment_core::Snowflake;

use crate::response::ApiError;

/// Header carrying the externally-authenticated sender identity
pub const USER_ID_HEADER: &str = "x-user-id";

/// Header carrying the original client address when behind a proxy
pub const FORWARDED_FOR_HEADER: &str = "x-forwarded-for";

/// The authenticated sender of a request
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub user_id: Snowflake,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(USER_ID_HEADER)
            .ok_or(ApiError::MissingAuth)?
            .to_str()
            .map_err(|_| ApiError::InvalidAuthFormat)?;

        let user_id = raw.parse().map_err(|_| ApiError::InvalidAuthFormat)?;

        Ok(AuthUser { user_id })
    }
}

/// Best-effort client address, forwarded to the CAPTCHA verifier
#[derive(Debug, Clone, Default)]
pub struct RemoteIp(pub Option<String>);

#[async_trait]
impl<S> FromRequestParts<S> for RemoteIp
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let ip = parts
            .headers
            .get(FORWARDED_FOR_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        Ok(RemoteIp(ip))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn auth_from(headers: &[(&str, &str)]) -> Result<AuthUser, ApiError> {
        let mut builder = Request::builder().uri("/");
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        let request = builder.body(()).unwrap();
        let (mut parts, ()) = request.into_parts();
        AuthUser::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn test_missing_header_rejected() {
        let result = auth_from(&[]).await;
        assert!(matches!(result, Err(ApiError::MissingAuth)));
    }

    #[tokio::test]
    async fn test_valid_header_parses() {
        let auth = auth_from(&[(USER_ID_HEADER, "42")]).await.unwrap();
        assert_eq!(auth.user_id, Snowflake::new(42));
    }

    #[tokio::test]
    async fn test_garbage_header_rejected() {
        let result = auth_from(&[(USER_ID_HEADER, "not-a-number")]).await;
        assert!(matches!(result, Err(ApiError::InvalidAuthFormat)));
    }

    #[tokio::test]
    async fn test_remote_ip_takes_first_hop() {
        let request = Request::builder()
            .uri("/")
            .header(FORWARDED_FOR_HEADER, "203.0.113.7, 10.0.0.1")
            .body(())
            .unwrap();
        let (mut parts, ()) = request.into_parts();
        let RemoteIp(ip) = RemoteIp::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(ip.as_deref(), Some("203.0.113.7"));
    }
}
