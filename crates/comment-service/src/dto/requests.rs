//! Request DTOs
//!
//! Structural validation (presence, emptiness) lives here via `validator`;
//! the markup and length rules are enforced by the domain sanitizer so that
//! violations accumulate into a single response.

use serde::Deserialize;
use validator::Validate;

/// Create comment request fields (the attachment file part travels
/// separately in the multipart body)
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[validate(length(min = 1, message = "Text must not be empty"))]
    pub text: String,

    /// ID of the comment being replied to (Snowflake as string)
    pub parent_comment_id: Option<String>,

    /// Client CAPTCHA token, forwarded to the verifier
    pub captcha_token: Option<String>,
}

/// Update comment text request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateCommentRequest {
    #[validate(length(min = 1, message = "Text must not be empty"))]
    pub text: String,
}
