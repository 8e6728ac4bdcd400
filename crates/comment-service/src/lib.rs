//! # comment-service
//!
//! Application layer: the comment ingestion pipeline (sanitize, process
//! attachment, persist, invalidate cache, publish), paged listing, text
//! updates, and the gateway implementations for blob storage and CAPTCHA
//! verification.

pub mod dto;
pub mod gateways;
pub mod services;

// Re-export commonly used types
pub use dto::{
    CommentResponse, CreateCommentRequest, PageMeta, PageResponse, UpdateCommentRequest,
};
pub use gateways::{FsBlobStore, HttpCaptchaVerifier, NoopCaptchaVerifier};
pub use services::{
    attachment, CommentService, ProcessedAttachment, ServiceContext, ServiceContextBuilder,
    ServiceError, ServiceResult, Upload,
};
