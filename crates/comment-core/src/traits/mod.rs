//! Ports - interfaces implemented by the infrastructure crates

mod gateways;
mod repositories;

pub use gateways::{BlobStore, CaptchaVerifier, GatewayError, Notifier};
pub use repositories::{CommentRepository, PageRequest, RepoResult};
