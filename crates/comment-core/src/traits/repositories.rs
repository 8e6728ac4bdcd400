//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs; the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;

use crate::entities::Comment;
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

/// Offset pagination for comment listings
#[derive(Debug, Clone, Copy)]
pub struct PageRequest {
    pub limit: i64,
    pub offset: i64,
}

impl PageRequest {
    /// Build from 1-based page number and page size
    pub fn new(page: i64, per_page: i64) -> Self {
        Self {
            limit: per_page,
            offset: (page - 1) * per_page,
        }
    }
}

#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Find comment by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Comment>>;

    /// Check whether a comment exists
    async fn exists(&self, id: Snowflake) -> RepoResult<bool>;

    /// Persist a new comment atomically, including attachment metadata
    async fn create(&self, comment: &Comment) -> RepoResult<()>;

    /// Replace the text of an existing comment; attachment fields stay
    /// untouched through this path
    async fn update_text(&self, comment: &Comment) -> RepoResult<()>;

    /// Total number of comments in the stream
    async fn count(&self) -> RepoResult<i64>;

    /// List a page of comments, newest first
    async fn list_page(&self, page: PageRequest) -> RepoResult<Vec<Comment>>;

    /// Delete a comment; replies cascade with it
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;
}
