//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::error::Violations;
use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Comment not found: {0}")]
    CommentNotFound(Snowflake),

    #[error("Parent comment not found: {0}")]
    ParentNotFound(Snowflake),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation failed: {0}")]
    Validation(Violations),

    #[error("Page size must be positive, got {0}")]
    InvalidPageSize(i64),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Cache error: {0}")]
    CacheError(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::CommentNotFound(_) => "UNKNOWN_COMMENT",
            Self::ParentNotFound(_) => "UNKNOWN_PARENT_COMMENT",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::InvalidPageSize(_) => "INVALID_PAGE_SIZE",
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::CacheError(_) => "CACHE_ERROR",
            Self::StorageError(_) => "STORAGE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::CommentNotFound(_) | Self::ParentNotFound(_))
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::InvalidPageSize(_))
    }

    /// Get the accumulated violations, if this is a validation error
    pub fn violations(&self) -> Option<&Violations> {
        match self {
            Self::Validation(v) => Some(v),
            _ => None,
        }
    }
}

impl From<Violations> for DomainError {
    fn from(violations: Violations) -> Self {
        Self::Validation(violations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Violation;

    #[test]
    fn test_error_codes() {
        let err = DomainError::CommentNotFound(Snowflake::new(1));
        assert_eq!(err.code(), "UNKNOWN_COMMENT");

        let err = DomainError::InvalidPageSize(0);
        assert_eq!(err.code(), "INVALID_PAGE_SIZE");
    }

    #[test]
    fn test_is_not_found() {
        assert!(DomainError::CommentNotFound(Snowflake::new(1)).is_not_found());
        assert!(DomainError::ParentNotFound(Snowflake::new(1)).is_not_found());
        assert!(!DomainError::InvalidPageSize(0).is_not_found());
    }

    #[test]
    fn test_is_validation() {
        let err = DomainError::Validation(Violations(vec![Violation::MissingHref]));
        assert!(err.is_validation());
        assert!(err.violations().is_some());
        assert!(DomainError::InvalidPageSize(-3).is_validation());
        assert!(!DomainError::DatabaseError("down".to_string()).is_validation());
    }

    #[test]
    fn test_error_display() {
        let err = DomainError::CommentNotFound(Snowflake::new(123));
        assert_eq!(err.to_string(), "Comment not found: 123");
    }
}
