//! Comment database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the comments table.
///
/// Attachment columns are all-or-nothing: a row either has
/// `attachment_type`, `attachment_name`, `attachment_size`, and
/// `attachment_url` all populated, or all NULL.
#[derive(Debug, Clone, FromRow)]
pub struct CommentModel {
    pub id: i64,
    pub sender_id: i64,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub parent_comment_id: Option<i64>,
    pub is_reply: bool,
    pub attachment_type: Option<String>,
    pub attachment_name: Option<String>,
    pub attachment_size: Option<i64>,
    pub attachment_url: Option<String>,
}

impl CommentModel {
    /// Check if the row carries attachment metadata
    #[inline]
    pub fn has_attachment(&self) -> bool {
        self.attachment_type.is_some()
    }

    /// Check if the comment has been edited
    #[inline]
    pub fn is_edited(&self) -> bool {
        self.updated_at.is_some()
    }
}
