//! Response DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Comment as served by the API and carried in `new_comment` events.
///
/// Attachment metadata is flattened to four nullable fields; either all four
/// are set or all four are null.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentResponse {
    pub id: String,
    pub sender_id: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub parent_comment_id: Option<String>,
    pub is_reply: bool,
    pub attachment_type: Option<String>,
    pub attachment_name: Option<String>,
    pub attachment_size: Option<i64>,
    pub attachment_url: Option<String>,
}

/// Pagination metadata for listings
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PageMeta {
    pub total: i64,
    pub per_page: i64,
    pub current_page: i64,
    pub last_page: i64,
}

impl PageMeta {
    /// Compute metadata; `last_page` is `ceil(total / per_page)`
    #[must_use]
    pub fn new(total: i64, per_page: i64, current_page: i64) -> Self {
        Self {
            total,
            per_page,
            current_page,
            last_page: (total + per_page - 1) / per_page,
        }
    }
}

/// Paged listing envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse<T> {
    pub data: Vec<T>,
    pub meta: PageMeta,
}
