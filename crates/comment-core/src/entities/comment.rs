//! Comment entity - a single message in the shared comment stream

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// Kind of an attachment, derived from the validated upload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentKind {
    Image,
    Text,
}

impl AttachmentKind {
    /// Stable string form used in storage and API payloads
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Text => "text",
        }
    }

    /// Parse from the stored string form
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "image" => Some(Self::Image),
            "text" => Some(Self::Text),
            _ => None,
        }
    }
}

impl std::fmt::Display for AttachmentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata describing a stored attachment.
///
/// All fields describe the final, possibly-transformed bytes, not the
/// original upload. The block is all-or-nothing: a comment either carries a
/// complete `AttachmentMeta` or none at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentMeta {
    pub kind: AttachmentKind,
    /// Original filename, preserved for display
    pub name: String,
    /// Byte length of the stored bytes
    pub size: i64,
    /// Blob-store location
    pub url: String,
}

/// Comment entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: Snowflake,
    pub sender_id: Snowflake,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub parent_comment_id: Option<Snowflake>,
    pub attachment: Option<AttachmentMeta>,
}

impl Comment {
    /// Create a new top-level comment
    pub fn new(id: Snowflake, sender_id: Snowflake, text: String) -> Self {
        Self {
            id,
            sender_id,
            text,
            created_at: Utc::now(),
            updated_at: None,
            parent_comment_id: None,
            attachment: None,
        }
    }

    /// Create a reply to an existing comment
    pub fn new_reply(id: Snowflake, sender_id: Snowflake, text: String, parent_id: Snowflake) -> Self {
        Self {
            id,
            sender_id,
            text,
            created_at: Utc::now(),
            updated_at: None,
            parent_comment_id: Some(parent_id),
            attachment: None,
        }
    }

    /// Attach processed media metadata
    pub fn with_attachment(mut self, attachment: AttachmentMeta) -> Self {
        self.attachment = Some(attachment);
        self
    }

    /// Whether this comment is a reply.
    ///
    /// Derived from parent linkage, never stored independently.
    #[inline]
    pub fn is_reply(&self) -> bool {
        self.parent_comment_id.is_some()
    }

    /// Check if the comment carries an attachment
    #[inline]
    pub fn has_attachment(&self) -> bool {
        self.attachment.is_some()
    }

    /// Check if the comment has been edited
    #[inline]
    pub fn is_edited(&self) -> bool {
        self.updated_at.is_some()
    }

    /// Replace the text, marking the comment as edited
    pub fn edit_text(&mut self, text: String) {
        self.text = text;
        self.updated_at = Some(Utc::now());
    }
}
