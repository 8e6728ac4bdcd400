//! Comment entity <-> model mapper

use comment_core::entities::{AttachmentKind, AttachmentMeta, Comment};
use comment_core::value_objects::Snowflake;

use crate::models::CommentModel;

/// Convert CommentModel to Comment entity.
///
/// `is_reply` is re-derived from parent linkage rather than read from the
/// stored column, so the invariant holds even against a hand-edited row.
impl From<CommentModel> for Comment {
    fn from(model: CommentModel) -> Self {
        let attachment = match (
            model.attachment_type.as_deref().and_then(AttachmentKind::parse),
            model.attachment_name,
            model.attachment_size,
            model.attachment_url,
        ) {
            (Some(kind), Some(name), Some(size), Some(url)) => Some(AttachmentMeta {
                kind,
                name,
                size,
                url,
            }),
            _ => None,
        };

        Comment {
            id: Snowflake::new(model.id),
            sender_id: Snowflake::new(model.sender_id),
            text: model.text,
            created_at: model.created_at,
            updated_at: model.updated_at,
            parent_comment_id: model.parent_comment_id.map(Snowflake::new),
            attachment,
        }
    }
}
