//! Entity -> DTO mappers

use comment_core::entities::Comment;

use super::responses::CommentResponse;

impl From<&Comment> for CommentResponse {
    fn from(comment: &Comment) -> Self {
        let attachment = comment.attachment.as_ref();

        CommentResponse {
            id: comment.id.to_string(),
            sender_id: comment.sender_id.to_string(),
            text: comment.text.clone(),
            created_at: comment.created_at,
            updated_at: comment.updated_at,
            parent_comment_id: comment.parent_comment_id.map(|id| id.to_string()),
            is_reply: comment.is_reply(),
            attachment_type: attachment.map(|a| a.kind.as_str().to_string()),
            attachment_name: attachment.map(|a| a.name.clone()),
            attachment_size: attachment.map(|a| a.size),
            attachment_url: attachment.map(|a| a.url.clone()),
        }
    }
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self::from(&comment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use comment_core::entities::{AttachmentKind, AttachmentMeta};
    use comment_core::value_objects::Snowflake;

    #[test]
    fn test_plain_comment_maps_with_null_attachment_fields() {
        let comment = Comment::new(Snowflake::new(1), Snowflake::new(7), "hi".to_string());
        let response = CommentResponse::from(&comment);

        assert_eq!(response.id, "1");
        assert!(!response.is_reply);
        assert!(response.attachment_type.is_none());
        assert!(response.attachment_name.is_none());
        assert!(response.attachment_size.is_none());
        assert!(response.attachment_url.is_none());
    }

    #[test]
    fn test_reply_maps_is_reply_and_parent() {
        let comment = Comment::new_reply(
            Snowflake::new(2),
            Snowflake::new(7),
            "me too".to_string(),
            Snowflake::new(42),
        );
        let response = CommentResponse::from(&comment);

        assert!(response.is_reply);
        assert_eq!(response.parent_comment_id.as_deref(), Some("42"));
    }

    #[test]
    fn test_attachment_fields_all_populated_together() {
        let comment = Comment::new(Snowflake::new(3), Snowflake::new(7), "pic".to_string())
            .with_attachment(AttachmentMeta {
                kind: AttachmentKind::Image,
                name: "cat.jpg".to_string(),
                size: 512,
                url: "/media/k.jpg".to_string(),
            });
        let response = CommentResponse::from(&comment);

        assert_eq!(response.attachment_type.as_deref(), Some("image"));
        assert_eq!(response.attachment_name.as_deref(), Some("cat.jpg"));
        assert_eq!(response.attachment_size, Some(512));
        assert_eq!(response.attachment_url.as_deref(), Some("/media/k.jpg"));
    }
}
