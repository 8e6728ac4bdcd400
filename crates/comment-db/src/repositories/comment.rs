//! PostgreSQL implementation of CommentRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use comment_core::entities::Comment;
use comment_core::error::DomainError;
use comment_core::traits::{CommentRepository, PageRequest, RepoResult};
use comment_core::value_objects::Snowflake;

use crate::models::CommentModel;

use super::error::{comment_not_found, map_db_error, map_fk_violation};

const COMMENT_COLUMNS: &str = "id, sender_id, text, created_at, updated_at, parent_comment_id, \
                               is_reply, attachment_type, attachment_name, attachment_size, \
                               attachment_url";

/// PostgreSQL implementation of CommentRepository
#[derive(Clone)]
pub struct PgCommentRepository {
    pool: PgPool,
}

impl PgCommentRepository {
    /// Create a new PgCommentRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentRepository for PgCommentRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Comment>> {
        let result = sqlx::query_as::<_, CommentModel>(&format!(
            "SELECT {COMMENT_COLUMNS} FROM comments WHERE id = $1"
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Comment::from))
    }

    #[instrument(skip(self))]
    async fn exists(&self, id: Snowflake) -> RepoResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM comments WHERE id = $1)")
                .bind(id.into_inner())
                .fetch_one(&self.pool)
                .await
                .map_err(map_db_error)?;

        Ok(exists)
    }

    /// Single-row insert: the comment and its attachment metadata become
    /// visible together or not at all.
    #[instrument(skip(self, comment))]
    async fn create(&self, comment: &Comment) -> RepoResult<()> {
        let attachment = comment.attachment.as_ref();

        sqlx::query(
            r#"
            INSERT INTO comments (id, sender_id, text, created_at, parent_comment_id, is_reply,
                                  attachment_type, attachment_name, attachment_size, attachment_url)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(comment.id.into_inner())
        .bind(comment.sender_id.into_inner())
        .bind(&comment.text)
        .bind(comment.created_at)
        .bind(comment.parent_comment_id.map(Snowflake::into_inner))
        .bind(comment.is_reply())
        .bind(attachment.map(|a| a.kind.as_str()))
        .bind(attachment.map(|a| a.name.as_str()))
        .bind(attachment.map(|a| a.size))
        .bind(attachment.map(|a| a.url.as_str()))
        .execute(&self.pool)
        .await
        .map_err(|e| {
            map_fk_violation(e, || {
                DomainError::ParentNotFound(comment.parent_comment_id.unwrap_or_default())
            })
        })?;

        Ok(())
    }

    #[instrument(skip(self, comment))]
    async fn update_text(&self, comment: &Comment) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE comments
            SET text = $2, updated_at = $3
            WHERE id = $1
            "#,
        )
        .bind(comment.id.into_inner())
        .bind(&comment.text)
        .bind(comment.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(comment_not_found(comment.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn count(&self) -> RepoResult<i64> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM comments")
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(total)
    }

    #[instrument(skip(self))]
    async fn list_page(&self, page: PageRequest) -> RepoResult<Vec<Comment>> {
        let results = sqlx::query_as::<_, CommentModel>(&format!(
            r#"
            SELECT {COMMENT_COLUMNS}
            FROM comments
            ORDER BY created_at DESC, id DESC
            LIMIT $1 OFFSET $2
            "#
        ))
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Comment::from).collect())
    }

    /// Replies cascade via the self-referential foreign key
    /// (`ON DELETE CASCADE` on `parent_comment_id`).
    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(comment_not_found(id));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgCommentRepository>();
    }
}
