//! Comment service
//!
//! Owns the ingestion pipeline: CAPTCHA gate, text sanitation, attachment
//! processing, atomic persistence, cache invalidation, and live-update
//! publish - in that order. Persistence must be durably visible before the
//! cache is cleared or the event goes out.

use comment_core::entities::{AttachmentMeta, Comment};
use comment_core::traits::PageRequest;
use comment_core::{markup, DomainError, Snowflake, Violations};
use tracing::{info, instrument, warn};

use crate::dto::{CommentResponse, CreateCommentRequest, PageMeta, PageResponse, UpdateCommentRequest};

use super::attachment::{self, Upload};
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Comment service
pub struct CommentService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CommentService<'a> {
    /// Create a new CommentService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a new comment, with an optional attachment upload.
    ///
    /// Every text and attachment violation found is reported together in a
    /// single validation error; processing is fail-closed for images.
    #[instrument(skip(self, request, upload), fields(sender_id = %sender_id))]
    pub async fn create_comment(
        &self,
        sender_id: Snowflake,
        request: CreateCommentRequest,
        upload: Option<Upload>,
        remote_ip: Option<&str>,
    ) -> ServiceResult<CommentResponse> {
        // CAPTCHA gate first; a failed challenge never reaches validation
        self.verify_captcha(request.captcha_token.as_deref(), remote_ip)
            .await?;

        let parent_id = request
            .parent_comment_id
            .as_deref()
            .map(|s| {
                s.parse::<Snowflake>().map_err(|_| {
                    ServiceError::App(comment_common::AppError::InvalidInput(
                        "Invalid parent_comment_id format".to_string(),
                    ))
                })
            })
            .transpose()?;

        // Accumulate all violations before failing
        let mut violations = Violations::new();

        if let Err(found) = markup::sanitize(&request.text) {
            violations.extend(found);
        }

        let processed = match upload {
            Some(upload) => {
                // Image decode/re-encode is CPU-bound; keep it off the
                // request workers
                let result = tokio::task::spawn_blocking(move || attachment::process(upload))
                    .await
                    .map_err(|e| ServiceError::internal(format!("attachment task failed: {e}")))?;

                match result {
                    Ok(processed) => Some(processed),
                    Err(violation) => {
                        violations.push(violation);
                        None
                    }
                }
            }
            None => None,
        };

        if !violations.is_empty() {
            return Err(ServiceError::Validation(violations));
        }

        if let Some(parent_id) = parent_id {
            if !self.ctx.comment_repo().exists(parent_id).await? {
                return Err(DomainError::ParentNotFound(parent_id).into());
            }
        }

        let id = self.ctx.generate_id();
        let mut comment = match parent_id {
            Some(parent_id) => Comment::new_reply(id, sender_id, request.text, parent_id),
            None => Comment::new(id, sender_id, request.text),
        };

        if let Some(processed) = processed {
            let key = processed.storage_key();
            let url = self
                .ctx
                .blob_store()
                .put(&key, &processed.bytes)
                .await
                .map_err(|e| ServiceError::ExternalService(e.to_string()))?;

            comment = comment.with_attachment(AttachmentMeta {
                kind: processed.kind,
                name: processed.name,
                size: processed.size,
                url,
            });
        }

        // Persist before any side effect becomes observable
        self.ctx.comment_repo().create(&comment).await?;

        info!(comment_id = %comment.id, is_reply = comment.is_reply(), "Comment created");

        self.invalidate_cache().await;

        let response = CommentResponse::from(&comment);
        self.publish_new_comment(&response).await;

        Ok(response)
    }

    /// Replace a comment's text. Attachment fields are immutable here.
    #[instrument(skip(self, request))]
    pub async fn update_comment_text(
        &self,
        id: Snowflake,
        request: UpdateCommentRequest,
    ) -> ServiceResult<CommentResponse> {
        markup::sanitize(&request.text).map_err(ServiceError::Validation)?;

        let mut comment = self
            .ctx
            .comment_repo()
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Comment", id.to_string()))?;

        comment.edit_text(request.text);
        self.ctx.comment_repo().update_text(&comment).await?;

        info!(comment_id = %id, "Comment text updated");

        self.invalidate_cache().await;

        Ok(CommentResponse::from(&comment))
    }

    /// List a page of comments, newest first, through the read cache.
    ///
    /// A page past the end returns empty data, not an error.
    #[instrument(skip(self))]
    pub async fn list_comments(
        &self,
        page: i64,
        per_page: i64,
    ) -> ServiceResult<PageResponse<CommentResponse>> {
        if per_page <= 0 {
            return Err(DomainError::InvalidPageSize(per_page).into());
        }
        let page = page.max(1);

        // Cache is best-effort; failures fall through to the store
        match self.ctx.page_cache().get(page, per_page).await {
            Ok(Some(cached)) => return Ok(cached),
            Ok(None) => {}
            Err(e) => warn!(error = %e, "Page cache read failed, querying store"),
        }

        let total = self.ctx.comment_repo().count().await?;
        let comments = self
            .ctx
            .comment_repo()
            .list_page(PageRequest::new(page, per_page))
            .await?;

        let response = PageResponse {
            data: comments.iter().map(CommentResponse::from).collect(),
            meta: PageMeta::new(total, per_page, page),
        };

        if let Err(e) = self.ctx.page_cache().set(page, per_page, &response).await {
            warn!(error = %e, "Page cache write failed");
        }

        Ok(response)
    }

    async fn verify_captcha(
        &self,
        token: Option<&str>,
        remote_ip: Option<&str>,
    ) -> ServiceResult<()> {
        match self
            .ctx
            .captcha()
            .verify(token.unwrap_or(""), remote_ip)
            .await
        {
            Ok(true) => Ok(()),
            Ok(false) => Err(ServiceError::CaptchaRejected),
            Err(e) => Err(ServiceError::ExternalService(e.to_string())),
        }
    }

    /// Clear-all invalidation; a cache failure never fails the write
    async fn invalidate_cache(&self) {
        if let Err(e) = self.ctx.page_cache().clear().await {
            warn!(error = %e, "Page cache invalidation failed");
        }
    }

    /// Fire-and-forget publish; failure is logged, never rolled back
    async fn publish_new_comment(&self, response: &CommentResponse) {
        match serde_json::to_value(response) {
            Ok(payload) => {
                if let Err(e) = self.ctx.notifier().publish_new_comment(&payload).await {
                    warn!(error = %e, "new_comment publish failed");
                }
            }
            Err(e) => warn!(error = %e, "Failed to serialize comment for publish"),
        }
    }
}
