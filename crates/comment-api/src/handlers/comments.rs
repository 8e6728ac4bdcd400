//! Comment handlers
//!
//! Endpoints for the comment stream: create (multipart, optional
//! attachment), paged listing, and text-only updates.

use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use validator::Validate;

use comment_service::{
    CommentResponse, CommentService, CreateCommentRequest, PageResponse, UpdateCommentRequest,
    Upload,
};

use crate::extractors::{AuthUser, Pagination, RemoteIp, ValidatedJson};
use crate::response::{ApiError, ApiResult, Created};
use crate::state::AppState;

/// Create comment
///
/// POST /api/v1/comments (multipart/form-data)
///
/// Fields: `text`, optional `parent_comment_id`, optional `captcha_token`,
/// optional `attachment` file part.
pub async fn create_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    remote_ip: RemoteIp,
    multipart: Multipart,
) -> ApiResult<Created<Json<CommentResponse>>> {
    let (request, upload) = read_create_form(multipart).await?;
    request.validate()?;

    let service = CommentService::new(state.service_context());
    let response = service
        .create_comment(auth.user_id, request, upload, remote_ip.0.as_deref())
        .await?;

    Ok(Created(Json(response)))
}

/// List comments
///
/// GET /api/v1/comments?page=&per_page=
pub async fn list_comments(
    State(state): State<AppState>,
    pagination: Pagination,
) -> ApiResult<Json<PageResponse<CommentResponse>>> {
    let service = CommentService::new(state.service_context());
    let response = service
        .list_comments(pagination.page, pagination.per_page)
        .await?;

    Ok(Json(response))
}

/// Update comment text
///
/// PATCH /api/v1/comments/{comment_id}
pub async fn update_comment(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(comment_id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateCommentRequest>,
) -> ApiResult<Json<CommentResponse>> {
    let comment_id = comment_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid comment_id format"))?;

    let service = CommentService::new(state.service_context());
    let response = service.update_comment_text(comment_id, request).await?;

    Ok(Json(response))
}

/// Pull the create-comment fields and the optional attachment out of a
/// multipart body. An aborted upload errors here, before the service runs,
/// so partial bytes never reach persistence.
async fn read_create_form(
    mut multipart: Multipart,
) -> Result<(CreateCommentRequest, Option<Upload>), ApiError> {
    let mut request = CreateCommentRequest::default();
    let mut upload = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::invalid_multipart(e.to_string()))?
    {
        let name = field.name().map(ToString::to_string);
        match name.as_deref() {
            Some("text") => {
                request.text = field
                    .text()
                    .await
                    .map_err(|e| ApiError::invalid_multipart(e.to_string()))?;
            }
            Some("parent_comment_id") => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| ApiError::invalid_multipart(e.to_string()))?;
                if !value.is_empty() {
                    request.parent_comment_id = Some(value);
                }
            }
            Some("captcha_token") => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| ApiError::invalid_multipart(e.to_string()))?;
                if !value.is_empty() {
                    request.captcha_token = Some(value);
                }
            }
            Some("attachment") => {
                let filename = field
                    .file_name()
                    .map(ToString::to_string)
                    .ok_or_else(|| ApiError::invalid_multipart("attachment part needs a filename"))?;
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::invalid_multipart(e.to_string()))?
                    .to_vec();
                upload = Some(Upload { filename, bytes });
            }
            _ => {
                // Unknown part; drain and ignore
                let _ = field.bytes().await;
            }
        }
    }

    Ok((request, upload))
}
