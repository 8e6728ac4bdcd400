//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance (with the comments migration applied)
//! - Running Redis instance
//! - Environment variables: DATABASE_URL, REDIS_URL
//!
//! Run with: cargo test -p integration-tests --test api_tests

use comment_service::{CommentResponse, PageResponse};
use integration_tests::{assert_json, assert_status, check_test_env, fixtures::*, TestServer};
use reqwest::StatusCode;

const SENDER: i64 = 1001;

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Create Tests
// ============================================================================

#[tokio::test]
async fn test_create_plain_comment() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let text = unique_text("hello");

    let response = server
        .post_multipart("/api/v1/comments", SENDER, comment_form(&text))
        .await
        .unwrap();
    let comment: CommentResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(comment.text, text);
    assert_eq!(comment.sender_id, SENDER.to_string());
    assert!(!comment.is_reply);
    assert!(comment.parent_comment_id.is_none());
    assert!(comment.attachment_type.is_none());
    assert!(comment.attachment_name.is_none());
    assert!(comment.attachment_size.is_none());
}

#[tokio::test]
async fn test_create_reply_derives_is_reply() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .post_multipart("/api/v1/comments", SENDER, comment_form(&unique_text("root")))
        .await
        .unwrap();
    let root: CommentResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let form = with_parent(comment_form(&unique_text("reply")), &root.id);
    let response = server
        .post_multipart("/api/v1/comments", SENDER, form)
        .await
        .unwrap();
    let reply: CommentResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert!(reply.is_reply);
    assert_eq!(reply.parent_comment_id.as_deref(), Some(root.id.as_str()));
}

#[tokio::test]
async fn test_create_with_missing_parent_rejected() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let form = with_parent(comment_form(&unique_text("orphan")), "1");
    let response = server
        .post_multipart("/api/v1/comments", SENDER, form)
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_create_without_identity_rejected() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .post_multipart_anonymous("/api/v1/comments", comment_form("anonymous"))
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

// ============================================================================
// Validation Tests
// ============================================================================

#[tokio::test]
async fn test_script_tag_rejected_with_violation_details() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .post_multipart(
            "/api/v1/comments",
            SENDER,
            comment_form("hi <script>alert(1)</script>"),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json().await.unwrap();
    let details = body["error"]["details"].as_array().expect("violation list");
    assert!(details
        .iter()
        .any(|v| v["code"] == "DISALLOWED_TAG" && v["tag"] == "script"));
}

#[tokio::test]
async fn test_javascript_href_rejected() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .post_multipart(
            "/api/v1/comments",
            SENDER,
            comment_form(r#"<a href="javascript:alert(1)">x</a>"#),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json().await.unwrap();
    let details = body["error"]["details"].as_array().expect("violation list");
    assert!(details.iter().any(|v| v["code"] == "UNSAFE_URL"));
}

#[tokio::test]
async fn test_all_violations_reported_together() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    // disallowed tag + anchor without href in one request
    let response = server
        .post_multipart(
            "/api/v1/comments",
            SENDER,
            comment_form("<b>bold</b> and <a>link</a>"),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json().await.unwrap();
    let details = body["error"]["details"].as_array().expect("violation list");
    assert!(details.len() >= 2);
}

// ============================================================================
// Attachment Tests
// ============================================================================

#[tokio::test]
async fn test_large_jpeg_downscaled() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let original = jpeg_bytes(500, 500);
    let original_len = original.len() as i64;
    let form = with_attachment(comment_form(&unique_text("photo")), "photo.jpg", original);

    let response = server
        .post_multipart("/api/v1/comments", SENDER, form)
        .await
        .unwrap();
    let comment: CommentResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(comment.attachment_type.as_deref(), Some("image"));
    assert_eq!(comment.attachment_name.as_deref(), Some("photo.jpg"));
    assert!(comment.attachment_size.unwrap() <= original_len);
    assert!(comment.attachment_url.is_some());
}

#[tokio::test]
async fn test_small_png_kept_as_is() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let original = png_bytes(64, 64);
    let original_len = original.len() as i64;
    let form = with_attachment(comment_form(&unique_text("icon")), "icon.png", original);

    let response = server
        .post_multipart("/api/v1/comments", SENDER, form)
        .await
        .unwrap();
    let comment: CommentResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(comment.attachment_size, Some(original_len));
}

#[tokio::test]
async fn test_oversized_text_attachment_rejected() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let form = with_attachment(
        comment_form(&unique_text("big")),
        "big.txt",
        text_bytes(150 * 1024),
    );

    let response = server
        .post_multipart("/api/v1/comments", SENDER, form)
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json().await.unwrap();
    let details = body["error"]["details"].as_array().expect("violation list");
    assert!(details.iter().any(|v| v["code"] == "ATTACHMENT_TOO_LARGE"));
}

#[tokio::test]
async fn test_unsupported_attachment_format_rejected() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let form = with_attachment(comment_form(&unique_text("exe")), "tool.exe", vec![1, 2, 3]);
    let response = server
        .post_multipart("/api/v1/comments", SENDER, form)
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ============================================================================
// Listing Tests
// ============================================================================

#[tokio::test]
async fn test_list_meta_and_ordering() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    for text in [unique_text("first"), unique_text("second"), unique_text("third")] {
        let response = server
            .post_multipart("/api/v1/comments", SENDER, comment_form(&text))
            .await
            .unwrap();
        assert_status(response, StatusCode::CREATED).await.unwrap();
    }

    let response = server
        .get("/api/v1/comments?page=1&per_page=2")
        .await
        .unwrap();
    let page: PageResponse<CommentResponse> =
        assert_json(response, StatusCode::OK).await.unwrap();

    assert!(page.data.len() <= 2);
    assert!(page.meta.total >= 3);
    assert_eq!(page.meta.per_page, 2);
    assert_eq!(page.meta.current_page, 1);
    assert_eq!(
        page.meta.last_page,
        (page.meta.total + 1) / 2,
        "last_page should be ceil(total / per_page)"
    );
    // Newest first
    assert!(page
        .data
        .windows(2)
        .all(|pair| pair[0].created_at >= pair[1].created_at));
}

#[tokio::test]
async fn test_page_beyond_last_is_empty_not_error() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .get("/api/v1/comments?page=999999&per_page=25")
        .await
        .unwrap();
    let page: PageResponse<CommentResponse> =
        assert_json(response, StatusCode::OK).await.unwrap();

    assert!(page.data.is_empty());
}

#[tokio::test]
async fn test_non_positive_per_page_rejected() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/api/v1/comments?per_page=0").await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"]["code"], "INVALID_PAGE_SIZE");
}

// ============================================================================
// Update Tests
// ============================================================================

#[tokio::test]
async fn test_update_comment_text() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .post_multipart("/api/v1/comments", SENDER, comment_form(&unique_text("draft")))
        .await
        .unwrap();
    let created: CommentResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let new_text = unique_text("edited");
    let response = server
        .patch(
            &format!("/api/v1/comments/{}", created.id),
            SENDER,
            &serde_json::json!({ "text": new_text }),
        )
        .await
        .unwrap();
    let updated: CommentResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(updated.text, new_text);
    assert!(updated.updated_at.is_some());
    // attachment fields stay untouched through this path
    assert_eq!(updated.attachment_type, created.attachment_type);
}

#[tokio::test]
async fn test_update_missing_comment_is_404() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .patch(
            "/api/v1/comments/1",
            SENDER,
            &serde_json::json!({ "text": "ghost" }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_update_with_invalid_markup_rejected() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .post_multipart("/api/v1/comments", SENDER, comment_form(&unique_text("keep")))
        .await
        .unwrap();
    let created: CommentResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .patch(
            &format!("/api/v1/comments/{}", created.id),
            SENDER,
            &serde_json::json!({ "text": "<script>x</script>" }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}
