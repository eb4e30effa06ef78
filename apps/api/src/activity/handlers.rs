//! Axum route handlers for the activity feed.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tracing::info;
use uuid::Uuid;

use crate::activity::feed::{clamp_limit, validate_body};
use crate::auth::extract::{AdminSession, StaffSession};
use crate::errors::AppError;
use crate::models::activity::{ActivityCommentRow, ActivityPostRow};
use crate::state::AppState;
use crate::storage::staff_owns_key;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub body: String,
    pub image_key: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct FeedQuery {
    pub before: Option<DateTime<Utc>>,
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct CommentRequest {
    pub body: String,
}

/// Feed item: a post joined with its author and interaction counts.
#[derive(Debug, Serialize, FromRow)]
pub struct FeedItemRow {
    pub id: Uuid,
    pub author_id: Uuid,
    pub author_name: String,
    pub body: String,
    pub image_key: Option<String>,
    pub created_at: DateTime<Utc>,
    pub like_count: i64,
    pub comment_count: i64,
}

#[derive(Debug, Serialize)]
pub struct PostDetailResponse {
    pub post: FeedItemRow,
    pub comments: Vec<ActivityCommentRow>,
}

#[derive(Debug, Serialize)]
pub struct LikeResponse {
    pub liked: bool,
    pub like_count: i64,
}

const FEED_ITEM_SELECT: &str = r#"
    SELECT p.id, p.author_id, u.full_name AS author_name, p.body, p.image_key, p.created_at,
           (SELECT COUNT(*) FROM activity_likes l WHERE l.post_id = p.id) AS like_count,
           (SELECT COUNT(*) FROM activity_comments c WHERE c.post_id = p.id) AS comment_count
    FROM activity_posts p
    JOIN staff_users u ON u.id = p.author_id
"#;

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/staff/posts
pub async fn handle_create_post(
    State(state): State<AppState>,
    StaffSession(staff): StaffSession,
    Json(request): Json<CreatePostRequest>,
) -> Result<(StatusCode, Json<ActivityPostRow>), AppError> {
    validate_body(&request.body).map_err(AppError::Validation)?;

    // An attached image must have been uploaded to the author's feed prefix.
    if let Some(key) = &request.image_key {
        if !staff_owns_key(staff.id, key) || !key.starts_with("feed/") {
            return Err(AppError::Validation(
                "image_key does not reference one of your feed uploads".to_string(),
            ));
        }
    }

    let post: ActivityPostRow = sqlx::query_as(
        "INSERT INTO activity_posts (id, author_id, body, image_key) VALUES ($1, $2, $3, $4) RETURNING *",
    )
    .bind(Uuid::new_v4())
    .bind(staff.id)
    .bind(request.body.trim())
    .bind(&request.image_key)
    .fetch_one(&state.db)
    .await?;

    info!("Staff {} posted {}", staff.id, post.id);
    Ok((StatusCode::CREATED, Json(post)))
}

/// GET /api/staff/feed?before&limit
pub async fn handle_get_feed(
    State(state): State<AppState>,
    StaffSession(_staff): StaffSession,
    Query(params): Query<FeedQuery>,
) -> Result<Json<Vec<FeedItemRow>>, AppError> {
    let limit = clamp_limit(params.limit);

    let sql = format!(
        "{FEED_ITEM_SELECT}
         WHERE ($1::timestamptz IS NULL OR p.created_at < $1)
         ORDER BY p.created_at DESC
         LIMIT $2"
    );
    let items: Vec<FeedItemRow> = sqlx::query_as(&sql)
        .bind(params.before)
        .bind(limit)
        .fetch_all(&state.db)
        .await?;

    Ok(Json(items))
}

/// GET /api/staff/posts/:id
pub async fn handle_get_post(
    State(state): State<AppState>,
    Path(post_id): Path<Uuid>,
    StaffSession(_staff): StaffSession,
) -> Result<Json<PostDetailResponse>, AppError> {
    let sql = format!("{FEED_ITEM_SELECT} WHERE p.id = $1");
    let post: Option<FeedItemRow> = sqlx::query_as(&sql)
        .bind(post_id)
        .fetch_optional(&state.db)
        .await?;
    let post = post.ok_or_else(|| AppError::NotFound(format!("Post {post_id} not found")))?;

    let comments: Vec<ActivityCommentRow> = sqlx::query_as(
        "SELECT * FROM activity_comments WHERE post_id = $1 ORDER BY created_at ASC",
    )
    .bind(post_id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(PostDetailResponse { post, comments }))
}

/// POST /api/staff/posts/:id/likes
///
/// Toggle: likes again to unlike.
pub async fn handle_toggle_like(
    State(state): State<AppState>,
    Path(post_id): Path<Uuid>,
    StaffSession(staff): StaffSession,
) -> Result<Json<LikeResponse>, AppError> {
    ensure_post_exists(&state.db, post_id).await?;

    let existing: Option<Uuid> =
        sqlx::query_scalar("SELECT id FROM activity_likes WHERE post_id = $1 AND staff_id = $2")
            .bind(post_id)
            .bind(staff.id)
            .fetch_optional(&state.db)
            .await?;

    let liked = match existing {
        Some(like_id) => {
            sqlx::query("DELETE FROM activity_likes WHERE id = $1")
                .bind(like_id)
                .execute(&state.db)
                .await?;
            false
        }
        None => {
            sqlx::query("INSERT INTO activity_likes (id, post_id, staff_id) VALUES ($1, $2, $3)")
                .bind(Uuid::new_v4())
                .bind(post_id)
                .bind(staff.id)
                .execute(&state.db)
                .await?;
            true
        }
    };

    let like_count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM activity_likes WHERE post_id = $1")
            .bind(post_id)
            .fetch_one(&state.db)
            .await?;

    Ok(Json(LikeResponse { liked, like_count }))
}

/// POST /api/staff/posts/:id/comments
pub async fn handle_comment_post(
    State(state): State<AppState>,
    Path(post_id): Path<Uuid>,
    StaffSession(staff): StaffSession,
    Json(request): Json<CommentRequest>,
) -> Result<(StatusCode, Json<ActivityCommentRow>), AppError> {
    validate_body(&request.body).map_err(AppError::Validation)?;
    ensure_post_exists(&state.db, post_id).await?;

    let comment: ActivityCommentRow = sqlx::query_as(
        "INSERT INTO activity_comments (id, post_id, author_id, body) VALUES ($1, $2, $3, $4) RETURNING *",
    )
    .bind(Uuid::new_v4())
    .bind(post_id)
    .bind(staff.id)
    .bind(request.body.trim())
    .fetch_one(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(comment)))
}

/// DELETE /api/staff/posts/:id — author only.
pub async fn handle_delete_own_post(
    State(state): State<AppState>,
    Path(post_id): Path<Uuid>,
    StaffSession(staff): StaffSession,
) -> Result<StatusCode, AppError> {
    let post: Option<ActivityPostRow> =
        sqlx::query_as("SELECT * FROM activity_posts WHERE id = $1")
            .bind(post_id)
            .fetch_optional(&state.db)
            .await?;
    let post = post.ok_or_else(|| AppError::NotFound(format!("Post {post_id} not found")))?;

    if post.author_id != staff.id {
        return Err(AppError::Forbidden);
    }

    sqlx::query("DELETE FROM activity_posts WHERE id = $1")
        .bind(post.id)
        .execute(&state.db)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/admin/posts/:id — moderation.
pub async fn handle_admin_delete_post(
    State(state): State<AppState>,
    Path(post_id): Path<Uuid>,
    AdminSession(admin): AdminSession,
) -> Result<StatusCode, AppError> {
    let deleted = sqlx::query("DELETE FROM activity_posts WHERE id = $1")
        .bind(post_id)
        .execute(&state.db)
        .await?;

    if deleted.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Post {post_id} not found")));
    }

    info!("Admin {} removed post {}", admin.id, post_id);
    Ok(StatusCode::NO_CONTENT)
}

async fn ensure_post_exists(db: &sqlx::PgPool, post_id: Uuid) -> Result<(), AppError> {
    let exists: Option<Uuid> = sqlx::query_scalar("SELECT id FROM activity_posts WHERE id = $1")
        .bind(post_id)
        .fetch_optional(db)
        .await?;
    exists
        .map(|_| ())
        .ok_or_else(|| AppError::NotFound(format!("Post {post_id} not found")))
}
