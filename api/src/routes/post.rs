use crate::{
    AppState,
    auth::AuthUser,
    dto::{CreatePostRequest, PageParams},
    errors::ApiError,
    models::Post,
    pagination::{Page, Paginator},
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

/// POST /posts
/// Headers: Authorization: Bearer <token>
/// Body: { "text": "...", "group_id": "..."?, "image": "..."? }
pub async fn create_post(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(payload): Json<CreatePostRequest>,
) -> Result<(StatusCode, Json<Post>), ApiError> {
    payload
        .validate()
        .map_err(|e| ApiError::ValidationError(e.to_string()))?;

    if let Some(group_id) = payload
        .group_id
        .filter(|id| !state.groups.contains_id(id))
    {
        return Err(ApiError::ValidationError(format!("Unknown group: {group_id}")));
    }

    let mut post = Post::new(user.id, payload.text);
    post.group_id = payload.group_id;
    post.image = payload.image;

    let post = state.posts.insert(post);

    info!("Post created: {} by user {}", post.id, user.id);

    Ok((StatusCode::CREATED, Json(post)))
}

/// GET /posts?page=1
pub async fn get_posts(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Json<Page<Post>> {
    let posts = state.posts.all();

    Json(Paginator::new(posts, state.config.page_size).get_page(params.page_number()))
}

/// GET /posts/{id}
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Post>, ApiError> {
    let post = state.posts.get(&id).ok_or(ApiError::NotFound)?;

    Ok(Json(post))
}

/// DELETE /posts/{id}
/// Headers: Authorization: Bearer <token>
pub async fn delete_post(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let post = state.posts.get(&id).ok_or(ApiError::NotFound)?;

    // Check ownership
    if post.author_id != user.id {
        return Err(ApiError::Forbidden);
    }

    state.posts.remove(&id);

    info!("Post deleted: {} by user {}", id, user.id);

    Ok(StatusCode::NO_CONTENT)
}
