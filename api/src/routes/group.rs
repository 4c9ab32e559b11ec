use crate::{
    AppState,
    auth::AuthUser,
    dto::{CreateGroupRequest, GroupResponse, PageParams},
    errors::ApiError,
    models::Group,
    pagination::Paginator,
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::info;
use validator::Validate;

/// POST /groups
/// Headers: Authorization: Bearer <token>
/// Body: { "title": "...", "slug": "...", "description": "..." }
pub async fn create_group(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(payload): Json<CreateGroupRequest>,
) -> Result<(StatusCode, Json<Group>), ApiError> {
    payload
        .validate()
        .map_err(|e| ApiError::ValidationError(e.to_string()))?;

    let group = state.groups.create(Group::new(
        payload.title,
        payload.slug,
        payload.description,
    ))?;

    info!("Group {} created by user {}", group.slug, user.id);

    Ok((StatusCode::CREATED, Json(group)))
}

/// GET /group/{slug}/?page=1
pub async fn group_posts(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(params): Query<PageParams>,
) -> Result<Json<GroupResponse>, ApiError> {
    let group = state.groups.get_by_slug(&slug).ok_or(ApiError::NotFound)?;
    let posts = state.posts.by_group(group.id);

    Ok(Json(GroupResponse {
        group,
        page: Paginator::new(posts, state.config.page_size).get_page(params.page_number()),
    }))
}
