use crate::{
    AppState,
    auth::AuthUser,
    dto::{Found, PageParams},
    errors::ApiError,
    feed::get_feed,
    models::Post,
    pagination::Page,
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::Uri,
};

/// GET /follow/?page=1
/// Headers: Authorization: Bearer <token>
pub async fn follow_index(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Query(params): Query<PageParams>,
) -> Json<Page<Post>> {
    Json(get_feed(
        state.follows.as_ref(),
        &state.posts,
        user.id,
        params.page_number(),
        state.config.page_size,
    ))
}

/// GET /profile/{username}/follow
/// Always redirects to the profile, whether or not an edge was created.
pub async fn profile_follow(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(username): Path<String>,
    uri: Uri,
) -> Result<Found, ApiError> {
    let author = state
        .users
        .find_by_username(&username)
        .ok_or(ApiError::NotFound)?;

    state.follow(user.id, author.id);

    Ok(Found(profile_path(uri.path())))
}

/// GET /profile/{username}/unfollow
pub async fn profile_unfollow(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(username): Path<String>,
    uri: Uri,
) -> Result<Found, ApiError> {
    let author = state
        .users
        .find_by_username(&username)
        .ok_or(ApiError::NotFound)?;

    state.follows.delete_edge(user.id, author.id);

    Ok(Found(profile_path(uri.path())))
}

/// `/profile/<name>/follow[/]` -> `/profile/<name>/`, keeping the name as it
/// was encoded in the request.
fn profile_path(action_path: &str) -> String {
    let trimmed = action_path.trim_end_matches('/');
    match trimmed.rfind('/') {
        Some(idx) => trimmed[..=idx].to_string(),
        None => "/".to_string(),
    }
}
