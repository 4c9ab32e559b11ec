use crate::{
    AppState,
    auth::AuthUser,
    dto::{PageParams, ProfileResponse, UserResponse},
    errors::ApiError,
    pagination::Paginator,
};
use axum::{
    Json,
    extract::{Path, Query, State},
};

/// GET /profile/{username}/
/// Public. An authenticated viewer also learns whether they follow the author.
pub async fn get_profile(
    State(state): State<AppState>,
    viewer: Option<AuthUser>,
    Path(username): Path<String>,
    Query(params): Query<PageParams>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let author = state
        .users
        .find_by_username(&username)
        .ok_or(ApiError::NotFound)?;

    let posts = state.posts.by_author(author.id);
    let posts_count = posts.len();
    let following = viewer
        .is_some_and(|AuthUser(viewer)| state.follows.is_following(viewer.id, author.id));

    let followers = state.follows.count_followers(author.id);
    let following_count = state.follows.count_following(author.id);

    Ok(Json(ProfileResponse {
        posts_count,
        following,
        page: Paginator::new(posts, state.config.page_size).get_page(params.page_number()),
        author: UserResponse::new(author, followers, following_count),
    }))
}
