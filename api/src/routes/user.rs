use crate::{AppState, auth::AuthUser, dto::UserResponse};
use axum::{Json, extract::State};

/// GET /users/me
/// Headers: Authorization: Bearer <token>
pub async fn get_current_user(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Json<UserResponse> {
    let followers = state.follows.count_followers(user.id);
    let following = state.follows.count_following(user.id);

    Json(UserResponse::new(user, followers, following))
}
