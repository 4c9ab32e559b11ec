//! Follow graph and personalised feed for a small blogging platform.
//!
//! Users follow authors; `/follow/` lists posts by everyone the caller
//! follows, newest first. Identity comes from an external provider via
//! bearer tokens.

pub mod auth;
pub mod config;
pub mod dto;
pub mod errors;
pub mod feed;
pub mod models;
pub mod pagination;
pub mod routes;
pub mod states;
pub mod store;

pub use states::AppState;

use axum::{
    Router,
    routing::{get, post},
};
use routes::{
    follow::{follow_index, profile_follow, profile_unfollow},
    group::{create_group, group_posts},
    health::health_check,
    post::{create_post, delete_post, get_post, get_posts},
    profile::get_profile,
    user::get_current_user,
};
use tower::limit::ConcurrencyLimitLayer;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub fn app(state: AppState) -> Router {
    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let max_concurrent = state.config.max_concurrent_requests;

    Router::new()
        // Public routes (no auth required)
        .route("/health", get(health_check))
        .route("/posts", post(create_post).get(get_posts))
        .route("/posts/{id}", get(get_post).delete(delete_post))
        .route("/profile/{username}/", get(get_profile))
        .route("/group/{slug}/", get(group_posts))
        // Protected routes (anonymous callers are sent to the login page)
        .route("/users/me", get(get_current_user))
        .route("/groups", post(create_group))
        .route("/follow", get(follow_index))
        .route("/follow/", get(follow_index))
        .route("/profile/{username}/follow", get(profile_follow))
        .route("/profile/{username}/follow/", get(profile_follow))
        .route("/profile/{username}/unfollow", get(profile_unfollow))
        .route("/profile/{username}/unfollow/", get(profile_unfollow))
        // Add state and middleware
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(ConcurrencyLimitLayer::new(max_concurrent))
}
