use crate::{
    models::{Group, Post, User},
    pagination::Page,
};
use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub created_at: DateTime<Utc>,
    pub followers_count: usize,
    pub following_count: usize,
}

impl UserResponse {
    pub fn new(user: User, followers_count: usize, following_count: usize) -> Self {
        Self {
            id: user.id,
            username: user.username,
            created_at: user.created_at,
            followers_count,
            following_count,
        }
    }
}

/// Author page: who they are, their posts, and the viewer's relation to them.
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub author: UserResponse,
    pub posts_count: usize,
    /// Always false for anonymous viewers.
    pub following: bool,
    pub page: Page<Post>,
}

#[derive(Debug, Serialize)]
pub struct GroupResponse {
    pub group: Group,
    pub page: Page<Post>,
}

/// `302 Found` to `location`.
#[derive(Debug)]
pub struct Found(pub String);

impl IntoResponse for Found {
    fn into_response(self) -> Response {
        (StatusCode::FOUND, [(header::LOCATION, self.0)]).into_response()
    }
}
