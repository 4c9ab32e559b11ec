use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("User already exists")]
    UserAlreadyExists,
    #[error("Group already exists")]
    GroupAlreadyExists,
    #[error("Forbidden")]
    Forbidden,
    #[error("Not Found")]
    NotFound,
    #[error("{0}")]
    ValidationError(String),
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::UserAlreadyExists | ApiError::GroupAlreadyExists => StatusCode::CONFLICT,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::ValidationError(_) => StatusCode::BAD_REQUEST,
            ApiError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// JSON `{"error": ...}` with the variant's status.
///
/// Unauthenticated callers never reach this: the `AuthUser` extractor
/// answers them with a login redirect instead.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            // Details stay in the log
            ApiError::InternalError(_) => {
                error!("{}", self);
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_of(err: ApiError) -> serde_json::Value {
        let bytes = to_bytes(err.into_response().into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn maps_variants_to_status_codes() {
        let cases = [
            (ApiError::UserAlreadyExists, StatusCode::CONFLICT),
            (ApiError::GroupAlreadyExists, StatusCode::CONFLICT),
            (ApiError::Forbidden, StatusCode::FORBIDDEN),
            (ApiError::NotFound, StatusCode::NOT_FOUND),
            (ApiError::ValidationError("bad".into()), StatusCode::BAD_REQUEST),
            (
                ApiError::InternalError("boom".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[tokio::test]
    async fn body_uses_display_message() {
        assert_eq!(
            body_of(ApiError::ValidationError("Unknown group".into())).await["error"],
            "Unknown group"
        );
        assert_eq!(body_of(ApiError::NotFound).await["error"], "Not Found");
    }

    #[tokio::test]
    async fn internal_details_are_hidden() {
        let body = body_of(ApiError::InternalError("db exploded".into())).await;
        assert_eq!(body["error"], "Internal server error");
    }
}
