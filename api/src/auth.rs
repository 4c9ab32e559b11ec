use crate::{AppState, dto::Found, errors::ApiError, models::User};
use axum::{
    extract::{FromRequestParts, OptionalFromRequestParts},
    http::{HeaderMap, header, request::Parts},
    response::{IntoResponse, Response},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Characters escaped in the `next` value; `/` stays readable.
const NEXT_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'/')
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Token claims issued by the identity provider.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Subject (user ID)
    pub username: String,
    pub exp: usize,
}

pub fn create_token(user_id: &Uuid, username: &str, secret: &str) -> Result<String, ApiError> {
    let expiration = Utc::now()
        .checked_add_signed(Duration::hours(24))
        .ok_or_else(|| ApiError::InternalError("Failed to calculate expiration".into()))?
        .timestamp() as usize;

    let claims = Claims {
        sub: user_id.to_string(),
        username: username.to_string(),
        exp: expiration,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| ApiError::InternalError(format!("Token Creation failed: {}", e)))
}

/// Returns the claims of a valid `Authorization: Bearer` token, if any.
pub fn validate_token(headers: &HeaderMap, secret: &str) -> Option<Claims> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())?;

    let token = auth_header.strip_prefix("Bearer ")?;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .ok()
}

/// Where an anonymous request to `path` gets sent.
pub fn login_redirect(login_url: &str, path: &str) -> Found {
    let next = utf8_percent_encode(path, NEXT_SET);
    Found(format!("{login_url}?next={next}"))
}

/// The authenticated caller.
///
/// Rejects anonymous requests with a redirect to the login page rather than
/// an error, so the identity provider can bring the user back afterwards.
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

impl AuthUser {
    fn resolve(parts: &Parts, state: &AppState) -> Result<Option<Self>, ApiError> {
        let Some(claims) = validate_token(&parts.headers, &state.config.jwt_secret) else {
            return Ok(None);
        };
        let Ok(id) = Uuid::parse_str(&claims.sub) else {
            return Ok(None);
        };

        state.users.ensure(id, &claims.username).map(|user| Some(Self(user)))
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        match Self::resolve(parts, state) {
            Ok(Some(user)) => Ok(user),
            Ok(None) => Err(login_redirect(&state.config.login_url, parts.uri.path()).into_response()),
            Err(e) => Err(e.into_response()),
        }
    }
}

impl OptionalFromRequestParts<AppState> for AuthUser {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Option<Self>, Self::Rejection> {
        Self::resolve(parts, state).map_err(IntoResponse::into_response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn bearer(token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
        );
        headers
    }

    #[test]
    fn token_round_trips_claims() {
        let id = Uuid::new_v4();
        let token = create_token(&id, "leo", "secret").unwrap();

        let claims = validate_token(&bearer(&token), "secret").unwrap();
        assert_eq!(claims.sub, id.to_string());
        assert_eq!(claims.username, "leo");
    }

    #[test]
    fn rejects_wrong_secret_and_missing_header() {
        let token = create_token(&Uuid::new_v4(), "leo", "secret").unwrap();

        assert!(validate_token(&bearer(&token), "other").is_none());
        assert!(validate_token(&HeaderMap::new(), "secret").is_none());
    }

    #[test]
    fn rejects_non_bearer_scheme() {
        let token = create_token(&Uuid::new_v4(), "leo", "secret").unwrap();
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(&token).unwrap());

        assert!(validate_token(&headers, "secret").is_none());
    }

    #[test]
    fn login_redirect_carries_next() {
        let Found(location) = login_redirect("/auth/login/", "/follow/");
        assert_eq!(location, "/auth/login/?next=/follow/");
    }

    #[test]
    fn login_redirect_escapes_query_characters() {
        let Found(plus) = login_redirect("/auth/login/", "/profile/a+b/follow");
        let Found(amp) = login_redirect("/auth/login/", "/profile/x&y/follow");
        let Found(encoded) = login_redirect("/auth/login/", "/profile/%D0%BB/follow");

        assert_eq!(plus, "/auth/login/?next=/profile/a%2Bb/follow");
        assert_eq!(amp, "/auth/login/?next=/profile/x%26y/follow");
        assert_eq!(encoded, "/auth/login/?next=/profile/%25D0%25BB/follow");
    }
}
