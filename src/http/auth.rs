use axum::{extract::FromRequestParts, http::request::Parts};
use log::warn;

use super::error::ApiError;

/// Header set by the upstream gateway once it has authenticated the caller.
pub const USER_HEADER: &str = "X-Authenticated-Userid";

/// The caller's user id, taken from [`USER_HEADER`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser(pub String);

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let uid = parts
            .headers
            .get(USER_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty());

        match uid {
            Some(uid) => Ok(Self(uid.to_string())),
            None => {
                warn!("rejecting {} {}: no authenticated user", parts.method, parts.uri);
                Err(ApiError::Unauthorized)
            }
        }
    }
}
