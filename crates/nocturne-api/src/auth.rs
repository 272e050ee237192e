//! Caller identity extraction.
//!
//! Session verification is the identity collaborator's job: a fronting
//! auth layer validates the session and forwards the caller's user id in
//! the `x-user-id` header. This service trusts the forwarded id as given
//! and never inspects credentials itself.

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use uuid::Uuid;

use crate::error::ApiError;

/// Header carrying the verified caller id.
pub const CALLER_ID_HEADER: &str = "x-user-id";

/// The authenticated caller. Rejects with 401 when the identity header is
/// missing or malformed.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(CALLER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized("Authentication required".to_string()))?;

        let id = value
            .parse::<Uuid>()
            .map_err(|_| ApiError::Unauthorized("Invalid identity header".to_string()))?;

        Ok(AuthUser(id))
    }
}

/// The caller's identity when present. Absence is fine (public routes);
/// a malformed header is still rejected rather than silently dropped.
#[derive(Debug, Clone, Copy)]
pub struct OptionalAuthUser(pub Option<Uuid>);

#[async_trait]
impl<S> FromRequestParts<S> for OptionalAuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match parts.headers.get(CALLER_ID_HEADER) {
            None => Ok(OptionalAuthUser(None)),
            Some(value) => {
                let id = value
                    .to_str()
                    .ok()
                    .and_then(|v| v.parse::<Uuid>().ok())
                    .ok_or_else(|| {
                        ApiError::Unauthorized("Invalid identity header".to_string())
                    })?;
                Ok(OptionalAuthUser(Some(id)))
            }
        }
    }
}
