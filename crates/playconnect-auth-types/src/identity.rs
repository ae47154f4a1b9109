//! Bearer-token identity extractor.

use axum::extract::FromRequestParts;
use http::StatusCode;
use http::header::AUTHORIZATION;
use http::request::Parts;
use uuid::Uuid;

use crate::token::validate_session_token;

/// Gives the extractor access to the HMAC secret held in application state.
pub trait JwtSecretSource {
    fn jwt_secret(&self) -> &str;
}

/// Authenticated caller, extracted from the `Authorization: Bearer <jwt>` header.
///
/// Absent header, non-bearer scheme, bad signature, and expired token all
/// reject with a uniform 401 — handlers never see the distinction.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: Uuid,
    pub email: String,
}

impl<S> FromRequestParts<S> for Identity
where
    S: JwtSecretSource + Send + Sync,
{
    type Rejection = StatusCode;

    // axum-core 0.5 defines this as `fn -> impl Future + Send` (not `async fn`).
    // Extract and validate synchronously, return a 'static async move block, so
    // the future does not capture `&S` (E0195 under precise capturing).
    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let identity = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .and_then(|token| validate_session_token(token, state.jwt_secret()).ok())
            .map(|info| Self {
                user_id: info.user_id,
                email: info.email,
            });

        async move { identity.ok_or(StatusCode::UNAUTHORIZED) }
    }
}
