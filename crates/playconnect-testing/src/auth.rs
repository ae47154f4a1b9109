//! Bearer-token fixtures for handler and extractor tests.
//!
//! Protected routes expect `Authorization: Bearer <jwt>`. `TestAuth` signs a
//! real token with a test secret so no live login flow is needed in tests.

use std::time::{SystemTime, UNIX_EPOCH};

use axum::http::{HeaderMap, HeaderValue};
use jsonwebtoken::{EncodingKey, Header, encode};
use uuid::Uuid;

use playconnect_auth_types::token::JwtClaims;

/// Secret shared by all tests that validate tokens end to end.
pub const TEST_JWT_SECRET: &str = "test-jwt-secret-for-unit-tests-only";

/// Configurable identity whose bearer header is accepted by the [`Identity`]
/// extractor when the state is wired with [`TEST_JWT_SECRET`].
///
/// [`Identity`]: playconnect_auth_types::identity::Identity
pub struct TestAuth {
    pub user_id: Uuid,
    pub email: String,
}

impl TestAuth {
    pub fn new(user_id: Uuid, email: &str) -> Self {
        Self {
            user_id,
            email: email.to_owned(),
        }
    }

    /// Sign a session token for this identity, valid for one hour.
    pub fn token(&self) -> String {
        let exp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system clock before UNIX epoch")
            .as_secs()
            + 3600;
        let claims = JwtClaims {
            sub: self.user_id.to_string(),
            email: self.email.clone(),
            exp,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes()),
        )
        .expect("failed to sign test token")
    }

    /// Return headers as a client would send them.
    pub fn headers(&self) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(
            axum::http::header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.token())).unwrap(),
        );
        map
    }
}
