//! Session-token types shared between the API service and test helpers.
//!
//! Tokens are stateless HS256 JWTs carrying the user id and email. There is
//! no server-side revocation list; expiry is the only invalidation.

pub mod identity;
pub mod token;
