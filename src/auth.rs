use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts},
};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::{config::AppConfig, error::ApiError};

// --- Credential Hashing ---

/// Produces a salted bcrypt digest of a plaintext password. The salt is
/// random per call, so hashing the same input twice yields different output.
pub fn hash_password(plaintext: &str, cost: u32) -> Result<String, bcrypt::BcryptError> {
    bcrypt::hash(plaintext, cost)
}

/// Checks a plaintext password against a stored bcrypt hash. Returns false on
/// any mismatch *or* malformed hash — a broken stored hash must read as a
/// failed login, never as a server error.
pub fn verify_password(plaintext: &str, hash: &str) -> bool {
    bcrypt::verify(plaintext, hash).unwrap_or(false)
}

// --- Token Issuing & Verification ---

/// Claims
///
/// The identity payload embedded in every signed token. Mirrors the wire
/// contract exactly: `{ "id": ..., "isAdmin": ... }`.
///
/// There is deliberately no `exp` claim: the observed contract issues
/// long-lived tokens, and verification below disables expiry checks to match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// The user's primary key, used for every ownership comparison downstream.
    pub id: i64,
    /// Role flag granting access to the admin-only surface.
    #[serde(rename = "isAdmin")]
    pub is_admin: bool,
}

/// Signs a token embedding the given identity and role with the process-wide
/// secret (HS256).
pub fn issue_token(
    id: i64,
    is_admin: bool,
    secret: &str,
) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = Claims { id, is_admin };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Validates a token's signature and returns the embedded claims unmodified.
/// Any failure (bad signature, malformed token) is an error; tokens never
/// expire here — see [`Claims`].
pub fn decode_token(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::default();
    validation.validate_exp = false;
    // Tokens carry no registered claims at all, only the identity payload.
    validation.required_spec_claims.clear();

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
}

// --- Request Extractor ---

/// AuthUser
///
/// The resolved identity of an authenticated request: the claims pulled out
/// of a verified bearer token. Handlers take this as an argument wherever
/// authentication is required; ownership and role checks read its fields.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: i64,
    pub is_admin: bool,
}

/// Implements Axum's `FromRequestParts`, making `AuthUser` usable as a
/// function argument in any protected handler. Extraction performs the full
/// authentication step: Bearer header present, signature valid. Rejection is
/// always 401 — a missing and an invalid token are indistinguishable to the
/// caller.
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppConfig: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let config = AppConfig::from_ref(state);

        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(unauthorized)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(unauthorized)?;

        let claims = decode_token(token, &config.jwt_secret).map_err(|_| unauthorized())?;

        Ok(AuthUser {
            id: claims.id,
            is_admin: claims.is_admin,
        })
    }
}

fn unauthorized() -> ApiError {
    ApiError::Unauthorized("JWT token was not provided or is invalid".to_string())
}
