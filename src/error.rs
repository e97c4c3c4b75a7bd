use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;

/// ApiError
///
/// The single error taxonomy for the whole request pipeline. Every failure a
/// handler can produce maps to exactly one variant, and the variant alone
/// decides the HTTP status. Clients only ever see a `{ "msg": ... }` body;
/// internal details stay in the logs.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// A request field is missing, empty, or malformed (400).
    #[error("{0}")]
    Validation(String),
    /// No valid bearer token accompanied the request (401).
    #[error("{0}")]
    Unauthorized(String),
    /// The caller is authenticated but the role/ownership rules say no (403).
    #[error("{0}")]
    Forbidden(String),
    /// The targeted resource does not exist — or is not visible to the
    /// caller, which must be indistinguishable (404).
    #[error("{0}")]
    NotFound(String),
    /// A uniqueness invariant was violated, e.g. a duplicate username (409).
    #[error("{0}")]
    Conflict(String),
    /// Unexpected storage or hashing failure (500). The generic message is
    /// deliberate; the cause has already been logged where it occurred.
    #[error("Internal Server Error")]
    Internal,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Shorthand for the canonical "nothing here" response used by lookups
    /// and by the ownership double-predicate misses.
    pub fn no_data() -> Self {
        ApiError::NotFound("No data found".to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status(), Json(json!({ "msg": self.to_string() }))).into_response()
    }
}

/// All storage-layer failures are downgraded at this boundary: row misses
/// become 404, uniqueness violations become 409, anything else is logged and
/// surfaces as a generic 500.
impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => ApiError::no_data(),
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                ApiError::Conflict("Username already taken".to_string())
            }
            other => {
                tracing::error!("database error: {:?}", other);
                ApiError::Internal
            }
        }
    }
}

impl From<bcrypt::BcryptError> for ApiError {
    fn from(err: bcrypt::BcryptError) -> Self {
        tracing::error!("password hashing error: {:?}", err);
        ApiError::Internal
    }
}

impl From<jsonwebtoken::errors::Error> for ApiError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        tracing::error!("token signing error: {:?}", err);
        ApiError::Internal
    }
}
