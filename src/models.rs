use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ts_rs::TS;
use utoipa::ToSchema;

use crate::pagination::Page;

// --- Core Application Schemas (Mapped to Database) ---

/// User
///
/// A row of the `users` table. `password_hash` never leaves the process: it
/// is skipped during serialization, so no response shape can leak it.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct User {
    pub id: i64,
    /// Unique across all live users.
    pub username: String,
    /// Salted bcrypt digest; always set, never transmitted.
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// Role flag. Admins may list users, create admins, and bypass
    /// ownership checks on user mutations.
    pub is_admin: bool,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
    #[ts(type = "string")]
    pub updated_at: DateTime<Utc>,
}

/// Music
///
/// A row of the `musics` table. Every music belongs to exactly one user
/// (`user_id`); the row cannot outlive its owner — deletion cascades.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Music {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub link: String,
    /// Marks the entry for the owner's favorites listing. Defaults to false.
    pub favorite: bool,
    /// FK to `users.id` — the owning user.
    pub user_id: i64,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
    #[ts(type = "string")]
    pub updated_at: DateTime<Utc>,
}

// --- Request Payloads (Input Schemas) ---

/// Input for `POST /login`.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Input for `POST /user` and `POST /user/admin`. The plaintext password is
/// hashed before it ever reaches the repository.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
}

/// Partial update payload for `PUT /user/{userId}`. Only provided fields are
/// replaced; a provided password is re-hashed, an omitted one is untouched.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct UpdateUserRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// Input for `POST /music`. All three fields are required and non-empty;
/// `favorite` always starts false.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct CreateMusicRequest {
    pub name: String,
    pub description: String,
    pub link: String,
}

/// Input for `PUT /music/{musicId}`. The text fields are full replacements;
/// `favorite` is optional so the flag can be toggled without a separate
/// endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct UpdateMusicRequest {
    pub name: String,
    pub description: String,
    pub link: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favorite: Option<bool>,
}

// --- Response Schemas (Output) ---

/// Output of a successful `POST /login`.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct LoginResponse {
    pub msg: String,
    pub token: String,
}

/// The uniform body for status-only responses and every error.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct MessageResponse {
    pub msg: String,
}

/// Output of `GET /user/{userId}`: the user's public identity together with
/// one page of their musics.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct UserMusics {
    pub username: String,
    pub musics: Page<Music>,
}
