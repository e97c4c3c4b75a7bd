use crate::models::{Music, UpdateMusicRequest, User};
use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

/// Repository Trait
///
/// The abstract contract for all persistence operations, so handlers interact
/// with the data layer without knowing the concrete backend (Postgres in
/// production, an in-memory mock in tests).
///
/// Every method returns `Result<_, sqlx::Error>`; the error boundary in
/// `error.rs` downgrades whatever comes out of here into the API taxonomy.
/// Absence is modeled as `Ok(None)` / `Ok(false)`, never as an error, so
/// "not found" and "not yours" stay indistinguishable to callers.
#[async_trait]
pub trait Repository: Send + Sync {
    // --- User Entity Store ---

    /// One page of users plus the total live count.
    async fn list_users(&self, limit: i64, offset: i64) -> Result<(Vec<User>, i64), sqlx::Error>;
    async fn get_user(&self, id: i64) -> Result<Option<User>, sqlx::Error>;
    /// Credential lookup for login and for pre-insert uniqueness checks.
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, sqlx::Error>;
    /// Inserts a user. The password must already be hashed; the unique index
    /// on `username` surfaces duplicates as a database error.
    async fn create_user(
        &self,
        username: &str,
        password_hash: &str,
        is_admin: bool,
    ) -> Result<User, sqlx::Error>;
    /// Partial update: `None` fields keep their current value.
    async fn update_user(
        &self,
        id: i64,
        username: Option<String>,
        password_hash: Option<String>,
    ) -> Result<Option<User>, sqlx::Error>;
    /// Returns true if a row was removed. Musics cascade at the schema level.
    async fn delete_user(&self, id: i64) -> Result<bool, sqlx::Error>;

    // --- Music Entity Store ---

    /// One page across all owners (administrative/public listing).
    async fn list_musics(&self, limit: i64, offset: i64)
    -> Result<(Vec<Music>, i64), sqlx::Error>;
    async fn list_musics_by_owner(
        &self,
        owner_id: i64,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Music>, i64), sqlx::Error>;
    async fn list_favorites_by_owner(
        &self,
        owner_id: i64,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Music>, i64), sqlx::Error>;
    async fn get_music(&self, id: i64) -> Result<Option<Music>, sqlx::Error>;
    async fn create_music(
        &self,
        owner_id: i64,
        name: &str,
        description: &str,
        link: &str,
    ) -> Result<Music, sqlx::Error>;
    /// Owner-scoped: only touches a row whose `id` AND `user_id` both match.
    /// A mismatched owner reads as `Ok(None)`.
    async fn update_music(
        &self,
        id: i64,
        owner_id: i64,
        req: UpdateMusicRequest,
    ) -> Result<Option<Music>, sqlx::Error>;
    /// Owner-scoped, same double predicate as `update_music`.
    async fn delete_music(&self, id: i64, owner_id: i64) -> Result<bool, sqlx::Error>;
}

/// The concrete type used to share the persistence layer across the
/// application state.
pub type RepositoryState = Arc<dyn Repository>;

const USER_COLUMNS: &str = "id, username, password_hash, is_admin, created_at, updated_at";
const MUSIC_COLUMNS: &str = "id, name, description, link, favorite, user_id, created_at, updated_at";

/// PostgresRepository
///
/// The production implementation of [`Repository`], backed by a PgPool.
pub struct PostgresRepository {
    pool: PgPool,
}

impl PostgresRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository for PostgresRepository {
    async fn list_users(&self, limit: i64, offset: i64) -> Result<(Vec<User>, i64), sqlx::Error> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY id LIMIT $1 OFFSET $2"
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok((users, total))
    }

    async fn get_user(&self, id: i64) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = $1"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await
    }

    async fn create_user(
        &self,
        username: &str,
        password_hash: &str,
        is_admin: bool,
    ) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (username, password_hash, is_admin) \
             VALUES ($1, $2, $3) RETURNING {USER_COLUMNS}"
        ))
        .bind(username)
        .bind(password_hash)
        .bind(is_admin)
        .fetch_one(&self.pool)
        .await
    }

    /// COALESCE keeps whichever columns the caller left as `None`.
    async fn update_user(
        &self,
        id: i64,
        username: Option<String>,
        password_hash: Option<String>,
    ) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!(
            "UPDATE users \
             SET username = COALESCE($2, username), \
                 password_hash = COALESCE($3, password_hash), \
                 updated_at = NOW() \
             WHERE id = $1 RETURNING {USER_COLUMNS}"
        ))
        .bind(id)
        .bind(username)
        .bind(password_hash)
        .fetch_optional(&self.pool)
        .await
    }

    async fn delete_user(&self, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_musics(
        &self,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Music>, i64), sqlx::Error> {
        let musics = sqlx::query_as::<_, Music>(&format!(
            "SELECT {MUSIC_COLUMNS} FROM musics ORDER BY id LIMIT $1 OFFSET $2"
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM musics")
            .fetch_one(&self.pool)
            .await?;

        Ok((musics, total))
    }

    async fn list_musics_by_owner(
        &self,
        owner_id: i64,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Music>, i64), sqlx::Error> {
        let musics = sqlx::query_as::<_, Music>(&format!(
            "SELECT {MUSIC_COLUMNS} FROM musics WHERE user_id = $1 \
             ORDER BY id LIMIT $2 OFFSET $3"
        ))
        .bind(owner_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM musics WHERE user_id = $1")
            .bind(owner_id)
            .fetch_one(&self.pool)
            .await?;

        Ok((musics, total))
    }

    async fn list_favorites_by_owner(
        &self,
        owner_id: i64,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Music>, i64), sqlx::Error> {
        let musics = sqlx::query_as::<_, Music>(&format!(
            "SELECT {MUSIC_COLUMNS} FROM musics WHERE user_id = $1 AND favorite = true \
             ORDER BY id LIMIT $2 OFFSET $3"
        ))
        .bind(owner_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM musics WHERE user_id = $1 AND favorite = true",
        )
        .bind(owner_id)
        .fetch_one(&self.pool)
        .await?;

        Ok((musics, total))
    }

    async fn get_music(&self, id: i64) -> Result<Option<Music>, sqlx::Error> {
        sqlx::query_as::<_, Music>(&format!("SELECT {MUSIC_COLUMNS} FROM musics WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn create_music(
        &self,
        owner_id: i64,
        name: &str,
        description: &str,
        link: &str,
    ) -> Result<Music, sqlx::Error> {
        sqlx::query_as::<_, Music>(&format!(
            "INSERT INTO musics (name, description, link, user_id) \
             VALUES ($1, $2, $3, $4) RETURNING {MUSIC_COLUMNS}"
        ))
        .bind(name)
        .bind(description)
        .bind(link)
        .bind(owner_id)
        .fetch_one(&self.pool)
        .await
    }

    /// The `id AND user_id` predicate is the data-layer ownership check:
    /// another owner's row affects zero rows and returns `None`.
    async fn update_music(
        &self,
        id: i64,
        owner_id: i64,
        req: UpdateMusicRequest,
    ) -> Result<Option<Music>, sqlx::Error> {
        sqlx::query_as::<_, Music>(&format!(
            "UPDATE musics \
             SET name = $3, description = $4, link = $5, \
                 favorite = COALESCE($6, favorite), updated_at = NOW() \
             WHERE id = $1 AND user_id = $2 RETURNING {MUSIC_COLUMNS}"
        ))
        .bind(id)
        .bind(owner_id)
        .bind(req.name)
        .bind(req.description)
        .bind(req.link)
        .bind(req.favorite)
        .fetch_optional(&self.pool)
        .await
    }

    async fn delete_music(&self, id: i64, owner_id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM musics WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
