use crate::{
    AppState,
    auth::{self, AuthUser},
    error::ApiError,
    models::{
        CreateMusicRequest, CreateUserRequest, LoginRequest, LoginResponse, MessageResponse,
        Music, UpdateMusicRequest, UpdateUserRequest, User, UserMusics,
    },
    pagination::{Page, PageQuery},
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use utoipa::IntoParams;

// --- Filter Structs ---

/// Query parameters for `GET /music/user`: the owner to filter by, plus the
/// shared pagination parameters.
#[derive(Debug, Deserialize, IntoParams)]
pub struct OwnerFilter {
    /// The owning user's id.
    pub id: i64,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// Rejects missing or blank required string fields with a 400.
fn require_non_empty(value: &str, field: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::Validation(format!("'{field}' is required")));
    }
    Ok(())
}

/// Duplicate-username pre-check shared by user creation paths. The unique
/// index remains the backstop for concurrent inserts.
async fn ensure_username_free(state: &AppState, username: &str) -> Result<(), ApiError> {
    if state.repo.get_user_by_username(username).await?.is_some() {
        return Err(ApiError::Conflict("Username already taken".to_string()));
    }
    Ok(())
}

// --- Auth Handlers ---

/// login
///
/// [Public Route] Verifies a username/password pair and issues a signed
/// token embedding `{id, isAdmin}`. An unknown username and a wrong password
/// produce the same 401, so the response never confirms which part failed.
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Authenticated", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = MessageResponse)
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let user = state.repo.get_user_by_username(&payload.username).await?;

    let user = match user {
        Some(u) if auth::verify_password(&payload.password, &u.password_hash) => u,
        _ => return Err(ApiError::Unauthorized("Invalid Credentials".to_string())),
    };

    let token = auth::issue_token(user.id, user.is_admin, &state.config.jwt_secret)?;

    Ok(Json(LoginResponse {
        msg: "Success!".to_string(),
        token,
    }))
}

// --- User Handlers ---

/// list_users
///
/// [Admin Route] One page of all users. The role check lives here in the
/// handler, after authentication, matching the guard ordering everywhere else.
#[utoipa::path(
    get,
    path = "/user",
    params(PageQuery),
    responses(
        (status = 200, description = "Paginated users", body = Page<User>),
        (status = 403, description = "Caller is not an admin", body = MessageResponse)
    )
)]
pub async fn list_users(
    user: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Page<User>>, ApiError> {
    if !user.is_admin {
        return Err(ApiError::Forbidden("Access Denied".to_string()));
    }
    let (users, total) = state.repo.list_users(query.limit(), query.offset()).await?;
    Ok(Json(Page::new(users, total, &query)))
}

/// get_user
///
/// [Public Route] A user's public identity plus one page of their musics.
#[utoipa::path(
    get,
    path = "/user/{userId}",
    params(("userId" = i64, Path, description = "User ID"), PageQuery),
    responses(
        (status = 200, description = "User with musics", body = UserMusics),
        (status = 404, description = "Unknown user", body = MessageResponse)
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Query(query): Query<PageQuery>,
) -> Result<Json<UserMusics>, ApiError> {
    let user = state
        .repo
        .get_user(user_id)
        .await?
        .ok_or_else(ApiError::no_data)?;

    let (musics, total) = state
        .repo
        .list_musics_by_owner(user.id, query.limit(), query.offset())
        .await?;

    Ok(Json(UserMusics {
        username: user.username,
        musics: Page::new(musics, total, &query),
    }))
}

/// get_favorite_musics
///
/// [Authenticated Route] One page of the caller's favorite musics. The owner
/// is the verified token identity; there is no way to read someone else's
/// favorites through this endpoint.
#[utoipa::path(
    get,
    path = "/user/music/favorites",
    params(PageQuery),
    responses((status = 200, description = "Paginated favorites", body = Page<Music>))
)]
pub async fn get_favorite_musics(
    user: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Page<Music>>, ApiError> {
    let (musics, total) = state
        .repo
        .list_favorites_by_owner(user.id, query.limit(), query.offset())
        .await?;
    Ok(Json(Page::new(musics, total, &query)))
}

/// create_user
///
/// [Public Route] Registers a regular user. The password is hashed here,
/// before the repository is involved, so plaintext never crosses that
/// boundary.
#[utoipa::path(
    post,
    path = "/user",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "Created", body = User),
        (status = 400, description = "Missing field", body = MessageResponse),
        (status = 409, description = "Username taken", body = MessageResponse)
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    require_non_empty(&payload.username, "username")?;
    require_non_empty(&payload.password, "password")?;
    ensure_username_free(&state, &payload.username).await?;

    let hash = auth::hash_password(&payload.password, state.config.bcrypt_cost)?;
    let user = state.repo.create_user(&payload.username, &hash, false).await?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// create_admin
///
/// [Admin Route] Identical to `create_user` but the new account gets the
/// admin role. Restricted to admin callers; the store itself does not care.
#[utoipa::path(
    post,
    path = "/user/admin",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "Created", body = User),
        (status = 403, description = "Caller is not an admin", body = MessageResponse),
        (status = 409, description = "Username taken", body = MessageResponse)
    )
)]
pub async fn create_admin(
    user: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    if !user.is_admin {
        return Err(ApiError::Forbidden("Access Denied".to_string()));
    }
    require_non_empty(&payload.username, "username")?;
    require_non_empty(&payload.password, "password")?;
    ensure_username_free(&state, &payload.username).await?;

    let hash = auth::hash_password(&payload.password, state.config.bcrypt_cost)?;
    let admin = state.repo.create_user(&payload.username, &hash, true).await?;

    Ok((StatusCode::CREATED, Json(admin)))
}

/// update_user
///
/// [Authenticated Route] Partial update of a user. The target is fetched
/// first; only then are the ownership rules evaluated (owner or admin). A
/// provided password is re-hashed; omitted fields keep their stored value.
#[utoipa::path(
    put,
    path = "/user/{userId}",
    params(("userId" = i64, Path, description = "User ID")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Updated", body = User),
        (status = 403, description = "Not the owner nor an admin", body = MessageResponse),
        (status = 404, description = "Unknown user", body = MessageResponse)
    )
)]
pub async fn update_user(
    caller: AuthUser,
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<Json<User>, ApiError> {
    let target = state
        .repo
        .get_user(user_id)
        .await?
        .ok_or_else(ApiError::no_data)?;

    if caller.id != target.id && !caller.is_admin {
        return Err(ApiError::Forbidden(
            "You cannot change another user's information".to_string(),
        ));
    }

    if let Some(ref username) = payload.username {
        require_non_empty(username, "username")?;
        if *username != target.username {
            ensure_username_free(&state, username).await?;
        }
    }

    // Re-hash only when a new password was actually supplied.
    let password_hash = match payload.password {
        Some(ref password) => {
            require_non_empty(password, "password")?;
            Some(auth::hash_password(password, state.config.bcrypt_cost)?)
        }
        None => None,
    };

    let updated = state
        .repo
        .update_user(user_id, payload.username, password_hash)
        .await?
        .ok_or_else(ApiError::no_data)?;

    Ok(Json(updated))
}

/// delete_user
///
/// [Authenticated Route] Deletes a user and, through the schema cascade, all
/// of their musics. Admin accounts can never be deleted through this path,
/// regardless of who asks.
#[utoipa::path(
    delete,
    path = "/user/{userId}",
    params(("userId" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "Deleted", body = MessageResponse),
        (status = 403, description = "Not allowed", body = MessageResponse),
        (status = 404, description = "Unknown user", body = MessageResponse)
    )
)]
pub async fn delete_user(
    caller: AuthUser,
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    let target = state
        .repo
        .get_user(user_id)
        .await?
        .ok_or_else(ApiError::no_data)?;

    if caller.id != target.id && !caller.is_admin {
        return Err(ApiError::Forbidden(
            "You cannot delete another user's information".to_string(),
        ));
    }

    if target.is_admin {
        return Err(ApiError::Forbidden("You can't delete an admin".to_string()));
    }

    if !state.repo.delete_user(user_id).await? {
        return Err(ApiError::no_data());
    }

    Ok(Json(MessageResponse {
        msg: "Successfully deleted".to_string(),
    }))
}

// --- Music Handlers ---

/// list_musics
///
/// [Public Route] One page of musics across all owners.
#[utoipa::path(
    get,
    path = "/music",
    params(PageQuery),
    responses((status = 200, description = "Paginated musics", body = Page<Music>))
)]
pub async fn list_musics(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Page<Music>>, ApiError> {
    let (musics, total) = state.repo.list_musics(query.limit(), query.offset()).await?;
    Ok(Json(Page::new(musics, total, &query)))
}

/// list_musics_by_user
///
/// [Public Route] One page of a single owner's musics, selected with
/// `?id=`. A read filter, not an authorization input.
#[utoipa::path(
    get,
    path = "/music/user",
    params(OwnerFilter),
    responses((status = 200, description = "Paginated musics", body = Page<Music>))
)]
pub async fn list_musics_by_user(
    State(state): State<AppState>,
    Query(filter): Query<OwnerFilter>,
) -> Result<Json<Page<Music>>, ApiError> {
    let query = PageQuery {
        page: filter.page,
        limit: filter.limit,
    };
    let (musics, total) = state
        .repo
        .list_musics_by_owner(filter.id, query.limit(), query.offset())
        .await?;
    Ok(Json(Page::new(musics, total, &query)))
}

/// get_music
///
/// [Public Route] A single music by id.
#[utoipa::path(
    get,
    path = "/music/{musicId}",
    params(("musicId" = i64, Path, description = "Music ID")),
    responses(
        (status = 200, description = "Found", body = Music),
        (status = 404, description = "Unknown music", body = MessageResponse)
    )
)]
pub async fn get_music(
    State(state): State<AppState>,
    Path(music_id): Path<i64>,
) -> Result<Json<Music>, ApiError> {
    let music = state
        .repo
        .get_music(music_id)
        .await?
        .ok_or_else(ApiError::no_data)?;
    Ok(Json(music))
}

/// create_music
///
/// [Authenticated Route] Adds a music owned by the caller. The owner comes
/// from the verified token, never from the payload. `favorite` starts false.
#[utoipa::path(
    post,
    path = "/music",
    request_body = CreateMusicRequest,
    responses(
        (status = 201, description = "Created", body = Music),
        (status = 400, description = "Missing field", body = MessageResponse)
    )
)]
pub async fn create_music(
    user: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<CreateMusicRequest>,
) -> Result<(StatusCode, Json<Music>), ApiError> {
    require_non_empty(&payload.name, "name")?;
    require_non_empty(&payload.description, "description")?;
    require_non_empty(&payload.link, "link")?;

    let music = state
        .repo
        .create_music(user.id, &payload.name, &payload.description, &payload.link)
        .await?;

    Ok((StatusCode::CREATED, Json(music)))
}

/// update_music
///
/// [Authenticated Route] Replaces a music's fields. Ownership is enforced by
/// the repository's `id AND user_id` predicate: another owner's row answers
/// 404, never 403, so the response leaks nothing about foreign rows.
#[utoipa::path(
    put,
    path = "/music/{musicId}",
    params(("musicId" = i64, Path, description = "Music ID")),
    request_body = UpdateMusicRequest,
    responses(
        (status = 200, description = "Updated", body = Music),
        (status = 404, description = "Unknown music or not the owner", body = MessageResponse)
    )
)]
pub async fn update_music(
    user: AuthUser,
    State(state): State<AppState>,
    Path(music_id): Path<i64>,
    Json(payload): Json<UpdateMusicRequest>,
) -> Result<Json<Music>, ApiError> {
    require_non_empty(&payload.name, "name")?;
    require_non_empty(&payload.description, "description")?;
    require_non_empty(&payload.link, "link")?;

    let music = state
        .repo
        .update_music(music_id, user.id, payload)
        .await?
        .ok_or_else(ApiError::no_data)?;

    Ok(Json(music))
}

/// delete_music
///
/// [Authenticated Route] Removes one of the caller's musics. Same
/// double-predicate ownership rule as `update_music`.
#[utoipa::path(
    delete,
    path = "/music/{musicId}",
    params(("musicId" = i64, Path, description = "Music ID")),
    responses(
        (status = 200, description = "Deleted", body = MessageResponse),
        (status = 404, description = "Unknown music or not the owner", body = MessageResponse)
    )
)]
pub async fn delete_music(
    user: AuthUser,
    State(state): State<AppState>,
    Path(music_id): Path<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    if !state.repo.delete_music(music_id, user.id).await? {
        return Err(ApiError::no_data());
    }
    Ok(Json(MessageResponse {
        msg: "Music successfully deleted!".to_string(),
    }))
}
