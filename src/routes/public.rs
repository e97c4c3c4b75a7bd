use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{get, post},
};

/// Public Router Module
///
/// Endpoints reachable without a token: login, registration, health, and the
/// read-only listings. Nothing here exposes password hashes (the `User`
/// serializer skips them) and nothing here mutates owned data.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        // GET /health
        // Liveness check for monitoring and load balancers.
        .route("/health", get(|| async { "ok" }))
        // POST /login
        // Credential verification and token issuance.
        .route("/login", post(handlers::login))
        // POST /user
        // Open registration; always creates a non-admin account.
        .route("/user", post(handlers::create_user))
        // GET /user/{userId}
        // A user's public identity plus one page of their musics.
        .route("/user/{userId}", get(handlers::get_user))
        // GET /music
        // Paginated listing across all owners.
        .route("/music", get(handlers::list_musics))
        // GET /music/user?id=
        // Paginated listing filtered to one owner. The static segment takes
        // priority over the {musicId} capture below.
        .route("/music/user", get(handlers::list_musics_by_user))
        // GET /music/{musicId}
        .route("/music/{musicId}", get(handlers::get_music))
}
