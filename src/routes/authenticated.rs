use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{delete, get, post, put},
};

/// Authenticated Router Module
///
/// Routes that require a valid bearer token. Each handler takes `AuthUser`
/// as an argument, so extraction rejects unauthenticated requests with 401
/// before the handler body runs. Several paths here share their route with a
/// public read (e.g. GET /user/{userId}), which is why the guard lives in
/// the handler signature rather than a router-wide layer.
///
/// Ownership rules are enforced downstream: user mutations fetch the target
/// and compare ids (admins bypass), music mutations rely on the repository's
/// `id AND user_id` double predicate.
pub fn authenticated_routes() -> Router<AppState> {
    Router::<AppState>::new()
        // GET /user/music/favorites
        // The caller's favorite musics, paginated. Listed before the public
        // /user/{userId} capture can ever see it (three segments vs two).
        .route("/user/music/favorites", get(handlers::get_favorite_musics))
        // PUT/DELETE /user/{userId}
        // Owner-or-admin mutations. Delete additionally refuses admin targets.
        .route(
            "/user/{userId}",
            put(handlers::update_user).delete(handlers::delete_user),
        )
        // POST /music
        // Creates a music owned by the caller.
        .route("/music", post(handlers::create_music))
        // PUT/DELETE /music/{musicId}
        // Owner-scoped via the double predicate; foreign rows answer 404.
        .route("/music/{musicId}", put(handlers::update_music))
        .route("/music/{musicId}", delete(handlers::delete_music))
}
