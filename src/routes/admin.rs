use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{get, post},
};

/// Admin Router Module
///
/// Routes reserved for admin callers. Authentication happens through the
/// `AuthUser` extractor in each handler's signature; the `is_admin` role
/// check is performed inside the handler, after authentication, so an
/// unauthenticated request gets 401 and a non-admin one gets 403.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        // GET /user
        // Paginated listing of every registered user.
        .route("/user", get(handlers::list_users))
        // POST /user/admin
        // Creates an account with the admin role set.
        .route("/user/admin", post(handlers::create_admin))
}
