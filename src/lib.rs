use axum::{Router, extract::FromRef, http::HeaderName};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

// --- Module Structure ---

// Core application services and components.
pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod pagination;
pub mod repository;

// Routing segregation (Public, Authenticated, Admin).
pub mod routes;
use routes::{admin, authenticated, public};

// --- Public Re-exports ---

// Makes core state types easily accessible to the entry point and tests.
pub use config::AppConfig;
pub use error::ApiError;
pub use repository::{PostgresRepository, RepositoryState};

/// ApiDoc
///
/// Generates the OpenAPI document for the application from the `#[utoipa::path]`
/// and `ToSchema` annotations. Served as JSON at `/api-docs/openapi.json` and
/// browsable at `/swagger-ui`.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::login,
        handlers::list_users, handlers::get_user, handlers::get_favorite_musics,
        handlers::create_user, handlers::create_admin, handlers::update_user,
        handlers::delete_user,
        handlers::list_musics, handlers::list_musics_by_user, handlers::get_music,
        handlers::create_music, handlers::update_music, handlers::delete_music
    ),
    components(
        schemas(
            models::User, models::Music, models::LoginRequest, models::LoginResponse,
            models::CreateUserRequest, models::UpdateUserRequest,
            models::CreateMusicRequest, models::UpdateMusicRequest,
            models::MessageResponse, models::UserMusics,
            pagination::Page<models::User>, pagination::Page<models::Music>,
        )
    ),
    tags(
        (name = "songvault", description = "Users & musics CRUD API with JWT auth")
    )
)]
struct ApiDoc;

/// AppState
///
/// The single, immutable container holding the application's shared services:
/// the repository handle and the loaded configuration. Cloned per request,
/// cheap by construction (Arc + small config).
#[derive(Clone)]
pub struct AppState {
    /// Repository layer: abstracts database access behind the trait object.
    pub repo: RepositoryState,
    /// The loaded, immutable environment configuration (signing secret,
    /// hashing cost).
    pub config: AppConfig,
}

// These implementations let extractors pull individual components out of the
// shared state; the AuthUser extractor only needs AppConfig, for instance.

impl FromRef<AppState> for RepositoryState {
    fn from_ref(app_state: &AppState) -> RepositoryState {
        app_state.repo.clone()
    }
}

impl FromRef<AppState> for AppConfig {
    fn from_ref(app_state: &AppState) -> AppConfig {
        app_state.config.clone()
    }
}

/// create_router
///
/// Assembles the full routing structure, applies the observability and CORS
/// layers, and registers the application state.
///
/// The three access tiers are merged rather than nested because their paths
/// interleave (e.g. POST /user is public while GET /user is admin-only);
/// axum combines method routers sharing a path across the merge.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    // Header name used for request correlation across logs and responses.
    let x_request_id = HeaderName::from_static("x-request-id");

    let base_router = Router::new()
        // Documentation: the generated OpenAPI document plus the UI for it.
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(public::public_routes())
        .merge(authenticated::authenticated_routes())
        .merge(admin::admin_routes())
        .with_state(state);

    // Observability stack: request-id generation, per-request tracing span,
    // and propagation of the id back to the client.
    base_router
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(trace_span_logger)
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .latency_unit(tower_http::LatencyUnit::Millis),
                        ),
                )
                .layer(PropagateRequestIdLayer::new(x_request_id)),
        )
        .layer(cors)
}

/// Customizes the tracing span for each request so every log line carries the
/// method, URI, and correlation id.
fn trace_span_logger(request: &axum::http::Request<axum::body::Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = ?request.method(),
        uri = ?request.uri(),
        req_id = %request_id,
    )
}
