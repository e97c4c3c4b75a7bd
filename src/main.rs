use songvault::{
    AppState,
    config::{AppConfig, Env},
    create_router,
    repository::{PostgresRepository, RepositoryState},
};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Entry point: initializes configuration, logging, the database pool and
/// migrations, then serves the router.
#[tokio::main]
async fn main() {
    // Configuration & environment loading (fail-fast on missing secrets).
    dotenv::dotenv().ok();
    let config = AppConfig::load();

    // Log filter: RUST_LOG wins, with sensible local defaults otherwise.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "songvault=debug,tower_http=info,axum=trace".into());

    // Pretty output for humans locally, JSON for log aggregation in prod.
    match config.env {
        Env::Local => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
        Env::Production => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
    }

    tracing::info!("Application starting in {:?} mode", config.env);

    // Database pool + schema migrations. The schema owns referential
    // integrity: deleting a user cascades to their musics.
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.db_url)
        .await
        .expect("FATAL: Failed to connect to Postgres. Check DATABASE_URL.");

    sqlx::migrate!()
        .run(&pool)
        .await
        .expect("FATAL: Failed to run database migrations.");

    let repo = Arc::new(PostgresRepository::new(pool)) as RepositoryState;

    let addr = format!("0.0.0.0:{}", config.port);
    let app_state = AppState { repo, config };
    let app = create_router(app_state);

    let listener = TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| panic!("FATAL: Failed to bind {addr}: {e}"));

    tracing::info!("Listening on {addr}");
    tracing::info!("API documentation available at /swagger-ui");

    axum::serve(listener, app).await.expect("server error");
}
