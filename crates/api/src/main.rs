use std::net::SocketAddr;
use std::sync::Arc;

use movieflix_core::storage::{FileStore, LocalFileStore};
use movieflix_db::repositories::{InMemoryMovieRepository, MovieRepository, PgMovieRepository};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use movieflix_api::config::ServerConfig;
use movieflix_api::router::build_app_router;
use movieflix_api::services::MovieService;
use movieflix_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "movieflix_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = %config.port,
        poster_dir = %config.poster_dir,
        base_url = %config.base_url,
        "Loaded server configuration"
    );

    // --- Movie store ---
    let repo = build_repository(&config).await;

    // --- Poster files ---
    let files: Arc<dyn FileStore> = Arc::new(LocalFileStore::new(&config.poster_dir));

    // --- App state ---
    let movies = Arc::new(MovieService::new(
        repo,
        Arc::clone(&files),
        config.base_url.clone(),
    ));
    let state = AppState {
        movies,
        files,
    };

    // --- Router ---
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Connect to PostgreSQL when `DATABASE_URL` is set, otherwise fall back to
/// the in-memory store.
async fn build_repository(config: &ServerConfig) -> Arc<dyn MovieRepository> {
    let Some(database_url) = config.database_url.as_deref() else {
        tracing::warn!("DATABASE_URL not set, using in-memory movie store (data is not persisted)");
        return Arc::new(InMemoryMovieRepository::new());
    };

    let pool = movieflix_db::create_pool(database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    movieflix_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    movieflix_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    Arc::new(PgMovieRepository::new(pool))
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
