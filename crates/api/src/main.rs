// FestX API Server
// Session-authenticated REST API for the festival site

use dotenvy::dotenv;
use festx_api::{config::Config, routes, AppState};
use festx_database::{Database, EventRepository, SessionRepository};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,festx_api=debug,tower_http=debug".to_string()),
        )
        .init();

    tracing::info!("🚀 Starting FestX API Server");
    tracing::info!("📦 Version: {}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = Config::from_env();
    tracing::info!("🔌 Server: {}:{}", config.server_host, config.server_port);

    // Initialize database
    tracing::info!("🗄️  Connecting to database...");
    let database = Database::new(config.database.clone()).await?;
    database.ping().await?;
    tracing::info!("✅ Database connected");

    // Create auth service
    let auth_service = festx_auth::AuthService::new(&database, config.auth());
    tracing::info!("🔑 Auth service initialized");

    // Expired sessions are invalid the moment they expire; this sweep just
    // keeps the table from accumulating dead rows.
    let session_repo = SessionRepository::new(database.pool().clone());
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(3600));
        loop {
            interval.tick().await;
            match session_repo.delete_expired().await {
                Ok(0) => {}
                Ok(n) => tracing::info!("Purged {} expired sessions", n),
                Err(e) => tracing::error!("Session cleanup failed: {}", e),
            }
        }
    });

    // Create app state
    let state = Arc::new(AppState {
        auth_service,
        events: EventRepository::new(database.pool().clone()),
        cookie_secure: config.cookie_secure,
    });

    // Create router
    let app = routes::create_router(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http());

    tracing::info!("📡 Routes configured:");
    tracing::info!("   GET  /health");
    tracing::info!("   POST /api/auth/register");
    tracing::info!("   POST /api/auth/login");
    tracing::info!("   POST /api/auth/logout");
    tracing::info!("   GET  /api/auth/me");
    tracing::info!("   GET  /api/events");
    tracing::info!("   POST /api/events/:id/register");

    // Start server
    let addr = format!("{}:{}", config.server_host, config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("✅ Server ready at http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    database.close().await;
    tracing::info!("👋 Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install ctrl-c handler");
    tracing::info!("Shutdown signal received");
}
