use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::{routing::get, Router};
use tokio_util::sync::CancellationToken;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fray_engine_adapters::infrastructure::config::AppConfig;
use fray_engine_adapters::infrastructure::http;

use crate::composition::new_app_state;

/// Creates a cancellation token and spawns a task that cancels it on SIGTERM/SIGINT
fn setup_shutdown_signal(cancel_token: CancellationToken) {
    tokio::spawn(async move {
        let ctrl_c = async {
            tokio::signal::ctrl_c()
                .await
                .expect("failed to install Ctrl+C handler");
        };

        #[cfg(unix)]
        let terminate = async {
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
                .expect("failed to install signal handler")
                .recv()
                .await;
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            _ = ctrl_c => {
                tracing::info!("Received Ctrl+C, initiating graceful shutdown...");
            }
            _ = terminate => {
                tracing::info!("Received SIGTERM, initiating graceful shutdown...");
            }
        }

        cancel_token.cancel();
    });
}

pub async fn run() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fray_engine=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Fray Engine");

    // Create cancellation token for graceful shutdown
    let cancel_token = CancellationToken::new();
    setup_shutdown_signal(cancel_token.clone());

    // Load configuration
    let config = AppConfig::from_env()?;
    tracing::info!("Configuration loaded");
    if config.service_api_key.is_none() {
        tracing::warn!("SERVICE_API_KEY not set - privileged calls are disabled");
    }

    // Initialize application state
    let state = Arc::new(new_app_state(config));
    tracing::info!("Application state initialized");

    // Build CORS layer based on configuration
    let cors_layer = if state.config.cors_allowed_origins.len() == 1
        && state.config.cors_allowed_origins[0] == "*"
    {
        tracing::warn!("CORS configured to allow ANY origin - this is insecure for production!");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = state
            .config
            .cors_allowed_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        tracing::info!(
            "CORS configured for origins: {:?}",
            state.config.cors_allowed_origins
        );
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    // Build HTTP router
    let app = Router::new()
        .route("/", get(|| async { "Fray Engine API" }))
        .merge(http::create_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .with_state(state.clone());

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], state.config.server_port));
    tracing::info!("Listening on {}", addr);

    let server = axum::serve(tokio::net::TcpListener::bind(addr).await?, app)
        .with_graceful_shutdown(async move {
            cancel_token.cancelled().await;
            tracing::info!("HTTP server received shutdown signal");
        });

    if let Err(e) = server.await {
        tracing::error!("Server error: {}", e);
    }

    tracing::info!("Fray Engine shutdown complete");
    Ok(())
}
