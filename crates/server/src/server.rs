//! Router assembly and the HTTP listener

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::routing::{delete, get, post, put};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::assets;
use crate::handlers::{bucket, object, session};
use crate::state::AppState;

/// Build the application router
///
/// Everything under `/api` is JSON/bytes API; any other path is handed to
/// the frontend host.
pub fn create_router(state: AppState) -> Router {
    let max_upload = state.config.server.max_upload_bytes;

    let api = Router::new()
        .route("/session/status", get(session::status))
        .route("/connect", post(session::connect))
        .route("/logout", post(session::logout))
        .route("/buckets", get(bucket::list_buckets))
        .route(
            "/buckets/{name}",
            put(bucket::create_bucket).delete(bucket::delete_bucket),
        )
        .route("/objects", get(object::list_objects))
        .route(
            "/objects/",
            get(object::missing_key)
                .post(object::missing_key)
                .delete(object::missing_key),
        )
        .route(
            "/objects/{*key}",
            get(object::view_object)
                .post(object::upload_object)
                .delete(object::delete_object),
        )
        .route("/presigned-url", get(object::presigned_url))
        // Older clients
        .route("/list", get(object::list_objects))
        .route("/view/", get(object::missing_key))
        .route("/view/{*key}", get(object::view_object))
        .route("/delete/", delete(object::missing_key))
        .route("/delete/{*key}", delete(object::delete_object))
        .fallback(|| async { (StatusCode::NOT_FOUND, "Not found") });

    Router::new()
        .nest("/api", api)
        .fallback(assets::serve_frontend)
        .layer(DefaultBodyLimit::max(max_upload))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind the configured address and serve until a shutdown signal arrives
///
/// The session sweeper runs alongside the listener and is stopped once
/// in-flight requests have drained.
pub async fn serve(state: AppState) -> anyhow::Result<()> {
    let addr = state.config.server.addr();
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "s3-browser listening");

    let sessions = state.sessions.clone();
    let cleanup = sessions.spawn_cleanup();

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    sessions.shutdown();
    if let Err(e) = cleanup.await {
        tracing::warn!(error = %e, "Session cleanup task ended abnormally");
    }

    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, starting graceful shutdown"),
        _ = terminate => tracing::info!("Received terminate signal, starting graceful shutdown"),
    }
}
