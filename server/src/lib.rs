//! HTTP surface for the todo service.
//!
//! # Design
//! Handlers are thin: decode, call `TodoService`, encode. `ApiError` is the
//! single place where failures become status codes. `run` takes an already
//! bound listener and a shutdown future so tests can serve on a random port
//! and stop whenever they like.

use std::future::Future;

use axum::Router;
use tokio::net::TcpListener;
use todo_core::TodoService;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

pub mod config;
pub mod error;
pub mod routes;

pub use config::{Config, StoreKind};
pub use error::ApiError;
pub use routes::Deleted;

pub fn app(service: TodoService) -> Router {
    routes::router()
        .with_state(service)
        .layer(TraceLayer::new_for_http())
}

/// Serve until `shutdown` resolves; in-flight requests are allowed to finish.
pub async fn run<F>(listener: TcpListener, service: TodoService, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app(service))
        .with_graceful_shutdown(shutdown)
        .await
}

/// Resolves on Ctrl+C, or SIGTERM on unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    tokio::select! {
        _ = ctrl_c => info!("received Ctrl+C"),
        _ = wait_for_sigterm() => info!("received SIGTERM"),
    }
}

#[cfg(unix)]
async fn wait_for_sigterm() {
    use tokio::signal::unix::{signal, SignalKind};

    match signal(SignalKind::terminate()) {
        Ok(mut sigterm) => {
            sigterm.recv().await;
        }
        Err(e) => {
            warn!("failed to install SIGTERM handler: {e}");
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(not(unix))]
async fn wait_for_sigterm() {
    std::future::pending::<()>().await
}
