//! HTTP server for the phone lookup endpoint.
//!
//! This module provides the axum router that exposes the lookup to host
//! administrators, plus the listener loop with graceful shutdown.

pub mod auth;
pub mod handlers;

use crate::metrics::Metrics;
use crate::services::LookupService;
use anyhow::Result;
use axum::middleware::from_fn_with_state;
use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// Path of the lookup endpoint, mounted under the host's OCS app namespace.
pub const LOOKUP_PATH: &str = "/ocs/v2.php/apps/phonefinder/api/v1/users/by-phone";

/// Shared state handed to every request.
#[derive(Clone)]
pub struct AppState {
    pub lookup: Arc<dyn LookupService>,
    pub metrics: Metrics,
    admin_token: Arc<str>,
}

impl AppState {
    pub fn new(lookup: Arc<dyn LookupService>, metrics: Metrics, admin_token: &str) -> Self {
        Self {
            lookup,
            metrics,
            admin_token: Arc::from(admin_token),
        }
    }

    pub(crate) fn admin_token(&self) -> &[u8] {
        self.admin_token.as_bytes()
    }
}

/// Build the application router.
///
/// Admin routes sit behind the bearer-token guard; `/health` does not.
pub fn router(state: AppState) -> Router {
    let admin = Router::new()
        .route(LOOKUP_PATH, get(handlers::by_phone))
        .route("/metrics", get(handlers::metrics))
        .route_layer(from_fn_with_state(state.clone(), auth::require_admin));

    Router::new()
        .route("/health", get(handlers::health))
        .merge(admin)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve the router on `bind_addr` until Ctrl+C or SIGTERM.
pub async fn run_server(bind_addr: &str, state: AppState) -> Result<()> {
    let listener = TcpListener::bind(bind_addr).await?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
