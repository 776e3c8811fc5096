//! Prometheus exporter.
//!
//! Serves `/metrics` from its own task; the chat core never waits on it.

use axum::{Router, routing::get};
use std::net::{IpAddr, SocketAddr};
use tokio_util::sync::CancellationToken;

async fn metrics_handler() -> String {
    crate::metrics::gather_metrics()
}

fn router() -> Router {
    Router::new().route("/metrics", get(metrics_handler))
}

/// Serve `/metrics` on `bind:port` until `shutdown` fires.
///
/// Bind failures are logged and the exporter gives up; the chat server keeps
/// running without it.
pub async fn run_http_server(bind: IpAddr, port: u16, shutdown: CancellationToken) {
    let addr = SocketAddr::new(bind, port);

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(%addr, error = %e, "Failed to bind metrics exporter");
            return;
        }
    };
    tracing::info!(%addr, "Prometheus exporter listening");

    let serve = axum::serve(listener, router())
        .with_graceful_shutdown(async move { shutdown.cancelled().await });
    if let Err(e) = serve.await {
        tracing::error!(error = %e, "Metrics exporter error");
    }
}
