//! ircserv - line-oriented multi-user chat server
//!
//! Speaks the IRC client protocol: password-gated registration, channels
//! with operator modes, private and channel messages.

mod config;
mod error;
mod handlers;
mod http;
mod metrics;
mod network;
mod state;

use crate::config::{Args, Config, LogFormat};
use crate::network::{Engine, Gateway, Reactor};
use crate::state::ServerInfo;
use std::net::SocketAddr;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Events in flight between the socket tasks and the reactor.
const EVENT_QUEUE: usize = 1024;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = match Args::from_env() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    let config = match &args.config_path {
        Some(path) => Config::load(path).map_err(|e| {
            eprintln!("failed to load {}: {e}", path.display());
            e
        })?,
        None => Config::default(),
    };

    init_tracing(&config);

    if let Err(errors) = config::validate(&config) {
        for e in &errors {
            error!(error = %e, "Invalid configuration");
        }
        anyhow::bail!("configuration has {} error(s)", errors.len());
    }

    info!(
        server = %config.server.name,
        network = %config.server.network,
        port = args.port,
        "Starting ircserv"
    );

    let shutdown = CancellationToken::new();
    spawn_signal_listener(shutdown.clone());

    if let Some(port) = config.server.metrics_port.filter(|p| *p != 0) {
        metrics::init();
        tokio::spawn(http::run_http_server(
            config.server.bind,
            port,
            shutdown.clone(),
        ));
    }

    let (events_tx, events_rx) = mpsc::channel(EVENT_QUEUE);
    let addr = SocketAddr::new(config.server.bind, args.port);
    let gateway = Gateway::bind(addr, events_tx, config.limits.writer_queue).await?;

    let server = ServerInfo::from_config(&config, args.password);
    let reactor = Reactor::new(Engine::new(server), events_rx);

    let gateway_task = tokio::spawn(gateway.run(shutdown.clone()));
    reactor.run(shutdown.clone()).await;
    shutdown.cancel();
    if let Err(e) = gateway_task.await {
        error!(error = %e, "Gateway task failed");
    }

    info!("ircserv stopped");
    Ok(())
}

/// `RUST_LOG` wins over `[log] level`.
fn init_tracing(config: &Config) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);
    match config.log.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}

/// Cancel `shutdown` on SIGINT, or SIGTERM on unix.
fn spawn_signal_listener(shutdown: CancellationToken) {
    tokio::spawn(async move {
        #[cfg(unix)]
        {
            use tokio::signal::unix::{SignalKind, signal};
            match signal(SignalKind::terminate()) {
                Ok(mut term) => {
                    tokio::select! {
                        _ = tokio::signal::ctrl_c() => {}
                        _ = term.recv() => {}
                    }
                }
                Err(e) => {
                    error!(error = %e, "Failed to install SIGTERM handler");
                    let _ = tokio::signal::ctrl_c().await;
                }
            }
        }
        #[cfg(not(unix))]
        {
            let _ = tokio::signal::ctrl_c().await;
        }
        info!("Shutdown requested");
        shutdown.cancel();
    });
}
