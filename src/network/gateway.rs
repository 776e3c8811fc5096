//! Gateway - TCP listener that accepts incoming connections.
//!
//! Each accepted socket gets an id and a [`Link`]; the reactor hears about
//! it through [`NetEvent::Accepted`] before any of its data.

use super::{Link, NetEvent};
use crate::state::ConnIdGenerator;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument};

/// Back-off after a failed accept (e.g. out of file descriptors).
const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

/// The Gateway accepts incoming TCP connections and hands them to the reactor.
pub struct Gateway {
    listener: TcpListener,
    ids: ConnIdGenerator,
    events: mpsc::Sender<NetEvent>,
    writer_queue: usize,
}

impl Gateway {
    /// Bind the gateway to the specified address.
    pub async fn bind(
        addr: SocketAddr,
        events: mpsc::Sender<NetEvent>,
        writer_queue: usize,
    ) -> anyhow::Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        info!(%addr, "Listener bound");
        Ok(Self {
            listener,
            ids: ConnIdGenerator::new(),
            events,
            writer_queue,
        })
    }

    /// Accept connections until `shutdown` fires or the reactor is gone.
    #[instrument(skip_all, name = "gateway")]
    pub async fn run(self, shutdown: CancellationToken) {
        loop {
            let accepted = tokio::select! {
                _ = shutdown.cancelled() => break,
                accepted = self.listener.accept() => accepted,
            };

            let (stream, addr) = match accepted {
                Ok(pair) => pair,
                Err(e) => {
                    error!(error = %e, "Failed to accept connection");
                    tokio::time::sleep(ACCEPT_BACKOFF).await;
                    continue;
                }
            };

            if let Err(e) = stream.set_nodelay(true) {
                debug!(%addr, error = %e, "Could not set TCP_NODELAY");
            }

            let id = self.ids.next();
            crate::metrics::record_accept();
            let (link, reader) = Link::open(id, stream, self.events.clone(), self.writer_queue);

            if self
                .events
                .send(NetEvent::Accepted { id, addr, link })
                .await
                .is_err()
            {
                break;
            }
            reader.spawn();
            info!(conn = %id, %addr, "Connection accepted");
        }
        info!("Gateway stopped");
    }
}
