//! The reactor: the single task that owns chat state.
//!
//! It waits on three things: socket events, a housekeeping tick and the
//! shutdown token. After each wakeup it flushes queued output to the
//! writers and reaps connections that were marked closing.

use super::{Engine, Link, NetEvent};
use crate::state::ConnId;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument};

/// How often timeouts are checked.
const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// How long shutdown waits for writers to flush the final lines.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

pub struct Reactor {
    engine: Engine,
    links: HashMap<ConnId, Link>,
    events: mpsc::Receiver<NetEvent>,
    /// Writers of connections released during shutdown.
    retiring: Vec<JoinHandle<()>>,
    stopping: bool,
}

impl Reactor {
    pub fn new(engine: Engine, events: mpsc::Receiver<NetEvent>) -> Self {
        Self {
            engine,
            links: HashMap::new(),
            events,
            retiring: Vec::new(),
            stopping: false,
        }
    }

    /// Process events until `shutdown` fires or every event sender is gone,
    /// then close all connections and give their writers a moment to
    /// finish.
    #[instrument(skip_all, name = "reactor")]
    pub async fn run(mut self, shutdown: CancellationToken) {
        let mut ticker = tokio::time::interval(TICK_INTERVAL);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                biased;
                _ = shutdown.cancelled() => break,
                event = self.events.recv() => match event {
                    Some(event) => self.handle_event(event),
                    None => break,
                },
                _ = ticker.tick() => self.engine.tick(Instant::now()),
            }
            self.flush();
        }

        info!(
            connections = self.engine.directory().connection_count(),
            "Shutting down"
        );
        self.stopping = true;
        self.engine.shutdown();
        self.flush();

        let writers = std::mem::take(&mut self.retiring);
        let drained = tokio::time::timeout(SHUTDOWN_GRACE, async {
            for writer in writers {
                let _ = writer.await;
            }
        })
        .await;
        if drained.is_err() {
            debug!("Writers still busy at shutdown; abandoning them");
        }
    }

    fn handle_event(&mut self, event: NetEvent) {
        match event {
            NetEvent::Accepted { id, addr, link } => {
                self.links.insert(id, link);
                self.engine.accept(id, addr, Instant::now());
            }
            NetEvent::Data { id, bytes } => {
                self.engine.receive(id, &bytes, Instant::now());
            }
            NetEvent::Closed { id } => {
                self.engine.hangup(id, "Connection closed");
                self.release(id);
            }
            NetEvent::Writable { id } => self.engine.writable(id),
        }
    }

    /// Move queued output into the writers, then tear down whatever got
    /// marked closing. Teardown queues QUITs for peers, so repeat until
    /// neither step has anything left to do.
    fn flush(&mut self) {
        loop {
            let output = self.engine.drain_output();
            let wrote = !output.is_empty();

            for (id, bytes) in output {
                let Some(link) = self.links.get(&id) else {
                    continue;
                };
                match link.try_send(bytes) {
                    Ok(()) => {}
                    Err(TrySendError::Full(bytes)) if self.engine.is_closing(id) => {
                        link.send_detached(bytes);
                    }
                    Err(TrySendError::Full(bytes)) => {
                        // Arm before the retry: a writer that emptied the
                        // queue in between must still report back.
                        link.want_write();
                        match link.try_send(bytes) {
                            Ok(()) => {}
                            Err(TrySendError::Full(bytes)) => self.engine.requeue(id, bytes),
                            Err(TrySendError::Closed(_)) => {
                                self.engine.hangup(id, "Write error");
                                self.release(id);
                            }
                        }
                    }
                    Err(TrySendError::Closed(_)) => {
                        self.engine.hangup(id, "Write error");
                        self.release(id);
                    }
                }
            }

            let reaped = self.engine.reap();
            for &id in &reaped {
                self.release(id);
            }

            if !wrote && reaped.is_empty() {
                break;
            }
        }
    }

    /// Drop the socket tasks of a connection that no longer exists.
    fn release(&mut self, id: ConnId) {
        if let Some(link) = self.links.remove(&id) {
            let writer = link.into_writer();
            if self.stopping {
                self.retiring.push(writer);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::link::PendingReader;
    use super::*;
    use crate::config::Config;
    use crate::state::ServerInfo;
    use std::net::SocketAddr;
    use tokio::io::AsyncReadExt;
    use tokio::net::{TcpListener, TcpStream};

    const LINES: usize = 1500;

    fn reactor() -> (Reactor, mpsc::Sender<NetEvent>) {
        let mut config = Config::default();
        config.server.name = "irc.test".into();
        let engine = Engine::new(ServerInfo::from_config(&config, "good"));
        let (tx, rx) = mpsc::channel(64);
        (Reactor::new(engine, rx), tx)
    }

    async fn socket_pair() -> (TcpStream, TcpStream) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (client, accepted) = tokio::join!(TcpStream::connect(addr), listener.accept());
        (client.unwrap(), accepted.unwrap().0)
    }

    fn receive(reactor: &mut Reactor, id: ConnId, line: &str) {
        reactor
            .engine
            .receive(id, format!("{line}\r\n").as_bytes(), Instant::now());
    }

    fn register(reactor: &mut Reactor, id: ConnId, nick: &str) {
        receive(reactor, id, "PASS good");
        receive(reactor, id, &format!("NICK {nick}"));
        receive(reactor, id, &format!("USER {nick} 0 * :{nick}"));
    }

    /// Open a writer-only link with room for a single chunk and register it.
    async fn linked(
        reactor: &mut Reactor,
        events: &mpsc::Sender<NetEvent>,
        n: u64,
        nick: &str,
    ) -> (ConnId, TcpStream, PendingReader) {
        let id = ConnId::new(n);
        let (client, server_side) = socket_pair().await;
        let addr: SocketAddr = format!("127.0.0.1:{}", 41000 + n).parse().unwrap();
        let (link, reader) = Link::open(id, server_side, events.clone(), 1);
        reactor.handle_event(NetEvent::Accepted { id, addr, link });
        register(reactor, id, nick);
        (id, client, reader)
    }

    fn privmsg_numbers(text: &str) -> Vec<usize> {
        text.lines()
            .filter(|l| l.contains(" PRIVMSG bob :"))
            .filter_map(|l| l.rsplit(':').next()?.split(' ').next()?.parse().ok())
            .collect()
    }

    #[tokio::test]
    async fn test_full_writer_resumes_in_order() {
        let (mut reactor, events_tx) = reactor();

        let (bob, mut client, _reader) = linked(&mut reactor, &events_tx, 2, "bob").await;
        let alice = ConnId::new(1);
        reactor
            .engine
            .accept(alice, "127.0.0.1:41001".parse().unwrap(), Instant::now());
        register(&mut reactor, alice, "alice");
        // The welcome burst takes the only slot; the writer has not run yet.
        reactor.flush();

        let pad = "x".repeat(200);
        for i in 0..LINES {
            receive(&mut reactor, alice, &format!("PRIVMSG bob :{i} {pad}"));
            reactor.flush();
        }
        let parked = reactor.engine.directory().connection(bob).unwrap();
        assert!(!parked.sendq.is_empty());
        assert!(!parked.is_closing());

        let collector = tokio::spawn(async move {
            let mut text = String::new();
            let mut buf = vec![0u8; 64 * 1024];
            let last = format!("PRIVMSG bob :{} ", LINES - 1);
            while !text.contains(&last) {
                let n = client.read(&mut buf).await.unwrap();
                assert!(n > 0, "link closed early");
                text.push_str(&String::from_utf8_lossy(&buf[..n]));
            }
            text
        });

        let mut writable = 0;
        let pumped = tokio::time::timeout(Duration::from_secs(10), async {
            while !collector.is_finished() {
                let wait = tokio::time::timeout(Duration::from_millis(50), reactor.events.recv());
                if let Ok(Some(event)) = wait.await {
                    if matches!(event, NetEvent::Writable { id } if id == bob) {
                        writable += 1;
                    }
                    reactor.handle_event(event);
                    reactor.flush();
                }
            }
        })
        .await;
        assert!(pumped.is_ok(), "backlog never drained");
        assert!(writable >= 1);

        let text = collector.await.unwrap();
        assert!(text.starts_with(":irc.test NOTICE * :*** "));
        assert!(text.find(" 001 bob ").unwrap() < text.find(" PRIVMSG bob :0 ").unwrap());
        assert_eq!(privmsg_numbers(&text), (0..LINES).collect::<Vec<_>>());
        assert!(reactor.engine.directory().connection(bob).unwrap().sendq.is_empty());
    }

    #[tokio::test]
    async fn test_closing_link_still_gets_error_line() {
        let (mut reactor, events_tx) = reactor();
        let (bob, mut client, _reader) = linked(&mut reactor, &events_tx, 2, "bob").await;
        reactor.flush();

        receive(&mut reactor, bob, "QUIT :bye");
        reactor.flush();
        assert!(!reactor.links.contains_key(&bob));
        assert!(reactor.engine.directory().connection(bob).is_none());

        let mut text = String::new();
        let read = tokio::time::timeout(Duration::from_secs(5), client.read_to_string(&mut text));
        read.await.unwrap().unwrap();
        assert!(text.contains(" 001 bob "));
        assert!(text.ends_with("ERROR :Closing Link: 127.0.0.1 (Quit: bye)\r\n"));
    }
}
