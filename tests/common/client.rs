//! Test chat client.
//!
//! Sends raw lines and reads parsed replies through the same line codec the
//! server frames with.

use futures_util::StreamExt;
use ircserv_proto::{LineCodec, Message};
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::time::timeout;
use tokio_util::codec::FramedRead;

/// A test client.
pub struct TestClient {
    reader: FramedRead<OwnedReadHalf, LineCodec>,
    writer: OwnedWriteHalf,
    nick: String,
}

#[allow(dead_code)]
impl TestClient {
    /// Connect to a test server.
    pub async fn connect(address: &str, nick: &str) -> anyhow::Result<Self> {
        let stream = TcpStream::connect(address).await?;
        let (read_half, writer) = stream.into_split();

        Ok(Self {
            reader: FramedRead::new(read_half, LineCodec::new()),
            writer,
            nick: nick.to_string(),
        })
    }

    pub fn nick(&self) -> &str {
        &self.nick
    }

    /// Send a raw line, adding CR-LF if missing.
    pub async fn send_raw(&mut self, line: &str) -> anyhow::Result<()> {
        self.writer.write_all(line.as_bytes()).await?;
        if !line.ends_with('\n') {
            self.writer.write_all(b"\r\n").await?;
        }
        Ok(())
    }

    /// Send raw bytes exactly as given.
    pub async fn send_bytes(&mut self, bytes: &[u8]) -> anyhow::Result<()> {
        self.writer.write_all(bytes).await?;
        Ok(())
    }

    /// Receive a single message from the server.
    pub async fn recv(&mut self) -> anyhow::Result<Message> {
        self.recv_timeout(Duration::from_secs(5)).await
    }

    /// Receive a message with a timeout.
    pub async fn recv_timeout(&mut self, dur: Duration) -> anyhow::Result<Message> {
        let line = match timeout(dur, self.reader.next()).await? {
            Some(line) => line?,
            None => anyhow::bail!("connection closed"),
        };
        Message::parse(&line).map_err(|e| anyhow::anyhow!("parse error: {e}: {line:?}"))
    }

    /// Receive messages until `predicate` matches; the match is included.
    pub async fn recv_until<F>(&mut self, mut predicate: F) -> anyhow::Result<Vec<Message>>
    where
        F: FnMut(&Message) -> bool,
    {
        let mut messages = Vec::new();
        loop {
            let msg = self.recv().await?;
            let done = predicate(&msg);
            messages.push(msg);
            if done {
                return Ok(messages);
            }
        }
    }

    /// Receive until a message with `command` arrives and return it.
    pub async fn expect(&mut self, command: &str) -> anyhow::Result<Message> {
        let mut messages = self.recv_until(|m| m.command == command).await?;
        messages
            .pop()
            .ok_or_else(|| anyhow::anyhow!("no {command} received"))
    }

    /// Whether the server closes the socket within `dur`.
    pub async fn closed_within(&mut self, dur: Duration) -> bool {
        let deadline = tokio::time::Instant::now() + dur;
        loop {
            match tokio::time::timeout_at(deadline, self.reader.next()).await {
                Ok(None) | Ok(Some(Err(_))) => return true,
                Ok(Some(Ok(_))) => continue,
                Err(_) => return false,
            }
        }
    }

    /// Send PASS/NICK/USER and wait for the end of the welcome burst.
    pub async fn register(&mut self, password: &str) -> anyhow::Result<Vec<Message>> {
        self.send_raw(&format!("PASS {password}")).await?;
        self.send_raw(&format!("NICK {}", self.nick)).await?;
        self.send_raw(&format!("USER {} 0 * :Test User {}", self.nick, self.nick))
            .await?;

        let messages = self
            .recv_until(|m| m.command == "376" || m.command == "422")
            .await?;
        if !messages.iter().any(|m| m.command == "001") {
            anyhow::bail!("registration failed: no RPL_WELCOME received");
        }
        Ok(messages)
    }

    /// Join a channel and wait for the end of its NAMES list.
    pub async fn join(&mut self, channel: &str) -> anyhow::Result<Vec<Message>> {
        self.send_raw(&format!("JOIN {channel}")).await?;
        self.recv_until(|m| m.command == "366").await
    }

    pub async fn privmsg(&mut self, target: &str, text: &str) -> anyhow::Result<()> {
        self.send_raw(&Message::privmsg(target, text).to_string())
            .await
    }

    pub async fn quit(&mut self, reason: &str) -> anyhow::Result<()> {
        self.send_raw(&Message::quit(reason).to_string()).await
    }
}
