//! Test server management.
//!
//! Spawns the ircserv binary on a free loopback port with a throwaway
//! config file.

use std::io::Write;
use std::process::{Child, Command, Stdio};
use std::time::Duration;
use tempfile::NamedTempFile;
use tokio::time::sleep;

use super::client::TestClient;

/// Connection password every test server is started with.
pub const PASSWORD: &str = "sesame";

/// A test server instance.
pub struct TestServer {
    child: Child,
    port: u16,
    // Held so the file outlives the process reading it.
    _config: NamedTempFile,
}

#[allow(dead_code)]
impl TestServer {
    /// Spawn a server with the default test configuration.
    pub async fn spawn() -> anyhow::Result<Self> {
        Self::spawn_with("").await
    }

    /// Spawn a server, appending `extra` TOML to the test configuration.
    pub async fn spawn_with(extra: &str) -> anyhow::Result<Self> {
        let port = free_port()?;

        let mut config = NamedTempFile::new()?;
        write!(
            config,
            r#"
[server]
name = "irc.test"
network = "TestNet"
bind = "127.0.0.1"

[motd]
lines = ["Test Server"]

[[oper]]
name = "testop"
password = "testpass"

[log]
level = "warn"
{extra}
"#
        )?;
        config.flush()?;

        let child = Command::new(env!("CARGO_BIN_EXE_ircserv"))
            .arg(port.to_string())
            .arg(PASSWORD)
            .arg(config.path())
            .stdout(Stdio::null())
            .spawn()?;

        let server = Self {
            child,
            port,
            _config: config,
        };
        server.wait_until_ready().await?;
        Ok(server)
    }

    /// Wait until the server is accepting connections.
    async fn wait_until_ready(&self) -> anyhow::Result<()> {
        for _ in 0..50 {
            if tokio::net::TcpStream::connect(("127.0.0.1", self.port))
                .await
                .is_ok()
            {
                return Ok(());
            }
            sleep(Duration::from_millis(100)).await;
        }
        anyhow::bail!("server failed to start within 5 seconds")
    }

    pub fn address(&self) -> String {
        format!("127.0.0.1:{}", self.port)
    }

    /// Connect a client without registering it.
    pub async fn connect(&self, nick: &str) -> anyhow::Result<TestClient> {
        TestClient::connect(&self.address(), nick).await
    }

    /// Connect and register a client.
    pub async fn login(&self, nick: &str) -> anyhow::Result<TestClient> {
        let mut client = self.connect(nick).await?;
        client.register(PASSWORD).await?;
        Ok(client)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

/// Ask the OS for an unused port. Ephemeral ports are never privileged.
fn free_port() -> anyhow::Result<u16> {
    let listener = std::net::TcpListener::bind("127.0.0.1:0")?;
    Ok(listener.local_addr()?.port())
}
