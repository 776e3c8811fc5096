//! Prometheus metrics for ircserv.
//!
//! Recording is a no-op until [`init`] has run, so the core can call the
//! helpers unconditionally (tests never initialise the registry).
//!
//! - `irc_commands_total{command}` - commands dispatched by name
//! - `irc_command_errors_total{command,error}` - policy errors returned
//! - `irc_messages_sent_total` - lines queued to clients
//! - `irc_connections_total` - sockets accepted
//! - `irc_connected_clients` / `irc_channels` - live gauges
//! - `irc_message_fanout` - recipients per channel broadcast

use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounter, IntCounterVec, IntGauge, Opts, Registry,
    TextEncoder,
};
use std::sync::OnceLock;

/// Global Prometheus registry for all metrics.
pub static REGISTRY: OnceLock<Registry> = OnceLock::new();

pub fn registry() -> &'static Registry {
    REGISTRY.get_or_init(Registry::new)
}

// ========================================================================
// Counters (monotonic increasing)
// ========================================================================

/// Total lines queued to clients.
pub static MESSAGES_SENT: OnceLock<IntCounter> = OnceLock::new();

/// Total sockets accepted.
pub static CONNECTIONS_ACCEPTED: OnceLock<IntCounter> = OnceLock::new();

/// Commands processed by name.
pub static COMMAND_COUNTER: OnceLock<IntCounterVec> = OnceLock::new();

/// Command errors by name and error kind.
pub static COMMAND_ERRORS: OnceLock<IntCounterVec> = OnceLock::new();

// ========================================================================
// Gauges (can increase/decrease)
// ========================================================================

/// Currently connected clients, registered or not.
pub static CONNECTED_CLIENTS: OnceLock<IntGauge> = OnceLock::new();

/// Channels currently in the directory.
pub static ACTIVE_CHANNELS: OnceLock<IntGauge> = OnceLock::new();

/// Recipients per channel broadcast.
pub static MESSAGE_FANOUT: OnceLock<Histogram> = OnceLock::new();

/// Initialize the Prometheus metrics registry.
///
/// Call once at startup, before the exporter starts serving.
pub fn init() {
    let r = registry();

    macro_rules! register {
        ($metric:ident, $init:expr) => {
            match $init {
                Ok(m) => {
                    if let Err(e) = r.register(Box::new(m.clone())) {
                        tracing::warn!(metric = stringify!($metric), error = %e, "Failed to register metric");
                    }
                    let _ = $metric.set(m);
                }
                Err(e) => {
                    tracing::warn!(metric = stringify!($metric), error = %e, "Failed to create metric");
                }
            }
        };
    }

    register!(MESSAGES_SENT, IntCounter::new("irc_messages_sent_total", "Lines queued to clients"));
    register!(CONNECTIONS_ACCEPTED, IntCounter::new("irc_connections_total", "Sockets accepted"));
    register!(COMMAND_COUNTER, IntCounterVec::new(Opts::new("irc_commands_total", "IRC commands processed by type"), &["command"]));
    register!(COMMAND_ERRORS, IntCounterVec::new(Opts::new("irc_command_errors_total", "IRC command errors by type"), &["command", "error"]));
    register!(CONNECTED_CLIENTS, IntGauge::new("irc_connected_clients", "Currently connected clients"));
    register!(ACTIVE_CHANNELS, IntGauge::new("irc_channels", "Active channels"));
    register!(MESSAGE_FANOUT, Histogram::with_opts(
        HistogramOpts::new("irc_message_fanout", "Recipients per channel message")
            .buckets(vec![1.0, 5.0, 10.0, 25.0, 50.0, 100.0, 250.0, 500.0, 1000.0])));
}

/// Gather all metrics and encode them in Prometheus text format.
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = registry().gather();
    let mut buffer = vec![];
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!(error = %e, "Failed to encode Prometheus metrics");
        return String::new();
    }
    match String::from_utf8(buffer) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "Prometheus metrics were not valid UTF-8");
            String::new()
        }
    }
}

// ============================================================================
// Helper functions for metric updates
// ============================================================================

/// Record a dispatched command.
#[inline]
pub fn record_command(command: &str) {
    if let Some(c) = COMMAND_COUNTER.get() {
        c.with_label_values(&[command]).inc();
    }
}

/// Record a command error.
#[inline]
pub fn record_command_error(command: &str, error: &str) {
    if let Some(c) = COMMAND_ERRORS.get() {
        c.with_label_values(&[command, error]).inc();
    }
}

/// Record one queued line.
#[inline]
pub fn record_sent() {
    if let Some(c) = MESSAGES_SENT.get() {
        c.inc();
    }
}

/// Record an accepted socket.
#[inline]
pub fn record_accept() {
    if let Some(c) = CONNECTIONS_ACCEPTED.get() {
        c.inc();
    }
}

/// Set the live connection gauge.
#[inline]
pub fn set_connected(count: usize) {
    if let Some(g) = CONNECTED_CLIENTS.get() {
        g.set(count as i64);
    }
}

/// Set the live channel gauge.
#[inline]
pub fn set_channels(count: usize) {
    if let Some(g) = ACTIVE_CHANNELS.get() {
        g.set(count as i64);
    }
}

/// Record message fan-out (how many recipients received a channel message).
#[inline]
pub fn record_fanout(recipients: usize) {
    if let Some(h) = MESSAGE_FANOUT.get() {
        h.observe(recipients as f64);
    }
}
