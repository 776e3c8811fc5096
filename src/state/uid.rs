//! Connection identifiers.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Opaque handle for one accepted socket.
///
/// Ids are never reused within a process, so an event carrying a stale id
/// can be recognised after its connection has been torn down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnId(u64);

#[cfg(test)]
impl ConnId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ConnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.0)
    }
}

/// Hands out [`ConnId`]s to the accept loop.
#[derive(Debug)]
pub struct ConnIdGenerator {
    counter: AtomicU64,
}

/// Zero is left unused so a default-initialised id is never mistaken for a
/// live one in logs.
const CONN_ID_START: u64 = 1;

impl ConnIdGenerator {
    pub fn new() -> Self {
        Self {
            counter: AtomicU64::new(CONN_ID_START),
        }
    }

    /// Generate the next unique id.
    pub fn next(&self) -> ConnId {
        ConnId(self.counter.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for ConnIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_sequential() {
        let generator = ConnIdGenerator::new();
        assert_eq!(generator.next(), ConnId::new(1));
        assert_eq!(generator.next(), ConnId::new(2));
        assert_eq!(generator.next().get(), 3);
    }

    #[test]
    fn test_display() {
        assert_eq!(ConnId::new(42).to_string(), "c42");
    }
}
