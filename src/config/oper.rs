//! Operator block configuration.

use serde::Deserialize;

/// Operator block configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct OperBlock {
    /// Operator name (used in OPER command).
    pub name: String,
    /// Plaintext password.
    pub password: String,
}

impl OperBlock {
    /// Check a supplied OPER name/password pair against this block.
    pub fn matches(&self, name: &str, password: &str) -> bool {
        self.name == name && self.password == password
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_requires_both() {
        let block = OperBlock {
            name: "root".into(),
            password: "toor".into(),
        };
        assert!(block.matches("root", "toor"));
        assert!(!block.matches("root", "nope"));
        assert!(!block.matches("admin", "toor"));
    }
}
