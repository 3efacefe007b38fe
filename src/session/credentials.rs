// Admin credential pair for the trial lock screen.
// Cosmetic access control: the pair ships with the client and is not a security boundary.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub secret: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            secret: secret.into(),
        }
    }

    /// Compare both fields fully before deciding
    pub fn matches(&self, username: &str, secret: &str) -> bool {
        let user_ok = same_bytes(self.username.as_bytes(), username.as_bytes());
        let secret_ok = same_bytes(self.secret.as_bytes(), secret.as_bytes());
        user_ok & secret_ok
    }
}

impl Default for Credentials {
    fn default() -> Self {
        Self::new("admin", "zenux")
    }
}

/// Byte comparison that walks the longer input regardless of where a mismatch occurs
fn same_bytes(expected: &[u8], given: &[u8]) -> bool {
    let len = expected.len().max(given.len());
    let mut diff = (expected.len() ^ given.len()) as u8 | u8::from(expected.len() != given.len());
    for i in 0..len {
        let a = expected.get(i).copied().unwrap_or(0);
        let b = given.get(i).copied().unwrap_or(0);
        diff |= a ^ b;
    }
    diff == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matching_pair() {
        let creds = Credentials::new("admin", "zenux");
        assert!(creds.matches("admin", "zenux"));
    }

    #[test]
    fn test_any_field_mismatch_rejects() {
        let creds = Credentials::new("admin", "zenux");
        assert!(!creds.matches("admin", "zenu"));
        assert!(!creds.matches("admin", "zenux\0"));
        assert!(!creds.matches("Admin", "zenux"));
        assert!(!creds.matches("", ""));
    }

    #[test]
    fn test_length_difference_of_256_still_rejects() {
        let creds = Credentials::new("a", "");
        let long = "a".repeat(257);
        assert!(!creds.matches(&long, ""));
    }
}
