//! The pseudonymous actor fingerprint token.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A 32-byte pseudonymous actor fingerprint.
///
/// Derived deterministically from an actor's context plus a server-side
/// pepper (see `campustalk-identity`). The token is opaque and one-way: it
/// identifies the same actor across requests without revealing who they are.
/// It is computed on demand and never stored as a standalone entity.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Truncated on purpose: a full fingerprint in logs would let an
        // operator correlate actors across entities.
        write!(f, "Fingerprint({}..)", hex::encode(&self.0[..4]))
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(&self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_never_prints_full_token() {
        let fp = Fingerprint::new([0xab; 32]);
        let dbg = format!("{:?}", fp);
        assert!(dbg.contains("abababab"));
        assert!(!dbg.contains(&"ab".repeat(32)));
    }

    #[test]
    fn display_is_full_hex() {
        let fp = Fingerprint::new([0x01; 32]);
        assert_eq!(fp.to_string(), "01".repeat(32));
    }
}
