//! The server-side fingerprint pepper.

use serde::Deserialize;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// The secret mixed into every fingerprint derivation.
///
/// Lifecycle: loaded once at startup from configuration and passed
/// explicitly to the deriver — never read from ambient global state, never
/// embedded in any response. Rotating the pepper changes every actor's
/// fingerprint, which resets all ownership and has-voted recognition; rotate
/// only via redeploy, with that consequence in mind.
#[derive(Clone, Deserialize, Zeroize, ZeroizeOnDrop)]
#[serde(transparent)]
pub struct Pepper(String);

impl Pepper {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

// Manual Debug so the secret can never leak through log formatting.
impl std::fmt::Debug for Pepper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Pepper(..)")
    }
}
