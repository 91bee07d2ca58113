//! Actor context — what a request reveals about who is making it.

use campustalk_types::AccountId;

/// The identity material available for a single request.
///
/// Authenticated requests carry the account id issued by the external
/// identity provider. Unauthenticated requests fall back to the network
/// origin and browser signature. The fallback is intentionally coarse: it
/// distinguishes (origin, browser) pairs, not humans, and collides behind
/// shared NAT or proxies. That is the accepted price of letting guests
/// report and create content.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActorContext {
    /// A verified account reference from the identity provider.
    Account(AccountId),
    /// Guest fallback: client address plus user-agent string.
    Anonymous { addr: String, user_agent: String },
}

impl ActorContext {
    /// The string fed into the fingerprint digest.
    ///
    /// The account path and the anonymous path are length-prefixed by their
    /// tag so `Account("a")` can never collide with an anonymous context
    /// that happens to concatenate to the same bytes.
    pub(crate) fn digest_input(&self) -> Vec<u8> {
        match self {
            Self::Account(id) => {
                let mut out = Vec::with_capacity(id.as_str().len() + 8);
                out.extend_from_slice(b"account:");
                out.extend_from_slice(id.as_str().as_bytes());
                out
            }
            Self::Anonymous { addr, user_agent } => {
                let mut out = Vec::with_capacity(addr.len() + user_agent.len() + 16);
                out.extend_from_slice(b"anon:");
                out.extend_from_slice(&(addr.len() as u64).to_be_bytes());
                out.extend_from_slice(addr.as_bytes());
                out.extend_from_slice(user_agent.as_bytes());
                out
            }
        }
    }

    /// The account id, if this context is authenticated.
    pub fn account(&self) -> Option<&AccountId> {
        match self {
            Self::Account(id) => Some(id),
            Self::Anonymous { .. } => None,
        }
    }
}
