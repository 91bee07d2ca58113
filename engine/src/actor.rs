//! The caller of an engine operation, as resolved by the transport layer.

use campustalk_identity::ActorContext;
use campustalk_types::AccountId;

/// Everything the engine knows about the actor behind one request.
///
/// The external identity provider resolves `account` (and the moderator
/// role); the transport layer supplies the network fallback fields. The
/// engine itself never inspects credentials.
#[derive(Clone, Debug)]
pub struct Actor {
    /// Verified account reference, when the request was authenticated.
    pub account: Option<AccountId>,
    /// Whether the identity provider granted the moderator role.
    pub moderator: bool,
    /// Client address as seen by the transport (or proxy header).
    pub addr: String,
    /// Raw user-agent string.
    pub user_agent: String,
}

impl Actor {
    /// A guest actor with only network context.
    pub fn guest(addr: impl Into<String>, user_agent: impl Into<String>) -> Self {
        Self {
            account: None,
            moderator: false,
            addr: addr.into(),
            user_agent: user_agent.into(),
        }
    }

    /// An authenticated member.
    pub fn member(account: AccountId, addr: impl Into<String>, user_agent: impl Into<String>) -> Self {
        Self {
            account: Some(account),
            moderator: false,
            addr: addr.into(),
            user_agent: user_agent.into(),
        }
    }

    /// The identity material used for fingerprint derivation. The account
    /// takes precedence; guests fall back to (addr, user-agent).
    pub fn context(&self) -> ActorContext {
        match &self.account {
            Some(id) => ActorContext::Account(id.clone()),
            None => ActorContext::Anonymous {
                addr: self.addr.clone(),
                user_agent: self.user_agent.clone(),
            },
        }
    }
}
