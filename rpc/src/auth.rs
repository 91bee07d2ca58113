//! Caller resolution: bearer token plus network context into an [`Actor`].
//!
//! Account verification is delegated to an external identity provider; the
//! board only ever sees an opaque [`AccountId`] and a moderator flag. A
//! request without credentials is a guest, not an error — guests can read,
//! comment, report and vote on polls.

use std::collections::HashMap;

use axum::http::HeaderMap;

use campustalk_engine::Actor;
use campustalk_types::{AccountId, BoardError};

/// What the identity provider asserts about one bearer token.
#[derive(Clone, Debug)]
pub struct Identity {
    pub account: AccountId,
    pub moderator: bool,
}

/// Resolves a bearer token into a verified identity.
pub trait IdentityProvider: Send + Sync {
    /// `None` means the token is unknown or no longer valid.
    fn resolve(&self, token: &str) -> Option<Identity>;
}

/// Fixed token table, for development instances and tests.
#[derive(Default)]
pub struct StaticTokenProvider {
    tokens: HashMap<String, Identity>,
}

impl StaticTokenProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(
        mut self,
        token: impl Into<String>,
        account: impl Into<String>,
        moderator: bool,
    ) -> Self {
        self.tokens.insert(
            token.into(),
            Identity {
                account: AccountId::new(account),
                moderator,
            },
        );
        self
    }
}

impl IdentityProvider for StaticTokenProvider {
    fn resolve(&self, token: &str) -> Option<Identity> {
        self.tokens.get(token).cloned()
    }
}

/// Build the request's [`Actor`] from its headers.
///
/// No `Authorization` header resolves to a guest; a present but
/// unverifiable token is rejected so a caller with a stale session notices
/// instead of silently posting as a guest.
pub fn resolve_actor(
    headers: &HeaderMap,
    provider: &dyn IdentityProvider,
) -> Result<Actor, BoardError> {
    let addr = header_str(headers, "x-forwarded-for")
        .map(|v| v.split(',').next().unwrap_or(v).trim().to_string())
        .unwrap_or_else(|| "local".to_string());
    let user_agent = header_str(headers, "user-agent")
        .unwrap_or("unknown")
        .to_string();

    match bearer_token(headers) {
        None => Ok(Actor::guest(addr, user_agent)),
        Some(token) => {
            let identity = provider.resolve(token).ok_or(BoardError::Unauthorized)?;
            let mut actor = Actor::member(identity.account, addr, user_agent);
            actor.moderator = identity.moderator;
            Ok(actor)
        }
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    header_str(headers, "authorization")?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}
