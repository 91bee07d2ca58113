//! Identity Deriver — maps an actor's request context to a stable
//! pseudonymous fingerprint.
//!
//! The derivation is a pure function: the same context and pepper always
//! produce the same [`Fingerprint`](campustalk_types::Fingerprint), and the
//! digest is one-way, so vote and ownership records never contain anything
//! that identifies the actor.

pub mod context;
pub mod derive;
pub mod pepper;

pub use context::ActorContext;
pub use derive::fingerprint;
pub use pepper::Pepper;
