//! HTTP API for the CampusTalk board.
//!
//! Thin transport layer over `campustalk-engine`: handlers resolve the
//! caller into an [`Actor`](campustalk_engine::Actor), delegate to the
//! engine, and translate `BoardError` into HTTP status codes. No board
//! rules live here.

pub mod auth;
pub mod error;
pub mod handlers;
pub mod server;

pub use auth::{Identity, IdentityProvider, StaticTokenProvider};
pub use error::ApiError;
pub use server::{router, AppState, BoardServer};
