//! In-memory storage backend for the CampusTalk board.
//!
//! Implements the storage traits from `campustalk-store` with plain maps.
//! Each row lives behind its own mutex, held only for the duration of a
//! read-modify-write, so updates to the same entity serialize while updates
//! to different entities proceed in parallel.

pub mod store;

pub use store::MemoryStore;
