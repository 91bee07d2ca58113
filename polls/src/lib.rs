//! Poll Ledger — single-shot, irrevocable poll voting.
//!
//! Unlike post votes, a poll vote cannot be taken back or switched: one
//! fingerprint, one option, once, before expiry. The ledger records the
//! counter increment and the voters-set insertion together, and callers run
//! it inside a store closure update so the membership check can never race
//! a concurrent vote from the same fingerprint.

pub mod ledger;

pub use ledger::{cast_vote, edit_poll};
