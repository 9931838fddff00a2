//! CareerPrep text comparison core and the HTTP service that hosts it.
//!
//! `matching` and `diff::word_diff` are pure and synchronous; everything else is
//! host plumbing around them.

pub mod cache;
pub mod config;
pub mod diff;
pub mod errors;
pub mod matching;
pub mod routes;
pub mod state;
