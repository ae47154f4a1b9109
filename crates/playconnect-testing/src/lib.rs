//! Test utilities for PlayConnect services.
//!
//! Import in `#[cfg(test)]` blocks and `tests/` crates only — never in
//! production code.

pub mod auth;
