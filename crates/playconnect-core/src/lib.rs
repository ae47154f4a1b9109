//! Shared service plumbing for PlayConnect.
//!
//! Framework glue only — no domain types. Import from `handlers/` and
//! `main.rs`; the `usecase/` and `domain/` layers stay free of it.

pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;
