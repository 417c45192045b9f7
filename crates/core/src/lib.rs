//! Shared domain types for the cliptube backend.
//!
//! Keeps the pieces every other crate needs without pulling in sqlx or axum:
//! canonical identifier types, the relation-kind enum, the error taxonomy,
//! and the ownership guard.

pub mod error;
pub mod ownership;
pub mod types;
