//! Shared types for Faktura.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for type-safe entity references
//! - Currency codes with strict parsing

pub mod types;

pub use types::*;
