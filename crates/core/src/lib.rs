//! Core business logic for Faktura.
//!
//! This crate contains pure business logic with ZERO web or database
//! dependencies. All domain types, validation rules, and calculations live
//! here.
//!
//! # Modules
//!
//! - `document` - Invoice/quote lifecycle, numbering assignment, event log
//! - `totals` - Line/document totals and payment reconciliation
//! - `recurring` - Recurring invoice date computation
//! - `numbering` - Per-tenant document number sequences
//! - `tenant` - Tenant settings (tax configuration, default currency)
//! - `store` - Storage abstractions and in-memory implementations

pub mod document;
pub mod numbering;
pub mod recurring;
pub mod store;
pub mod tenant;
pub mod totals;
