//! Invoice/quote document lifecycle.
//!
//! This module implements the core document functionality:
//! - Domain types for invoices and quotes
//! - Append-only lifecycle event log
//! - Input validation rules
//! - Status transition graph
//! - Error types for document operations
//! - Lifecycle service (create, update, transitions, quote conversion)

pub mod error;
pub mod event;
pub mod service;
pub mod transition;
pub mod types;
pub mod validation;

#[cfg(test)]
mod service_props;

pub use error::DocumentError;
pub use event::{EventType, LifecycleEvent};
pub use service::DocumentService;
pub use types::{
    CreateDocumentInput, Document, DocumentStatus, DocumentType, InitialStatus, LineItem,
    LineItemInput, PaymentTerms, RecurringConfig, ScheduledSend, SendDetails,
    UpdateDocumentInput,
};
