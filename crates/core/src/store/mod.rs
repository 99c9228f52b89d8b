//! Storage abstractions.
//!
//! The lifecycle manager depends only on these traits, never on a concrete
//! persistence mechanism. Per-record read/write, no collection rewrites.

pub mod memory;

use thiserror::Error;

use faktura_shared::DocumentId;

use crate::document::types::Document;
use crate::totals::types::Payment;

pub use memory::{InMemoryDocumentStore, InMemoryPaymentStore};

/// Errors surfaced by a storage backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend failed to read or write a record.
    #[error("Storage backend failure: {0}")]
    Backend(String),
}

/// Store of documents, keyed by id.
pub trait DocumentStore {
    /// Inserts or replaces a document.
    fn save(&self, document: &Document) -> Result<(), StoreError>;

    /// Looks up a document by id.
    fn find_by_id(&self, id: DocumentId) -> Result<Option<Document>, StoreError>;

    /// Returns every stored document.
    fn list_all(&self) -> Result<Vec<Document>, StoreError>;
}

/// Read-only view of the payment ledger.
pub trait PaymentStore {
    /// Returns all payments recorded against an invoice.
    fn list_by_invoice(&self, invoice_id: DocumentId) -> Result<Vec<Payment>, StoreError>;
}

impl<T: DocumentStore> DocumentStore for std::sync::Arc<T> {
    fn save(&self, document: &Document) -> Result<(), StoreError> {
        (**self).save(document)
    }

    fn find_by_id(&self, id: DocumentId) -> Result<Option<Document>, StoreError> {
        (**self).find_by_id(id)
    }

    fn list_all(&self) -> Result<Vec<Document>, StoreError> {
        (**self).list_all()
    }
}

impl<T: PaymentStore> PaymentStore for std::sync::Arc<T> {
    fn list_by_invoice(&self, invoice_id: DocumentId) -> Result<Vec<Payment>, StoreError> {
        (**self).list_by_invoice(invoice_id)
    }
}
