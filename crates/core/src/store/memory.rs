//! In-memory store implementations, for tests and embedding.

use dashmap::DashMap;
use faktura_shared::{DocumentId, PaymentId};

use crate::document::types::Document;
use crate::totals::types::Payment;

use super::{DocumentStore, PaymentStore, StoreError};

/// Document store backed by a concurrent map.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    documents: DashMap<DocumentId, Document>,
}

impl InMemoryDocumentStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored documents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Returns true if no documents are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl DocumentStore for InMemoryDocumentStore {
    fn save(&self, document: &Document) -> Result<(), StoreError> {
        self.documents.insert(document.id, document.clone());
        Ok(())
    }

    fn find_by_id(&self, id: DocumentId) -> Result<Option<Document>, StoreError> {
        Ok(self.documents.get(&id).map(|d| d.clone()))
    }

    fn list_all(&self) -> Result<Vec<Document>, StoreError> {
        Ok(self.documents.iter().map(|d| d.clone()).collect())
    }
}

/// Payment ledger backed by a concurrent map.
///
/// The write side (`record`, `remove`) belongs to the external payments
/// feature; the core only consumes `list_by_invoice`.
#[derive(Debug, Default)]
pub struct InMemoryPaymentStore {
    payments: DashMap<PaymentId, Payment>,
}

impl InMemoryPaymentStore {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a payment.
    pub fn record(&self, payment: Payment) {
        self.payments.insert(payment.id, payment);
    }

    /// Deletes a payment, returning it if present.
    pub fn remove(&self, id: PaymentId) -> Option<Payment> {
        self.payments.remove(&id).map(|(_, p)| p)
    }
}

impl PaymentStore for InMemoryPaymentStore {
    fn list_by_invoice(&self, invoice_id: DocumentId) -> Result<Vec<Payment>, StoreError> {
        let mut payments: Vec<Payment> = self
            .payments
            .iter()
            .filter(|p| p.invoice_id == invoice_id)
            .map(|p| p.clone())
            .collect();
        payments.sort_by_key(|p| p.paid_at);
        Ok(payments)
    }
}
