//! Document lifecycle service.
//!
//! Owns invoice/quote creation, updates, status transitions, numbering
//! assignment, and the append-only event log. Every operation either fully
//! succeeds (totals computed, number assigned, events appended, document
//! persisted, counter committed) or fails with no stored side effect.

use chrono::{DateTime, Days, NaiveDate, Utc};
use faktura_shared::{DocumentId, LineItemId};
use tracing::info;

use crate::numbering::{AllocateError, NumberingStore, SequenceKind};
use crate::store::{DocumentStore, PaymentStore, StoreError};
use crate::tenant::TenantSettings;
use crate::totals::calculator::document_totals;
use crate::totals::reconcile::reconcile;
use crate::totals::types::PaymentSummary;

use super::error::DocumentError;
use super::event::{EventType, LifecycleEvent};
use super::types::{
    CreateDocumentInput, Document, DocumentStatus, DocumentType, InitialStatus, LineItem,
    PaymentTerms, SendDetails, UpdateDocumentInput,
};
use super::validation;

/// Selects the numbering sequence for a new document.
///
/// Quotes always draw from the quote sequence; invoices draw from the
/// draft sequence until issued, then from the official invoice sequence.
fn sequence_for(document_type: DocumentType, initial_status: InitialStatus) -> SequenceKind {
    match (document_type, initial_status) {
        (DocumentType::Quote, _) => SequenceKind::Quote,
        (DocumentType::Invoice, InitialStatus::Draft) => SequenceKind::Draft,
        (DocumentType::Invoice, InitialStatus::Issued) => SequenceKind::Invoice,
    }
}

/// Derives the due date from the creation time and payment terms.
///
/// Absent for due-on-receipt; saturates at the edge of the representable
/// date range.
fn due_date_for(
    created_at: DateTime<Utc>,
    terms: PaymentTerms,
    custom_net_days: Option<u16>,
) -> Option<NaiveDate> {
    terms.net_days(custom_net_days).map(|days| {
        created_at
            .date_naive()
            .checked_add_days(Days::new(u64::from(days)))
            .unwrap_or(NaiveDate::MAX)
    })
}

/// Document lifecycle service.
///
/// Generic over its collaborators so the core stays free of any concrete
/// persistence mechanism.
pub struct DocumentService<S, N, T, P>
where
    S: DocumentStore,
    N: NumberingStore,
    T: TenantSettings,
    P: PaymentStore,
{
    store: S,
    numbering: N,
    settings: T,
    payments: P,
}

impl<S, N, T, P> DocumentService<S, N, T, P>
where
    S: DocumentStore,
    N: NumberingStore,
    T: TenantSettings,
    P: PaymentStore,
{
    /// Creates a service over the given collaborators.
    pub fn new(store: S, numbering: N, settings: T, payments: P) -> Self {
        Self {
            store,
            numbering,
            settings,
            payments,
        }
    }

    fn load(&self, id: DocumentId) -> Result<Document, DocumentError> {
        self.store
            .find_by_id(id)?
            .ok_or(DocumentError::NotFound(id))
    }

    fn map_alloc(err: AllocateError<StoreError>) -> DocumentError {
        match err {
            AllocateError::Sequence(e) => e.into(),
            AllocateError::Persist(e) => e.into(),
        }
    }

    /// Creates a document as a draft or directly as issued.
    ///
    /// Line items get fresh identities; totals are computed against the
    /// tenant's current tax configuration; the document number is drawn
    /// from the sequence selected by type and initial status. Allocation
    /// holds the sequence's lock across the save, so concurrent creators
    /// never share a number and a failed save never burns one.
    ///
    /// # Errors
    ///
    /// Returns validation errors for malformed input,
    /// `TenantConfigMissing` when the tenant is not onboarded, and store
    /// or numbering errors from the collaborators.
    pub fn create(&self, input: CreateDocumentInput) -> Result<Document, DocumentError> {
        validation::validate_line_items(&input.line_items)?;
        validation::validate_payment_terms(input.payment_terms, input.custom_net_days)?;

        let tax_config = self
            .settings
            .tax_config(input.tenant_id)
            .ok_or(DocumentError::TenantConfigMissing(input.tenant_id))?;
        let currency = match input.currency {
            Some(currency) => currency,
            None => self
                .settings
                .currency(input.tenant_id)
                .ok_or(DocumentError::TenantConfigMissing(input.tenant_id))?,
        };

        let line_items: Vec<LineItem> = input.line_items.iter().map(LineItem::from_input).collect();
        let totals = document_totals(&line_items, &tax_config);

        let kind = sequence_for(input.document_type, input.initial_status);

        let now = Utc::now();
        let mut document = Document {
            id: DocumentId::new(),
            tenant_id: input.tenant_id,
            document_type: input.document_type,
            document_number: String::new(),
            customer_id: input.customer_id,
            currency,
            line_items,
            subtotal: totals.subtotal,
            tax_amount: totals.tax,
            total: totals.total,
            status: input.initial_status.as_status(),
            payment_terms: input.payment_terms,
            custom_net_days: input.custom_net_days,
            due_date: due_date_for(now, input.payment_terms, input.custom_net_days),
            origin_quote_id: None,
            send_details: None,
            recurring: input.recurring,
            scheduled_send: input.scheduled_send,
            events: Vec::new(),
            archived_at: None,
            created_at: now,
            updated_at: now,
        };

        match input.initial_status {
            InitialStatus::Draft => {
                document.record_event(LifecycleEvent::new(EventType::CreatedDraft));
            }
            InitialStatus::Issued => {
                document.record_event(LifecycleEvent::new(EventType::Created));
                document.record_event(LifecycleEvent::new(EventType::MarkedIssued));
            }
        }

        self.numbering
            .allocate(input.tenant_id, kind, |allocation| {
                document.document_number = allocation.format();
                self.store.save(&document)
            })
            .map_err(Self::map_alloc)?;

        info!(
            document_id = %document.id,
            number = %document.document_number,
            status = %document.status,
            "document created"
        );
        Ok(document)
    }

    /// Replaces a document's contents, recomputing totals and due date.
    ///
    /// Line-item identities are preserved positionally where a line
    /// already exists at the same index; extra lines get fresh ones. The
    /// document number is never reassigned here.
    ///
    /// # Errors
    ///
    /// `NotFound` for unknown ids, `ArchivedImmutable` for archived
    /// documents, plus the validation errors of `create`.
    pub fn update(
        &self,
        id: DocumentId,
        input: UpdateDocumentInput,
    ) -> Result<Document, DocumentError> {
        let mut document = self.load(id)?;
        if document.status.is_terminal() {
            return Err(DocumentError::ArchivedImmutable(id));
        }

        validation::validate_line_items(&input.line_items)?;
        validation::validate_payment_terms(input.payment_terms, input.custom_net_days)?;

        let tax_config = self
            .settings
            .tax_config(document.tenant_id)
            .ok_or(DocumentError::TenantConfigMissing(document.tenant_id))?;

        let line_items: Vec<LineItem> = input
            .line_items
            .iter()
            .enumerate()
            .map(|(index, item)| LineItem {
                id: document
                    .line_items
                    .get(index)
                    .map_or_else(LineItemId::new, |existing| existing.id),
                description: item.description.clone(),
                quantity: item.quantity,
                unit_price: item.unit_price,
                discount_percent: item.discount_percent,
                product_id: item.product_id,
            })
            .collect();
        let totals = document_totals(&line_items, &tax_config);

        document.customer_id = input.customer_id;
        document.line_items = line_items;
        document.subtotal = totals.subtotal;
        document.tax_amount = totals.tax;
        document.total = totals.total;
        document.payment_terms = input.payment_terms;
        document.custom_net_days = input.custom_net_days;
        document.due_date =
            due_date_for(document.created_at, input.payment_terms, input.custom_net_days);
        document.recurring = input.recurring;
        document.scheduled_send = input.scheduled_send;
        document.record_event(LifecycleEvent::new(EventType::Updated));

        self.store.save(&document)?;
        info!(document_id = %document.id, "document updated");
        Ok(document)
    }

    /// Promotes a draft invoice to issued.
    ///
    /// Draws a fresh number from the official invoice sequence; the draft
    /// number is discarded.
    ///
    /// # Errors
    ///
    /// `InvalidDocumentType` for quotes, `InvalidTransition` unless the
    /// document is a draft.
    pub fn issue(&self, id: DocumentId) -> Result<Document, DocumentError> {
        let mut document = self.load(id)?;
        if document.document_type != DocumentType::Invoice {
            return Err(DocumentError::InvalidDocumentType {
                expected: DocumentType::Invoice,
                actual: document.document_type,
            });
        }
        match document.status {
            DocumentStatus::Draft => {}
            from => {
                return Err(DocumentError::InvalidTransition {
                    from,
                    to: DocumentStatus::Issued,
                });
            }
        }

        let old_number = document.document_number.clone();
        document.status = DocumentStatus::Issued;
        document.record_event(LifecycleEvent::new(EventType::MarkedIssued));

        let tenant_id = document.tenant_id;
        self.numbering
            .allocate(tenant_id, SequenceKind::Invoice, |allocation| {
                document.document_number = allocation.format();
                self.store.save(&document)
            })
            .map_err(Self::map_alloc)?;

        info!(
            document_id = %document.id,
            old_number,
            number = %document.document_number,
            "draft issued"
        );
        Ok(document)
    }

    /// Marks a document as sent, attaching the send details.
    ///
    /// # Errors
    ///
    /// `InvalidTransition` unless the document is a draft or issued.
    pub fn send(&self, id: DocumentId, details: SendDetails) -> Result<Document, DocumentError> {
        let mut document = self.load(id)?;
        match document.status {
            DocumentStatus::Draft | DocumentStatus::Issued => {}
            from => {
                return Err(DocumentError::InvalidTransition {
                    from,
                    to: DocumentStatus::Sent,
                });
            }
        }

        let event_type = match document.document_type {
            DocumentType::Invoice => EventType::Sent,
            DocumentType::Quote => EventType::QuoteSent,
        };
        document.status = DocumentStatus::Sent;
        document.record_event(LifecycleEvent::with_metadata(
            event_type,
            [("to_email", details.to_email.clone())],
        ));
        document.send_details = Some(details);

        self.store.save(&document)?;
        info!(document_id = %document.id, "document sent");
        Ok(document)
    }

    /// Marks an invoice as paid, driven by payment reconciliation.
    ///
    /// Not a direct user action: callers obtain the summary from
    /// `reconcile` (or use [`Self::apply_reconciliation`]).
    ///
    /// # Errors
    ///
    /// `InvalidDocumentType` for quotes, `InvalidTransition` unless the
    /// invoice is issued or sent.
    pub fn mark_paid(
        &self,
        id: DocumentId,
        summary: &PaymentSummary,
    ) -> Result<Document, DocumentError> {
        let mut document = self.load(id)?;
        if document.document_type != DocumentType::Invoice {
            return Err(DocumentError::InvalidDocumentType {
                expected: DocumentType::Invoice,
                actual: document.document_type,
            });
        }
        match document.status {
            DocumentStatus::Issued | DocumentStatus::Sent => {}
            from => {
                return Err(DocumentError::InvalidTransition {
                    from,
                    to: DocumentStatus::Paid,
                });
            }
        }

        document.status = DocumentStatus::Paid;
        document.record_event(LifecycleEvent::with_metadata(
            EventType::MarkedPaid,
            [
                ("total_paid", summary.total_paid.to_string()),
                ("payments_count", summary.payments_count.to_string()),
            ],
        ));

        self.store.save(&document)?;
        info!(document_id = %document.id, total_paid = %summary.total_paid, "invoice paid");
        Ok(document)
    }

    /// Reverts a paid invoice to sent after a payment deletion reopened
    /// the balance.
    ///
    /// Status change only; no dedicated event is appended.
    ///
    /// # Errors
    ///
    /// `InvalidTransition` unless the document is paid.
    pub fn revert_to_sent(&self, id: DocumentId) -> Result<Document, DocumentError> {
        let mut document = self.load(id)?;
        match document.status {
            DocumentStatus::Paid => {}
            from => {
                return Err(DocumentError::InvalidTransition {
                    from,
                    to: DocumentStatus::Sent,
                });
            }
        }

        document.status = DocumentStatus::Sent;
        document.updated_at = Utc::now();

        self.store.save(&document)?;
        info!(document_id = %document.id, "paid invoice reverted to sent");
        Ok(document)
    }

    /// Archives a document. Terminal: nothing transitions out of
    /// archived.
    ///
    /// # Errors
    ///
    /// `InvalidTransition` if the document is already archived.
    pub fn archive(&self, id: DocumentId) -> Result<Document, DocumentError> {
        let mut document = self.load(id)?;
        if document.status.is_terminal() {
            return Err(DocumentError::InvalidTransition {
                from: document.status,
                to: DocumentStatus::Archived,
            });
        }

        document.status = DocumentStatus::Archived;
        document.archived_at = Some(Utc::now());
        document.record_event(LifecycleEvent::new(EventType::Archived));

        self.store.save(&document)?;
        info!(document_id = %document.id, "document archived");
        Ok(document)
    }

    /// Converts a quote into a new draft invoice.
    ///
    /// The invoice gets a fresh id, a number from the official invoice
    /// sequence, copies of the quote's line items under new identities,
    /// and the quote's totals copied verbatim - deliberately NOT
    /// recomputed, so a tax-rate change between quoting and converting
    /// never alters what was quoted. The quote itself is only touched to
    /// append the conversion event.
    ///
    /// # Errors
    ///
    /// `NotFound` for unknown ids, `InvalidDocumentType` when the
    /// document is not a quote.
    pub fn convert_quote_to_invoice(&self, quote_id: DocumentId) -> Result<Document, DocumentError> {
        let mut quote = self.load(quote_id)?;
        if quote.document_type != DocumentType::Quote {
            return Err(DocumentError::InvalidDocumentType {
                expected: DocumentType::Quote,
                actual: quote.document_type,
            });
        }

        let now = Utc::now();
        let mut invoice = Document {
            id: DocumentId::new(),
            tenant_id: quote.tenant_id,
            document_type: DocumentType::Invoice,
            document_number: String::new(),
            customer_id: quote.customer_id,
            currency: quote.currency,
            line_items: quote
                .line_items
                .iter()
                .map(|item| LineItem {
                    id: LineItemId::new(),
                    description: item.description.clone(),
                    quantity: item.quantity,
                    unit_price: item.unit_price,
                    discount_percent: item.discount_percent,
                    product_id: item.product_id,
                })
                .collect(),
            subtotal: quote.subtotal,
            tax_amount: quote.tax_amount,
            total: quote.total,
            status: DocumentStatus::Draft,
            payment_terms: quote.payment_terms,
            custom_net_days: quote.custom_net_days,
            due_date: due_date_for(now, quote.payment_terms, quote.custom_net_days),
            origin_quote_id: Some(quote_id),
            send_details: None,
            recurring: None,
            scheduled_send: None,
            events: Vec::new(),
            archived_at: None,
            created_at: now,
            updated_at: now,
        };

        invoice.record_event(LifecycleEvent::with_metadata(
            EventType::CreatedFromQuote,
            [
                ("origin_quote_id", quote.id.to_string()),
                ("origin_quote_number", quote.document_number.clone()),
            ],
        ));

        self.numbering
            .allocate(quote.tenant_id, SequenceKind::Invoice, |allocation| {
                invoice.document_number = allocation.format();
                self.store.save(&invoice)
            })
            .map_err(Self::map_alloc)?;

        quote.record_event(LifecycleEvent::with_metadata(
            EventType::ConvertedToInvoice,
            [
                ("new_invoice_id", invoice.id.to_string()),
                ("new_invoice_number", invoice.document_number.clone()),
            ],
        ));
        self.store.save(&quote)?;

        info!(
            quote_id = %quote.id,
            invoice_id = %invoice.id,
            number = %invoice.document_number,
            "quote converted to invoice"
        );
        Ok(invoice)
    }

    /// Records a PDF export in the document history.
    ///
    /// Allowed in any status, including archived: exporting never alters
    /// the document beyond its audit trail.
    ///
    /// # Errors
    ///
    /// `NotFound` for unknown ids, plus store errors.
    pub fn record_pdf_export(&self, id: DocumentId) -> Result<Document, DocumentError> {
        let mut document = self.load(id)?;
        document.record_event(LifecycleEvent::new(EventType::ExportedPdf));
        self.store.save(&document)?;
        Ok(document)
    }

    /// Reconciles an invoice against the payment ledger and crosses the
    /// paid boundary in either direction.
    ///
    /// Invoked whenever the payment ledger changes. Fully settled issued
    /// or sent invoices become paid; paid invoices whose balance reopened
    /// revert to sent; anything else is left untouched.
    ///
    /// # Errors
    ///
    /// `NotFound` for unknown ids, `InvalidDocumentType` for quotes, plus
    /// store errors from the collaborators.
    pub fn apply_reconciliation(
        &self,
        id: DocumentId,
    ) -> Result<(Document, PaymentSummary), DocumentError> {
        let document = self.load(id)?;
        if document.document_type != DocumentType::Invoice {
            return Err(DocumentError::InvalidDocumentType {
                expected: DocumentType::Invoice,
                actual: document.document_type,
            });
        }

        let payments = self.payments.list_by_invoice(id)?;
        let summary = reconcile(id, document.total, &payments);

        let document = match (document.status, summary.status.is_settled()) {
            (DocumentStatus::Issued | DocumentStatus::Sent, true) => {
                self.mark_paid(id, &summary)?
            }
            (DocumentStatus::Paid, false) => self.revert_to_sent(id)?,
            _ => document,
        };

        Ok((document, summary))
    }
}
