//! Document domain types for invoices and quotes.

use chrono::{DateTime, NaiveDate, Utc};
use faktura_shared::{Currency, CustomerId, DocumentId, LineItemId, ProductId, TenantId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::recurring::Frequency;

use super::event::LifecycleEvent;

/// Whether a document is an invoice or a quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentType {
    /// A billable invoice.
    Invoice,
    /// A quote; convertible into an invoice, never payable itself.
    Quote,
}

impl DocumentType {
    /// Returns the string representation of the document type.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Invoice => "invoice",
            Self::Quote => "quote",
        }
    }
}

impl std::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Document status in the lifecycle.
///
/// The valid transitions are:
/// - Draft → Issued (issue; number reassigned)
/// - Draft | Issued → Sent (send)
/// - Issued | Sent → Paid (full payment, via reconciliation)
/// - Paid → Sent (payment deleted, balance reopened)
/// - any non-archived → Archived (terminal)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    /// Being drafted; carries a provisional number.
    Draft,
    /// Officially numbered, not yet sent.
    Issued,
    /// Sent to the customer.
    Sent,
    /// Fully paid.
    Paid,
    /// Archived; terminal.
    Archived,
}

impl DocumentStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Issued => "issued",
            Self::Sent => "sent",
            Self::Paid => "paid",
            Self::Archived => "archived",
        }
    }

    /// Parses a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "draft" => Some(Self::Draft),
            "issued" => Some(Self::Issued),
            "sent" => Some(Self::Sent),
            "paid" => Some(Self::Paid),
            "archived" => Some(Self::Archived),
            _ => None,
        }
    }

    /// Returns true if no further transitions are possible.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Archived)
    }
}

impl std::fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The status a document may be created in.
///
/// A closed subset of `DocumentStatus`: creating directly as sent, paid, or
/// archived is unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InitialStatus {
    /// Create as a draft (provisional number).
    Draft,
    /// Create directly as issued (official number).
    Issued,
}

impl InitialStatus {
    /// The corresponding document status.
    #[must_use]
    pub fn as_status(&self) -> DocumentStatus {
        match self {
            Self::Draft => DocumentStatus::Draft,
            Self::Issued => DocumentStatus::Issued,
        }
    }
}

/// Payment terms determining the due date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentTerms {
    /// Due immediately; no due date is recorded.
    DueOnReceipt,
    /// Due 15 days after creation.
    Net15,
    /// Due 30 days after creation.
    Net30,
    /// Due 60 days after creation.
    Net60,
    /// Due 90 days after creation.
    Net90,
    /// Due a custom number of days after creation (1-365).
    Custom,
}

impl PaymentTerms {
    /// Returns the net days implied by these terms.
    ///
    /// `None` for due-on-receipt. For `Custom`, returns the supplied
    /// `custom_net_days`; validation guarantees it is present.
    #[must_use]
    pub fn net_days(&self, custom_net_days: Option<u16>) -> Option<u16> {
        match self {
            Self::DueOnReceipt => None,
            Self::Net15 => Some(15),
            Self::Net30 => Some(30),
            Self::Net60 => Some(60),
            Self::Net90 => Some(90),
            Self::Custom => custom_net_days,
        }
    }
}

/// One line of a document.
///
/// Line items are owned by the document. Creation assigns every line a
/// fresh identity; updates preserve identities positionally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Unique identifier.
    pub id: LineItemId,
    /// What is being billed.
    pub description: String,
    /// Quantity (must be positive).
    pub quantity: Decimal,
    /// Price per unit (must be non-negative).
    pub unit_price: Decimal,
    /// Per-line discount percentage (0-100).
    pub discount_percent: Decimal,
    /// Optional reference to a catalog product.
    pub product_id: Option<ProductId>,
}

impl LineItem {
    /// Builds a line item with a fresh identity from an input.
    #[must_use]
    pub fn from_input(input: &LineItemInput) -> Self {
        Self {
            id: LineItemId::new(),
            description: input.description.clone(),
            quantity: input.quantity,
            unit_price: input.unit_price,
            discount_percent: input.discount_percent,
            product_id: input.product_id,
        }
    }
}

/// Caller-supplied line item content, without identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItemInput {
    /// What is being billed.
    pub description: String,
    /// Quantity (must be positive).
    pub quantity: Decimal,
    /// Price per unit (must be non-negative).
    pub unit_price: Decimal,
    /// Per-line discount percentage (0-100).
    pub discount_percent: Decimal,
    /// Optional reference to a catalog product.
    pub product_id: Option<ProductId>,
}

/// Details attached when a document is sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendDetails {
    /// Recipient email address.
    pub to_email: String,
    /// Optional message body.
    pub message: Option<String>,
    /// When the document was sent.
    pub sent_at: DateTime<Utc>,
}

/// Recurring generation configuration attached to a document.
///
/// The lifecycle manager only reads `enabled`; schedule execution is an
/// external job concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurringConfig {
    /// Whether recurring generation is active.
    pub enabled: bool,
    /// How often a new invoice is generated.
    pub frequency: Frequency,
    /// The next date an invoice is due to be generated.
    pub next_date: NaiveDate,
}

/// Scheduled send configuration attached to a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledSend {
    /// Whether the scheduled send is active.
    pub enabled: bool,
    /// When to send.
    pub send_at: DateTime<Utc>,
}

/// An invoice or quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Unique identifier, immutable.
    pub id: DocumentId,
    /// The tenant owning this document.
    pub tenant_id: TenantId,
    /// Invoice or quote, immutable.
    pub document_type: DocumentType,
    /// Assigned number (`prefix + counter`); reassigned when a draft is
    /// issued or a quote is converted.
    pub document_number: String,
    /// The customer billed; not owned by the document.
    pub customer_id: CustomerId,
    /// Document currency, immutable after creation.
    pub currency: Currency,
    /// Ordered line items.
    pub line_items: Vec<LineItem>,
    /// Derived: sum of line totals.
    pub subtotal: Decimal,
    /// Derived: tax on the subtotal.
    pub tax_amount: Decimal,
    /// Derived: `subtotal + tax_amount`.
    pub total: Decimal,
    /// Lifecycle status.
    pub status: DocumentStatus,
    /// Payment terms.
    pub payment_terms: PaymentTerms,
    /// Net days when `payment_terms` is `Custom`.
    pub custom_net_days: Option<u16>,
    /// Derived from `created_at` and the payment terms; absent for
    /// due-on-receipt.
    pub due_date: Option<NaiveDate>,
    /// Set only on invoices created by converting a quote.
    pub origin_quote_id: Option<DocumentId>,
    /// Details of the last send, if any.
    pub send_details: Option<SendDetails>,
    /// Optional recurring generation config.
    pub recurring: Option<RecurringConfig>,
    /// Optional scheduled send config.
    pub scheduled_send: Option<ScheduledSend>,
    /// Append-only lifecycle log.
    pub events: Vec<LifecycleEvent>,
    /// Set when the document is archived.
    pub archived_at: Option<DateTime<Utc>>,
    /// When the document was created.
    pub created_at: DateTime<Utc>,
    /// Refreshed on every mutation, including event appends.
    pub updated_at: DateTime<Utc>,
}

impl Document {
    /// Appends a lifecycle event and refreshes `updated_at`.
    ///
    /// This is the only way events enter the log; nothing removes them.
    pub fn record_event(&mut self, event: LifecycleEvent) {
        self.updated_at = event.occurred_at;
        self.events.push(event);
    }
}

/// Input for creating a document.
#[derive(Debug, Clone)]
pub struct CreateDocumentInput {
    /// The tenant creating the document.
    pub tenant_id: TenantId,
    /// The customer billed.
    pub customer_id: CustomerId,
    /// Invoice or quote.
    pub document_type: DocumentType,
    /// Draft or issued.
    pub initial_status: InitialStatus,
    /// Currency; defaults to the tenant currency when absent.
    pub currency: Option<Currency>,
    /// Payment terms.
    pub payment_terms: PaymentTerms,
    /// Net days, required iff `payment_terms` is `Custom`.
    pub custom_net_days: Option<u16>,
    /// Line items (at least one).
    pub line_items: Vec<LineItemInput>,
    /// Optional recurring generation config.
    pub recurring: Option<RecurringConfig>,
    /// Optional scheduled send config.
    pub scheduled_send: Option<ScheduledSend>,
}

/// Input for updating a document.
///
/// Currency and document type are immutable and deliberately absent.
#[derive(Debug, Clone)]
pub struct UpdateDocumentInput {
    /// The customer billed.
    pub customer_id: CustomerId,
    /// Payment terms.
    pub payment_terms: PaymentTerms,
    /// Net days, required iff `payment_terms` is `Custom`.
    pub custom_net_days: Option<u16>,
    /// Replacement line items (at least one).
    pub line_items: Vec<LineItemInput>,
    /// Optional recurring generation config.
    pub recurring: Option<RecurringConfig>,
    /// Optional scheduled send config.
    pub scheduled_send: Option<ScheduledSend>,
}
