//! Append-only lifecycle event log.
//!
//! Events are immutable once appended. The log is ordered by append time
//! and is never reordered, rewritten, or truncated.

use chrono::{DateTime, Utc};
use faktura_shared::EventId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Kind of lifecycle event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    /// Document created directly as issued.
    Created,
    /// Document created as a draft.
    CreatedDraft,
    /// Invoice created by converting a quote.
    CreatedFromQuote,
    /// Document contents updated.
    Updated,
    /// Document exported as a PDF.
    ExportedPdf,
    /// Draft promoted to an issued invoice.
    MarkedIssued,
    /// Invoice sent to the customer.
    Sent,
    /// Quote sent to the customer.
    QuoteSent,
    /// Quote converted into an invoice.
    ConvertedToInvoice,
    /// Document archived.
    Archived,
    /// Invoice fully paid.
    MarkedPaid,
}

impl EventType {
    /// Returns the string representation of the event type.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "CREATED",
            Self::CreatedDraft => "CREATED_DRAFT",
            Self::CreatedFromQuote => "CREATED_FROM_QUOTE",
            Self::Updated => "UPDATED",
            Self::ExportedPdf => "EXPORTED_PDF",
            Self::MarkedIssued => "MARKED_ISSUED",
            Self::Sent => "SENT",
            Self::QuoteSent => "QUOTE_SENT",
            Self::ConvertedToInvoice => "CONVERTED_TO_INVOICE",
            Self::Archived => "ARCHIVED",
            Self::MarkedPaid => "MARKED_PAID",
        }
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single entry in a document's lifecycle log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifecycleEvent {
    /// Unique identifier.
    pub id: EventId,
    /// What happened.
    pub event_type: EventType,
    /// When it happened.
    pub occurred_at: DateTime<Utc>,
    /// Key/value detail attached at append time.
    pub metadata: BTreeMap<String, String>,
}

impl LifecycleEvent {
    /// Creates an event with no metadata, timestamped now.
    #[must_use]
    pub fn new(event_type: EventType) -> Self {
        Self {
            id: EventId::new(),
            event_type,
            occurred_at: Utc::now(),
            metadata: BTreeMap::new(),
        }
    }

    /// Creates an event carrying metadata, timestamped now.
    #[must_use]
    pub fn with_metadata<K, V, I>(event_type: EventType, metadata: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self {
            id: EventId::new(),
            event_type,
            occurred_at: Utc::now(),
            metadata: metadata
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
