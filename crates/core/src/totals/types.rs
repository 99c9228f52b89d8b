//! Types for document totals and the payment ledger.

use chrono::{DateTime, Utc};
use faktura_shared::{DocumentId, PaymentId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Derived monetary totals for a document.
///
/// Always produced by the calculator, never set directly by callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentTotals {
    /// Sum of line totals, rounded to the cent.
    pub subtotal: Decimal,
    /// Tax on the subtotal (zero when tax is disabled).
    pub tax: Decimal,
    /// `subtotal + tax`, rounded to the cent.
    pub total: Decimal,
}

impl DocumentTotals {
    /// Zero totals for a document with no line items.
    #[must_use]
    pub fn zero() -> Self {
        Self {
            subtotal: Decimal::ZERO,
            tax: Decimal::ZERO,
            total: Decimal::ZERO,
        }
    }
}

/// How a payment was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Cash payment.
    Cash,
    /// Bank transfer.
    BankTransfer,
    /// Credit or debit card.
    Card,
    /// Paper check.
    Check,
    /// Anything else.
    Other,
}

impl PaymentMethod {
    /// Returns the string representation of the method.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::BankTransfer => "bank_transfer",
            Self::Card => "card",
            Self::Check => "check",
            Self::Other => "other",
        }
    }
}

/// A payment recorded against an invoice.
///
/// Payments are owned by the payment ledger, not by the document; many
/// payments may reference one invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    /// Unique identifier.
    pub id: PaymentId,
    /// The invoice this payment applies to.
    pub invoice_id: DocumentId,
    /// Amount paid (must be positive).
    pub amount: Decimal,
    /// How the payment was made.
    pub method: PaymentMethod,
    /// When the payment was made.
    pub paid_at: DateTime<Utc>,
    /// Optional external reference (e.g., transfer number).
    pub reference: Option<String>,
    /// Optional free-form notes.
    pub notes: Option<String>,
}

/// Aggregate payment state of an invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// No payments recorded.
    Unpaid,
    /// Paid less than the invoice total.
    Partial,
    /// Paid exactly the invoice total.
    Paid,
    /// Paid more than the invoice total.
    Overpaid,
}

impl PaymentStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unpaid => "unpaid",
            Self::Partial => "partial",
            Self::Paid => "paid",
            Self::Overpaid => "overpaid",
        }
    }

    /// Returns true if the invoice is settled (fully paid or more).
    #[must_use]
    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Paid | Self::Overpaid)
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of reconciling an invoice against its payment ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentSummary {
    /// Sum of all payments referencing the invoice.
    pub total_paid: Decimal,
    /// `invoice_total - total_paid` (negative when overpaid).
    pub balance: Decimal,
    /// Aggregate payment status.
    pub status: PaymentStatus,
    /// How many payments were counted.
    pub payments_count: usize,
}
