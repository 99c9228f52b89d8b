//! Totals and payment reconciliation calculators.
//!
//! Pure functions over line items and payment ledgers. No side effects;
//! callers re-run reconciliation whenever the payment ledger changes.

pub mod calculator;
pub mod reconcile;
pub mod types;

#[cfg(test)]
mod props;

pub use calculator::{document_totals, line_total};
pub use reconcile::reconcile;
pub use types::{DocumentTotals, Payment, PaymentMethod, PaymentStatus, PaymentSummary};
