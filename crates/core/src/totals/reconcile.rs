//! Payment reconciliation.
//!
//! Computes paid/balance/status for an invoice from the payment ledger.
//! The caller re-runs this whenever the ledger changes and feeds the result
//! back into the document lifecycle to cross the paid boundary.

use faktura_shared::DocumentId;
use rust_decimal::Decimal;

use super::types::{Payment, PaymentStatus, PaymentSummary};

/// Reconciles an invoice total against its payment ledger.
///
/// Payments referencing a different invoice are ignored, so the full ledger
/// can be passed as-is.
#[must_use]
pub fn reconcile(
    invoice_id: DocumentId,
    invoice_total: Decimal,
    payments: &[Payment],
) -> PaymentSummary {
    let matching: Vec<&Payment> = payments
        .iter()
        .filter(|p| p.invoice_id == invoice_id)
        .collect();

    let total_paid: Decimal = matching.iter().map(|p| p.amount).sum();
    let balance = invoice_total - total_paid;

    let status = if total_paid == Decimal::ZERO {
        PaymentStatus::Unpaid
    } else {
        match total_paid.cmp(&invoice_total) {
            std::cmp::Ordering::Less => PaymentStatus::Partial,
            std::cmp::Ordering::Equal => PaymentStatus::Paid,
            std::cmp::Ordering::Greater => PaymentStatus::Overpaid,
        }
    };

    PaymentSummary {
        total_paid,
        balance,
        status,
        payments_count: matching.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::totals::types::PaymentMethod;
    use chrono::Utc;
    use faktura_shared::PaymentId;
    use rust_decimal_macros::dec;

    fn payment(invoice_id: DocumentId, amount: Decimal) -> Payment {
        Payment {
            id: PaymentId::new(),
            invoice_id,
            amount,
            method: PaymentMethod::BankTransfer,
            paid_at: Utc::now(),
            reference: None,
            notes: None,
        }
    }

    #[test]
    fn test_reconcile_unpaid() {
        let id = DocumentId::new();
        let summary = reconcile(id, dec!(100), &[]);

        assert_eq!(summary.total_paid, dec!(0));
        assert_eq!(summary.balance, dec!(100));
        assert_eq!(summary.status, PaymentStatus::Unpaid);
        assert_eq!(summary.payments_count, 0);
    }

    #[test]
    fn test_reconcile_partial() {
        let id = DocumentId::new();
        let summary = reconcile(id, dec!(100), &[payment(id, dec!(40))]);

        assert_eq!(summary.total_paid, dec!(40));
        assert_eq!(summary.balance, dec!(60));
        assert_eq!(summary.status, PaymentStatus::Partial);
    }

    #[test]
    fn test_reconcile_exactly_paid() {
        let id = DocumentId::new();
        let summary = reconcile(id, dec!(100), &[payment(id, dec!(40)), payment(id, dec!(60))]);

        assert_eq!(summary.total_paid, dec!(100));
        assert_eq!(summary.balance, dec!(0));
        assert_eq!(summary.status, PaymentStatus::Paid);
        assert_eq!(summary.payments_count, 2);
    }

    #[test]
    fn test_reconcile_overpaid() {
        let id = DocumentId::new();
        let summary = reconcile(id, dec!(100), &[payment(id, dec!(150))]);

        assert_eq!(summary.status, PaymentStatus::Overpaid);
        assert_eq!(summary.balance, dec!(-50));
    }

    #[test]
    fn test_reconcile_ignores_other_invoices() {
        let id = DocumentId::new();
        let other = DocumentId::new();
        let summary = reconcile(id, dec!(100), &[payment(other, dec!(100)), payment(id, dec!(25))]);

        assert_eq!(summary.total_paid, dec!(25));
        assert_eq!(summary.status, PaymentStatus::Partial);
        assert_eq!(summary.payments_count, 1);
    }

    #[test]
    fn test_reconcile_zero_total_with_payment_is_overpaid() {
        let id = DocumentId::new();
        let summary = reconcile(id, dec!(0), &[payment(id, dec!(10))]);
        assert_eq!(summary.status, PaymentStatus::Overpaid);
    }

    #[test]
    fn test_reconcile_zero_total_no_payments_is_unpaid() {
        let id = DocumentId::new();
        let summary = reconcile(id, dec!(0), &[]);
        assert_eq!(summary.status, PaymentStatus::Unpaid);
    }
}
