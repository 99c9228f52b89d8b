//! Property-based tests for the totals and reconciliation calculators.

use chrono::Utc;
use faktura_shared::{DocumentId, LineItemId, PaymentId};
use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::document::types::LineItem;
use crate::tenant::TaxConfig;
use crate::totals::calculator::document_totals;
use crate::totals::reconcile::reconcile;
use crate::totals::types::{Payment, PaymentMethod, PaymentStatus};

/// Quantity in [0.01, 10000], two decimal places.
fn arb_quantity() -> impl Strategy<Value = Decimal> {
    (1i64..=1_000_000).prop_map(|n| Decimal::new(n, 2))
}

/// Unit price in [0, 100000], two decimal places.
fn arb_unit_price() -> impl Strategy<Value = Decimal> {
    (0i64..=10_000_000).prop_map(|n| Decimal::new(n, 2))
}

/// Discount percent in [0, 100], two decimal places.
fn arb_discount() -> impl Strategy<Value = Decimal> {
    (0i64..=10_000).prop_map(|n| Decimal::new(n, 2))
}

fn arb_line_item() -> impl Strategy<Value = LineItem> {
    (arb_quantity(), arb_unit_price(), arb_discount()).prop_map(
        |(quantity, unit_price, discount_percent)| LineItem {
            id: LineItemId::new(),
            description: "item".to_string(),
            quantity,
            unit_price,
            discount_percent,
            product_id: None,
        },
    )
}

fn arb_items() -> impl Strategy<Value = Vec<LineItem>> {
    prop::collection::vec(arb_line_item(), 1..8)
}

/// Tax rate in [0, 30], two decimal places; enabled or disabled.
fn arb_tax_config() -> impl Strategy<Value = TaxConfig> {
    (any::<bool>(), 0i64..=3_000).prop_map(|(enabled, rate)| TaxConfig {
        enabled,
        rate_percent: Decimal::new(rate, 2),
        name: "VAT".to_string(),
    })
}

/// Payment amount in (0, 1000], two decimal places.
fn arb_payment_amount() -> impl Strategy<Value = Decimal> {
    (1i64..=100_000).prop_map(|n| Decimal::new(n, 2))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// subtotal + tax always equals total, to the cent.
    #[test]
    fn prop_rounding_invariant(items in arb_items(), config in arb_tax_config()) {
        let totals = document_totals(&items, &config);
        prop_assert_eq!(totals.subtotal + totals.tax, totals.total);
    }

    /// Totals are never negative for valid inputs.
    #[test]
    fn prop_totals_never_negative(items in arb_items(), config in arb_tax_config()) {
        let totals = document_totals(&items, &config);
        prop_assert!(totals.subtotal >= Decimal::ZERO);
        prop_assert!(totals.tax >= Decimal::ZERO);
        prop_assert!(totals.total >= Decimal::ZERO);
    }

    /// The calculator is a pure function: same inputs, same outputs.
    #[test]
    fn prop_totals_idempotent(items in arb_items(), config in arb_tax_config()) {
        prop_assert_eq!(
            document_totals(&items, &config),
            document_totals(&items, &config)
        );
    }

    /// Tax disabled always means zero tax and total == subtotal.
    #[test]
    fn prop_disabled_tax_is_zero(items in arb_items(), rate in 0i64..=3_000) {
        let config = TaxConfig {
            enabled: false,
            rate_percent: Decimal::new(rate, 2),
            name: String::new(),
        };
        let totals = document_totals(&items, &config);
        prop_assert_eq!(totals.tax, Decimal::ZERO);
        prop_assert_eq!(totals.total, totals.subtotal);
    }

    /// total_paid + balance always reconstructs the invoice total, and the
    /// status matches the arithmetic exactly.
    #[test]
    fn prop_reconcile_balance_identity(
        total in 0i64..=1_000_000,
        amounts in prop::collection::vec(arb_payment_amount(), 0..6),
    ) {
        let invoice_id = DocumentId::new();
        let invoice_total = Decimal::new(total, 2);
        let payments: Vec<Payment> = amounts
            .iter()
            .map(|&amount| Payment {
                id: PaymentId::new(),
                invoice_id,
                amount,
                method: PaymentMethod::Cash,
                paid_at: Utc::now(),
                reference: None,
                notes: None,
            })
            .collect();

        let summary = reconcile(invoice_id, invoice_total, &payments);

        prop_assert_eq!(summary.total_paid + summary.balance, invoice_total);
        prop_assert_eq!(summary.payments_count, payments.len());

        let expected = if summary.total_paid == Decimal::ZERO {
            PaymentStatus::Unpaid
        } else if summary.total_paid < invoice_total {
            PaymentStatus::Partial
        } else if summary.total_paid == invoice_total {
            PaymentStatus::Paid
        } else {
            PaymentStatus::Overpaid
        };
        prop_assert_eq!(summary.status, expected);
    }

    /// Payments against other invoices never change the summary.
    #[test]
    fn prop_reconcile_filters_foreign_payments(
        amounts in prop::collection::vec(arb_payment_amount(), 1..6),
    ) {
        let invoice_id = DocumentId::new();
        let foreign: Vec<Payment> = amounts
            .iter()
            .map(|&amount| Payment {
                id: PaymentId::new(),
                invoice_id: DocumentId::new(),
                amount,
                method: PaymentMethod::Card,
                paid_at: Utc::now(),
                reference: None,
                notes: None,
            })
            .collect();

        let summary = reconcile(invoice_id, Decimal::ONE_HUNDRED, &foreign);
        prop_assert_eq!(summary.total_paid, Decimal::ZERO);
        prop_assert_eq!(summary.status, PaymentStatus::Unpaid);
        prop_assert_eq!(summary.payments_count, 0);
    }
}
