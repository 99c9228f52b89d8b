//! Line and document total calculation.
//!
//! All amounts are rounded half-up at the cent boundary. Inputs are assumed
//! valid (quantity > 0, unit price >= 0, discount in 0..=100); malformed
//! inputs are rejected by the document validation layer before money is
//! ever computed, so these functions never fail.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::document::types::LineItem;
use crate::tenant::TaxConfig;

use super::types::DocumentTotals;

/// Decimal places for all monetary amounts.
const CENT_PRECISION: u32 = 2;

/// Rounds a monetary amount half-up at the cent boundary.
#[must_use]
pub fn round_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(CENT_PRECISION, RoundingStrategy::MidpointAwayFromZero)
}

/// Computes the total for a single line item:
/// `quantity * unit_price * (1 - discount_percent / 100)`.
#[must_use]
pub fn line_total(item: &LineItem) -> Decimal {
    let discount_factor = (Decimal::ONE_HUNDRED - item.discount_percent) / Decimal::ONE_HUNDRED;
    round_cents(item.quantity * item.unit_price * discount_factor)
}

/// Computes subtotal, tax, and total for a set of line items.
///
/// Tax is zero when the tenant has tax disabled or the rate is not
/// positive. `total` always equals `subtotal + tax` to the cent.
#[must_use]
pub fn document_totals(items: &[LineItem], tax_config: &TaxConfig) -> DocumentTotals {
    let subtotal = round_cents(items.iter().map(line_total).sum());

    let tax = if tax_config.enabled && tax_config.rate_percent > Decimal::ZERO {
        round_cents(subtotal * tax_config.rate_percent / Decimal::ONE_HUNDRED)
    } else {
        Decimal::ZERO
    };

    DocumentTotals {
        subtotal,
        tax,
        total: round_cents(subtotal + tax),
    }
}
