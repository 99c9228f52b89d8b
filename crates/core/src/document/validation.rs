//! Input validation for document creation and update.
//!
//! Validation runs before any state is touched: a rejected input leaves no
//! document, no counter increment, and no event behind.

use rust_decimal::Decimal;

use super::error::DocumentError;
use super::types::{LineItemInput, PaymentTerms};

/// Inclusive upper bound for custom net days.
pub const MAX_CUSTOM_NET_DAYS: u16 = 365;

/// Validates line items: at least one, positive quantities, non-negative
/// unit prices, discounts within 0-100.
pub fn validate_line_items(items: &[LineItemInput]) -> Result<(), DocumentError> {
    if items.is_empty() {
        return Err(DocumentError::EmptyLineItems);
    }

    for (index, item) in items.iter().enumerate() {
        if item.quantity <= Decimal::ZERO {
            return Err(DocumentError::NonPositiveQuantity { index });
        }
        if item.unit_price < Decimal::ZERO {
            return Err(DocumentError::NegativeUnitPrice { index });
        }
        if item.discount_percent < Decimal::ZERO || item.discount_percent > Decimal::ONE_HUNDRED {
            return Err(DocumentError::InvalidDiscount { index });
        }
    }

    Ok(())
}

/// Validates payment terms: custom net days present and in 1-365 iff the
/// terms are `Custom`.
pub fn validate_payment_terms(
    terms: PaymentTerms,
    custom_net_days: Option<u16>,
) -> Result<(), DocumentError> {
    match terms {
        PaymentTerms::Custom => match custom_net_days {
            None => Err(DocumentError::MissingCustomNetDays),
            Some(days) if days == 0 || days > MAX_CUSTOM_NET_DAYS => {
                Err(DocumentError::CustomNetDaysOutOfRange { days })
            }
            Some(_) => Ok(()),
        },
        PaymentTerms::DueOnReceipt
        | PaymentTerms::Net15
        | PaymentTerms::Net30
        | PaymentTerms::Net60
        | PaymentTerms::Net90 => Ok(()),
    }
}
