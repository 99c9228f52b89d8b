//! Document error types for validation and lifecycle errors.

use faktura_shared::{DocumentId, TenantId};
use thiserror::Error;

use crate::numbering::NumberingError;
use crate::store::StoreError;

use super::types::{DocumentStatus, DocumentType};

/// Errors that can occur during document operations.
#[derive(Debug, Error)]
pub enum DocumentError {
    // ========== Validation Errors ==========
    /// A document must have at least one line item.
    #[error("Document must have at least one line item")]
    EmptyLineItems,

    /// Line item quantity must be positive.
    #[error("Line item {index} has a non-positive quantity")]
    NonPositiveQuantity {
        /// Zero-based position of the offending line.
        index: usize,
    },

    /// Line item unit price cannot be negative.
    #[error("Line item {index} has a negative unit price")]
    NegativeUnitPrice {
        /// Zero-based position of the offending line.
        index: usize,
    },

    /// Line item discount must be between 0 and 100.
    #[error("Line item {index} has a discount outside 0-100")]
    InvalidDiscount {
        /// Zero-based position of the offending line.
        index: usize,
    },

    /// Custom payment terms require the net days to be set.
    #[error("Custom payment terms require custom net days")]
    MissingCustomNetDays,

    /// Custom net days must be between 1 and 365.
    #[error("Custom net days must be between 1 and 365, got {days}")]
    CustomNetDaysOutOfRange {
        /// The rejected value.
        days: u16,
    },

    // ========== Lookup Errors ==========
    /// Document not found.
    #[error("Document not found: {0}")]
    NotFound(DocumentId),

    // ========== Type & State Errors ==========
    /// Operation requires a different document type.
    #[error("Expected a {expected}, got a {actual}")]
    InvalidDocumentType {
        /// The type the operation requires.
        expected: DocumentType,
        /// The type the document actually has.
        actual: DocumentType,
    },

    /// Status transition not permitted from the current state.
    #[error("Invalid status transition: {from} -> {to}")]
    InvalidTransition {
        /// Current status.
        from: DocumentStatus,
        /// Requested status.
        to: DocumentStatus,
    },

    /// Archived documents cannot be modified.
    #[error("Document {0} is archived and cannot be modified")]
    ArchivedImmutable(DocumentId),

    // ========== Configuration Errors ==========
    /// Tenant tax/currency configuration unavailable.
    #[error("Tenant configuration missing for tenant {0}")]
    TenantConfigMissing(TenantId),

    // ========== Infrastructure Errors ==========
    /// Numbering sequence failure.
    #[error(transparent)]
    Numbering(#[from] NumberingError),

    /// Storage backend failure.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl DocumentError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyLineItems => "EMPTY_LINE_ITEMS",
            Self::NonPositiveQuantity { .. } => "NON_POSITIVE_QUANTITY",
            Self::NegativeUnitPrice { .. } => "NEGATIVE_UNIT_PRICE",
            Self::InvalidDiscount { .. } => "INVALID_DISCOUNT",
            Self::MissingCustomNetDays => "MISSING_CUSTOM_NET_DAYS",
            Self::CustomNetDaysOutOfRange { .. } => "CUSTOM_NET_DAYS_OUT_OF_RANGE",
            Self::NotFound(_) => "DOCUMENT_NOT_FOUND",
            Self::InvalidDocumentType { .. } => "INVALID_DOCUMENT_TYPE",
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::ArchivedImmutable(_) => "ARCHIVED_IMMUTABLE",
            Self::TenantConfigMissing(_) => "TENANT_CONFIG_MISSING",
            Self::Numbering(_) => "NUMBERING_ERROR",
            Self::Store(_) => "STORE_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            // 400 Bad Request - validation and state errors
            Self::EmptyLineItems
            | Self::NonPositiveQuantity { .. }
            | Self::NegativeUnitPrice { .. }
            | Self::InvalidDiscount { .. }
            | Self::MissingCustomNetDays
            | Self::CustomNetDaysOutOfRange { .. }
            | Self::InvalidDocumentType { .. }
            | Self::InvalidTransition { .. }
            | Self::ArchivedImmutable(_) => 400,

            // 404 Not Found
            Self::NotFound(_) => 404,

            // 409 Conflict - tenant onboarding incomplete
            Self::TenantConfigMissing(_) => 409,

            // 500 Internal Server Error
            Self::Numbering(_) | Self::Store(_) => 500,
        }
    }

    /// Returns true if correcting the input would make the operation
    /// succeed.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::EmptyLineItems
                | Self::NonPositiveQuantity { .. }
                | Self::NegativeUnitPrice { .. }
                | Self::InvalidDiscount { .. }
                | Self::MissingCustomNetDays
                | Self::CustomNetDaysOutOfRange { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(DocumentError::EmptyLineItems.error_code(), "EMPTY_LINE_ITEMS");
        assert_eq!(
            DocumentError::NonPositiveQuantity { index: 0 }.error_code(),
            "NON_POSITIVE_QUANTITY"
        );
        assert_eq!(
            DocumentError::InvalidTransition {
                from: DocumentStatus::Archived,
                to: DocumentStatus::Sent,
            }
            .error_code(),
            "INVALID_TRANSITION"
        );
        assert_eq!(
            DocumentError::NotFound(DocumentId::new()).error_code(),
            "DOCUMENT_NOT_FOUND"
        );
    }

    #[test]
    fn test_http_status_codes() {
        assert_eq!(DocumentError::EmptyLineItems.http_status_code(), 400);
        assert_eq!(
            DocumentError::NotFound(DocumentId::new()).http_status_code(),
            404
        );
        assert_eq!(
            DocumentError::TenantConfigMissing(TenantId::new()).http_status_code(),
            409
        );
        assert_eq!(
            DocumentError::Store(StoreError::Backend("down".to_string())).http_status_code(),
            500
        );
    }

    #[test]
    fn test_is_validation() {
        assert!(DocumentError::EmptyLineItems.is_validation());
        assert!(DocumentError::MissingCustomNetDays.is_validation());
        assert!(!DocumentError::NotFound(DocumentId::new()).is_validation());
        assert!(
            !DocumentError::InvalidTransition {
                from: DocumentStatus::Paid,
                to: DocumentStatus::Draft,
            }
            .is_validation()
        );
    }

    #[test]
    fn test_error_display() {
        let err = DocumentError::InvalidTransition {
            from: DocumentStatus::Archived,
            to: DocumentStatus::Sent,
        };
        assert_eq!(err.to_string(), "Invalid status transition: archived -> sent");

        let err = DocumentError::CustomNetDaysOutOfRange { days: 400 };
        assert_eq!(
            err.to_string(),
            "Custom net days must be between 1 and 365, got 400"
        );
    }
}
