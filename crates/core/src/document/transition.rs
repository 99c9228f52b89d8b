//! Document status transition graph.
//!
//! The single source of truth for which status changes the lifecycle
//! permits. Service methods enforce their own slice of this graph; the
//! property suite cross-checks the two against each other.
//!
//! ```text
//! draft --(issue)--> issued --(send)--> sent --(full payment)--> paid
//!   |                  |                  ^                        |
//!   +---(send)---------+                  +--(payment deleted)-----+
//!   |
//!   +------(archive from any non-terminal state)------> archived (terminal)
//! ```

use super::error::DocumentError;
use super::types::DocumentStatus;

/// Returns true if the status graph permits `from` → `to`.
#[must_use]
pub fn is_allowed(from: DocumentStatus, to: DocumentStatus) -> bool {
    use crate::document::types::DocumentStatus::{Archived, Draft, Issued, Paid, Sent};

    match (from, to) {
        // Issue a draft (number reassigned to the invoice sequence).
        (Draft, Issued) => true,
        // Send to the customer.
        (Draft | Issued, Sent) => true,
        // Full payment, driven by reconciliation.
        (Issued | Sent, Paid) => true,
        // Payment deleted, balance reopened.
        (Paid, Sent) => true,
        // Archive from any non-terminal state.
        (Draft | Issued | Sent | Paid, Archived) => true,
        // Archived is terminal; everything else is off-graph.
        (Archived, _)
        | (_, Draft)
        | (Issued, Issued)
        | (Sent, Sent | Issued)
        | (Paid, Paid | Issued)
        | (Draft, Paid) => false,
    }
}

/// Validates a transition, returning `InvalidTransition` when off-graph.
pub fn validate(from: DocumentStatus, to: DocumentStatus) -> Result<(), DocumentError> {
    if is_allowed(from, to) {
        Ok(())
    } else {
        Err(DocumentError::InvalidTransition { from, to })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::types::DocumentStatus::{Archived, Draft, Issued, Paid, Sent};
    use rstest::rstest;

    #[rstest]
    #[case(Draft, Issued)]
    #[case(Draft, Sent)]
    #[case(Issued, Sent)]
    #[case(Issued, Paid)]
    #[case(Sent, Paid)]
    #[case(Paid, Sent)]
    #[case(Draft, Archived)]
    #[case(Issued, Archived)]
    #[case(Sent, Archived)]
    #[case(Paid, Archived)]
    fn test_allowed_transitions(#[case] from: DocumentStatus, #[case] to: DocumentStatus) {
        assert!(is_allowed(from, to));
        assert!(validate(from, to).is_ok());
    }

    #[rstest]
    #[case(Issued, Draft)]
    #[case(Sent, Draft)]
    #[case(Sent, Issued)]
    #[case(Paid, Draft)]
    #[case(Paid, Issued)]
    #[case(Draft, Paid)]
    fn test_forbidden_transitions(#[case] from: DocumentStatus, #[case] to: DocumentStatus) {
        assert!(!is_allowed(from, to));
        assert!(matches!(
            validate(from, to),
            Err(DocumentError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_archived_is_terminal() {
        for to in [Draft, Issued, Sent, Paid, Archived] {
            assert!(!is_allowed(Archived, to));
        }
    }

    #[test]
    fn test_self_transitions_forbidden() {
        for status in [Draft, Issued, Sent, Paid, Archived] {
            assert!(!is_allowed(status, status));
        }
    }
}
