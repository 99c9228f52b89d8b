//! Numbering counter store for document number allocation.
//!
//! Every tenant owns three independent monotonic sequences (draft, quote,
//! invoice), each paired with a prefix. Allocation is atomic: [`NumberingStore::allocate`]
//! holds the sequence's lock while the caller persists the numbered document
//! and advances the counter only on success. A failed save therefore never
//! burns a number, and two concurrent creators can never persist the same
//! number.

use dashmap::DashMap;
use faktura_shared::TenantId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which numbering sequence a document draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SequenceKind {
    /// Invoice drafts (provisional numbers, discarded on issue).
    Draft,
    /// Quotes.
    Quote,
    /// Official issued invoices.
    Invoice,
}

impl SequenceKind {
    /// Returns the string representation of the sequence kind.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Quote => "quote",
            Self::Invoice => "invoice",
        }
    }

    /// Default number prefix for this sequence.
    #[must_use]
    pub fn default_prefix(&self) -> &'static str {
        match self {
            Self::Draft => "DRAFT-",
            Self::Quote => "Q-",
            Self::Invoice => "INV-",
        }
    }
}

impl std::fmt::Display for SequenceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A number drawn from a sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberAllocation {
    /// The prefix configured for the sequence (e.g., "INV-").
    pub prefix: String,
    /// The counter value (starts at 1, strictly increasing).
    pub number: u64,
}

impl NumberAllocation {
    /// Formats the allocation as a document number (`prefix + counter`).
    #[must_use]
    pub fn format(&self) -> String {
        format!("{}{}", self.prefix, self.number)
    }
}

/// Errors that can occur allocating document numbers.
#[derive(Debug, Error)]
pub enum NumberingError {
    /// The backing sequence store could not be reached.
    #[error("Numbering sequence unavailable: {0}")]
    Unavailable(String),
}

/// Why an [`NumberingStore::allocate`] call failed.
#[derive(Debug, Error)]
pub enum AllocateError<E> {
    /// The sequence itself could not be read or advanced.
    #[error(transparent)]
    Sequence(#[from] NumberingError),
    /// The caller's persist step failed; the sequence did not advance.
    #[error("{0}")]
    Persist(E),
}

/// Per-tenant, per-kind monotonic number sequences.
///
/// Implementations MUST serialize allocation per {tenant, kind} so that two
/// concurrent creators never persist the same counter value.
pub trait NumberingStore {
    /// Returns the next number the sequence would hand out, without
    /// advancing it. Advisory only: another allocator may take the number
    /// between this call and `allocate`.
    fn peek_next(
        &self,
        tenant: TenantId,
        kind: SequenceKind,
    ) -> Result<NumberAllocation, NumberingError>;

    /// Reserves the next number, runs `persist` with it while holding the
    /// sequence's lock, and advances the counter only if `persist`
    /// succeeds.
    ///
    /// `persist` MUST NOT call back into the same sequence; doing so
    /// deadlocks.
    ///
    /// # Errors
    ///
    /// `Sequence` when the sequence cannot be read or advanced; `Persist`
    /// carrying the caller's error when `persist` fails, in which case the
    /// number remains available.
    fn allocate<E>(
        &self,
        tenant: TenantId,
        kind: SequenceKind,
        persist: impl FnOnce(&NumberAllocation) -> Result<(), E>,
    ) -> Result<NumberAllocation, AllocateError<E>>;
}

impl<T: NumberingStore> NumberingStore for std::sync::Arc<T> {
    fn peek_next(
        &self,
        tenant: TenantId,
        kind: SequenceKind,
    ) -> Result<NumberAllocation, NumberingError> {
        (**self).peek_next(tenant, kind)
    }

    fn allocate<E>(
        &self,
        tenant: TenantId,
        kind: SequenceKind,
        persist: impl FnOnce(&NumberAllocation) -> Result<(), E>,
    ) -> Result<NumberAllocation, AllocateError<E>> {
        (**self).allocate(tenant, kind, persist)
    }
}

/// In-memory numbering store backed by a concurrent map.
///
/// Counters start at 1. Prefixes default per sequence kind and can be
/// overridden per tenant.
#[derive(Debug, Default)]
pub struct InMemoryNumberingStore {
    counters: DashMap<(TenantId, SequenceKind), u64>,
    prefixes: DashMap<(TenantId, SequenceKind), String>,
}

impl InMemoryNumberingStore {
    /// Creates a store with all counters at 1 and default prefixes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the prefix for a tenant's sequence.
    pub fn set_prefix(&self, tenant: TenantId, kind: SequenceKind, prefix: impl Into<String>) {
        self.prefixes.insert((tenant, kind), prefix.into());
    }

    fn prefix_for(&self, tenant: TenantId, kind: SequenceKind) -> String {
        self.prefixes
            .get(&(tenant, kind))
            .map_or_else(|| kind.default_prefix().to_string(), |p| p.clone())
    }
}

impl NumberingStore for InMemoryNumberingStore {
    fn peek_next(
        &self,
        tenant: TenantId,
        kind: SequenceKind,
    ) -> Result<NumberAllocation, NumberingError> {
        let number = self
            .counters
            .get(&(tenant, kind))
            .map_or(1, |entry| *entry);

        Ok(NumberAllocation {
            prefix: self.prefix_for(tenant, kind),
            number,
        })
    }

    fn allocate<E>(
        &self,
        tenant: TenantId,
        kind: SequenceKind,
        persist: impl FnOnce(&NumberAllocation) -> Result<(), E>,
    ) -> Result<NumberAllocation, AllocateError<E>> {
        // The entry guard locks the key for the whole reserve-persist-advance
        // span, so concurrent allocators for the same sequence serialize here.
        let mut entry = self.counters.entry((tenant, kind)).or_insert(1);
        let allocation = NumberAllocation {
            prefix: self.prefix_for(tenant, kind),
            number: *entry,
        };

        persist(&allocation).map_err(AllocateError::Persist)?;
        *entry += 1;
        Ok(allocation)
    }
}
