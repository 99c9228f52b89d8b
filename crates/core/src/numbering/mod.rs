//! Per-tenant document number sequences.

pub mod counter;

pub use counter::{
    AllocateError, InMemoryNumberingStore, NumberAllocation, NumberingError, NumberingStore,
    SequenceKind,
};
