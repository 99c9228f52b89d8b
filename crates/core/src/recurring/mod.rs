//! Recurring invoice date computation.

pub mod schedule;

pub use schedule::{Frequency, next_occurrence};
