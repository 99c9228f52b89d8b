//! Recurring schedule arithmetic.
//!
//! Month-based frequencies clamp to the end of the target month: Jan 31 +
//! 1 month is Feb 28 (29 in leap years), never a roll-over into March.

use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// How often a recurring invoice is generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    /// Every 7 days.
    Weekly,
    /// Every 15 days.
    Biweekly,
    /// Every calendar month.
    Monthly,
    /// Every 3 calendar months.
    Quarterly,
    /// Every 6 calendar months.
    Semiannual,
    /// Every calendar year.
    Annual,
}

impl Frequency {
    /// Returns the string representation of the frequency.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::Biweekly => "biweekly",
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
            Self::Semiannual => "semiannual",
            Self::Annual => "annual",
        }
    }

    /// Parses a frequency from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "weekly" => Some(Self::Weekly),
            "biweekly" => Some(Self::Biweekly),
            "monthly" => Some(Self::Monthly),
            "quarterly" => Some(Self::Quarterly),
            "semiannual" => Some(Self::Semiannual),
            "annual" => Some(Self::Annual),
            _ => None,
        }
    }
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Computes the next occurrence of a schedule after `start`.
///
/// Day-based frequencies add a fixed day count. Month-based frequencies use
/// calendar arithmetic with end-of-month clamping. Saturates at the edge of
/// the representable date range.
#[must_use]
pub fn next_occurrence(start: NaiveDate, frequency: Frequency) -> NaiveDate {
    let next = match frequency {
        Frequency::Weekly => start.checked_add_days(Days::new(7)),
        Frequency::Biweekly => start.checked_add_days(Days::new(15)),
        Frequency::Monthly => start.checked_add_months(Months::new(1)),
        Frequency::Quarterly => start.checked_add_months(Months::new(3)),
        Frequency::Semiannual => start.checked_add_months(Months::new(6)),
        Frequency::Annual => start.checked_add_months(Months::new(12)),
    };
    next.unwrap_or(NaiveDate::MAX)
}
