//! Currency codes with strict parsing.
//!
//! A closed enum rather than a free-form string, so every consumption site
//! handles the full set of supported currencies exhaustively.

use serde::{Deserialize, Serialize};

/// ISO 4217 currency codes supported by the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// US Dollar
    Usd,
    /// Euro
    Eur,
    /// British Pound
    Gbp,
    /// Indonesian Rupiah
    Idr,
    /// Singapore Dollar
    Sgd,
    /// Japanese Yen
    Jpy,
}

impl Currency {
    /// Returns the ISO 4217 code for this currency.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Usd => "USD",
            Self::Eur => "EUR",
            Self::Gbp => "GBP",
            Self::Idr => "IDR",
            Self::Sgd => "SGD",
            Self::Jpy => "JPY",
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl std::str::FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "USD" => Ok(Self::Usd),
            "EUR" => Ok(Self::Eur),
            "GBP" => Ok(Self::Gbp),
            "IDR" => Ok(Self::Idr),
            "SGD" => Ok(Self::Sgd),
            "JPY" => Ok(Self::Jpy),
            _ => Err(format!("Unknown currency: {s}")),
        }
    }
}
