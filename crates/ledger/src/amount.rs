use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::LedgerError;

/// Non-negative money amount represented as **integer minor units** (cents).
///
/// Use this type for **all** monetary values in the ledger (transaction
/// amounts, summary totals) to avoid floating-point drift. The value is
/// currency-agnostic: one implicit currency, interpretation left to the
/// presentation layer.
///
/// Negative values are unrepresentable; construction rejects them.
///
/// # Examples
///
/// ```rust
/// use ledger::Amount;
///
/// let amount = Amount::from_minor(12_34).unwrap();
/// assert_eq!(amount.minor(), 1234);
/// assert_eq!(amount.to_string(), "12.34");
/// assert!(Amount::from_minor(-1).is_err());
/// ```
///
/// Parsing from user input (accepts `.` or `,` as decimal separator; rejects
/// > 2 decimals):
///
/// ```rust
/// use ledger::Amount;
///
/// assert_eq!("10".parse::<Amount>().unwrap().minor(), 1000);
/// assert_eq!("10,5".parse::<Amount>().unwrap().minor(), 1050);
/// assert!("12.345".parse::<Amount>().is_err());
/// assert!("-1".parse::<Amount>().is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
#[repr(transparent)]
pub struct Amount(i64);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    /// Creates a new amount from integer minor units, rejecting negatives.
    pub fn from_minor(minor: i64) -> Result<Self, LedgerError> {
        if minor < 0 {
            return Err(LedgerError::InvalidDraft(format!(
                "amount must not be negative: {minor}"
            )));
        }
        Ok(Self(minor))
    }

    /// Returns the raw value in minor units.
    #[must_use]
    pub const fn minor(self) -> i64 {
        self.0
    }

    /// Returns `true` if the amount is 0.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Checked addition (returns `None` on overflow).
    #[must_use]
    pub fn checked_add(self, rhs: Amount) -> Option<Amount> {
        self.0.checked_add(rhs.0).map(Amount)
    }

    /// Saturating addition, clamped at `i64::MAX` minor units.
    #[must_use]
    pub fn saturating_add(self, rhs: Amount) -> Amount {
        Amount(self.0.saturating_add(rhs.0))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let units = self.0 / 100;
        let minor = self.0 % 100;
        write!(f, "{units}.{minor:02}")
    }
}

impl TryFrom<i64> for Amount {
    type Error = LedgerError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::from_minor(value)
    }
}

impl From<Amount> for i64 {
    fn from(value: Amount) -> Self {
        value.0
    }
}

impl FromStr for Amount {
    type Err = LedgerError;

    /// Parses a decimal string into minor units.
    ///
    /// Accepts `.` or `,` as decimal separator.
    ///
    /// Validation rules:
    /// - max 2 fractional digits (rejects `12.345`)
    /// - rejects signs (amounts are magnitudes; kind carries the direction)
    /// - rejects empty/invalid strings
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let empty = || LedgerError::InvalidDraft("empty amount".to_string());
        let invalid = || LedgerError::InvalidDraft(format!("invalid amount: {s}"));
        let overflow = || LedgerError::InvalidDraft("amount too large".to_string());

        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(empty());
        }

        let trimmed = trimmed.replace(',', ".");
        let mut parts = trimmed.split('.');
        let units_str = parts.next().ok_or_else(invalid)?;
        let minor_str = parts.next();

        if parts.next().is_some() {
            return Err(invalid());
        }

        if units_str.is_empty() || !units_str.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }

        let units: i64 = units_str.parse().map_err(|_| invalid())?;

        let minor: i64 = match minor_str {
            None | Some("") => 0,
            Some(frac) => {
                if !frac.chars().all(|c| c.is_ascii_digit()) {
                    return Err(invalid());
                }
                match frac.len() {
                    1 => frac.parse::<i64>().map_err(|_| invalid())? * 10,
                    2 => frac.parse::<i64>().map_err(|_| invalid())?,
                    _ => {
                        return Err(LedgerError::InvalidDraft(
                            "too many decimals".to_string(),
                        ));
                    }
                }
            }
        };

        let total = units
            .checked_mul(100)
            .and_then(|v| v.checked_add(minor))
            .ok_or_else(overflow)?;

        Ok(Amount(total))
    }
}
