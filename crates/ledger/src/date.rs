use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::LedgerError;

const DATE_FORMAT: &str = "%d-%m-%Y";

/// Calendar date of a transaction, wire-encoded exactly as `dd-mm-yyyy`.
///
/// No time component, no timezone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TxDate(NaiveDate);

impl TxDate {
    #[must_use]
    pub const fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Today in the local timezone, the default for new drafts.
    #[must_use]
    pub fn today() -> Self {
        Self(chrono::Local::now().date_naive())
    }

    #[must_use]
    pub const fn date(self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for TxDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

impl FromStr for TxDate {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
            .map(Self)
            .map_err(|_| {
                LedgerError::InvalidDraft(format!("invalid date: {s} (expected dd-mm-yyyy)"))
            })
    }
}

impl TryFrom<String> for TxDate {
    type Error = LedgerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TxDate> for String {
    fn from(value: TxDate) -> Self {
        value.to_string()
    }
}
