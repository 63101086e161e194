//! Four-digit year identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A calendar year as used for photo directories and manifest keys.
///
/// Always four ASCII digits on the wire (`"1999"`), so string order and
/// numeric order agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Year(u16);

impl Year {
    /// Largest representable year.
    pub const MAX: u16 = 9999;

    /// Create a year from its numeric value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidYear`] if the value needs more than four digits.
    pub fn new(value: u16) -> Result<Self> {
        if value > Self::MAX {
            return Err(Error::InvalidYear(value.to_string()));
        }
        Ok(Self(value))
    }

    /// The numeric value.
    #[must_use]
    pub fn value(self) -> u16 {
        self.0
    }

    /// Every year from `first` through `last`, inclusive.
    ///
    /// Empty when `first > last`.
    #[must_use]
    pub fn range_inclusive(first: Year, last: Year) -> Vec<Year> {
        (first.0..=last.0).map(Year).collect()
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}", self.0)
    }
}

impl FromStr for Year {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.len() != 4 || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::InvalidYear(s.to_string()));
        }
        s.parse::<u16>()
            .map(Self)
            .map_err(|_| Error::InvalidYear(s.to_string()))
    }
}

impl TryFrom<String> for Year {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Year> for String {
    fn from(year: Year) -> Self {
        year.to_string()
    }
}
