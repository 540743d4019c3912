//! Human-facing order number.

use serde::{Deserialize, Serialize};
use std::fmt;

const PREFIX: &str = "RD-";
const DIGITS: usize = 6;

/// Short code read out over the counter, formatted `RD-######`.
///
/// Display only. Two orders may share a number; the order id is the key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderNumber(String);

impl OrderNumber {
    /// Largest value that fits in six digits.
    pub const MAX: u32 = 999_999;

    /// Format a number, folding anything above six digits back into range.
    #[must_use]
    pub fn from_digits(value: u32) -> Self {
        Self(format!("{PREFIX}{:0width$}", value % (Self::MAX + 1), width = DIGITS))
    }

    /// Parse an existing `RD-######` code.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let digits = raw.strip_prefix(PREFIX)?;
        (digits.len() == DIGITS && digits.bytes().all(|b| b.is_ascii_digit()))
            .then(|| Self(raw.to_string()))
    }

    /// Get the inner string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
