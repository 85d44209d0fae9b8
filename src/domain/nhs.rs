//! NHS number validation
//!
//! Cleans a free-form NHS number field down to its digits and validates it
//! with the Modulus 11 check digit algorithm.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const NHS_NUMBER_LENGTH: usize = 10;

/// Any multiple of this is a run of one repeated digit (reserved/test range).
const REPEATING_DIGIT_DIVISOR: u64 = 1_111_111_111;

/// A cleaned, checksum-valid NHS number
///
/// # Examples
///
/// ```
/// use safeguard::domain::NhsNumber;
///
/// let nhs = NhsNumber::parse("110 339 6005").unwrap();
/// assert_eq!(nhs.as_str(), "1103396005");
///
/// assert!(NhsNumber::parse("1234567890").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NhsNumber(String);

impl NhsNumber {
    /// Strips every non-digit character and validates what is left
    ///
    /// Returns `None` unless exactly ten digits remain, the check digit
    /// matches, and the number is not a repeating-digit sequence.
    pub fn parse(raw: &str) -> Option<Self> {
        let cleaned: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();

        if !has_valid_check_digit(&cleaned) {
            return None;
        }

        let value: u64 = cleaned.parse().ok()?;
        if value % REPEATING_DIGIT_DIVISOR == 0 {
            return None;
        }

        Some(Self(cleaned))
    }

    /// Returns the NHS number as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Validates a raw NHS number field, returning the cleaned digits
///
/// Absent input is invalid.
pub fn validate_nhs_number(raw: Option<&str>) -> Option<NhsNumber> {
    raw.and_then(NhsNumber::parse)
}

fn has_valid_check_digit(digits: &str) -> bool {
    if digits.len() != NHS_NUMBER_LENGTH {
        return false;
    }

    let values: Vec<u32> = digits.bytes().map(|b| u32::from(b - b'0')).collect();

    let sum: u32 = values[..9]
        .iter()
        .zip((2..=10).rev())
        .map(|(digit, weight)| digit * weight)
        .sum();

    let remainder = sum % 11;
    let expected = if remainder == 0 { 0 } else { 11 - remainder };

    // A check digit of 10 can never be issued
    expected != 10 && expected == values[9]
}

impl fmt::Display for NhsNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NhsNumber {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid NHS number: {s}"))
    }
}

impl AsRef<str> for NhsNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
