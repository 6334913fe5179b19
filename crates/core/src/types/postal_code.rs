//! Postal code (CEP) type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`PostalCode`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum PostalCodeError {
    /// The input string has no digits at all.
    #[error("postal code cannot be empty")]
    Empty,
    /// The input does not contain exactly eight digits.
    #[error("postal code must contain exactly 8 digits, got {got}")]
    WrongLength {
        /// Number of digits found in the input.
        got: usize,
    },
}

/// An 8-digit Brazilian postal code (CEP).
///
/// Parsing strips any punctuation, so `"01310-930"` and `"01310930"` produce
/// the same value. The normalized digit string is what gets stored and what
/// the lookup service receives.
///
/// ```
/// use carelink_core::PostalCode;
///
/// let code = PostalCode::parse("01310-930").expect("valid code");
/// assert_eq!(code.as_str(), "01310930");
/// assert_eq!(code.hyphenated(), "01310-930");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct PostalCode(String);

impl PostalCode {
    /// Number of digits in a CEP.
    pub const LENGTH: usize = 8;

    /// Parse a `PostalCode`, stripping any non-digit characters first.
    ///
    /// # Errors
    ///
    /// Returns an error if the input holds no digits or a digit count other
    /// than eight.
    pub fn parse(s: &str) -> Result<Self, PostalCodeError> {
        let digits: String = s.chars().filter(char::is_ascii_digit).collect();

        if digits.is_empty() {
            return Err(PostalCodeError::Empty);
        }

        if digits.len() != Self::LENGTH {
            return Err(PostalCodeError::WrongLength { got: digits.len() });
        }

        Ok(Self(digits))
    }

    /// Returns the normalized 8-digit string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the conventional `01310-930` display form.
    #[must_use]
    pub fn hyphenated(&self) -> String {
        let (prefix, suffix) = self.0.split_at(5);
        format!("{prefix}-{suffix}")
    }
}

impl fmt::Display for PostalCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.hyphenated())
    }
}
