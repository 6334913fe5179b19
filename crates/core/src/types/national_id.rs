//! National identifier (natural business key) type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`NationalId`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum NationalIdError {
    /// The input string is empty after stripping separators.
    #[error("national id cannot be empty")]
    Empty,
    /// The input contains characters other than digits and separators.
    #[error("national id may only contain digits, got {found:?}")]
    InvalidCharacter {
        /// First offending character.
        found: char,
    },
}

/// A person's national identifier (CPF-style digit string).
///
/// This is the natural key every lookup uses instead of the generated row
/// ids. Separators (`.`, `-`, `/`, spaces) are stripped on parse; what is
/// stored and compared is the bare digit string.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct NationalId(String);

impl NationalId {
    /// Parse a `NationalId`, stripping common separator characters.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty or contains non-digit
    /// characters besides separators.
    pub fn parse(s: &str) -> Result<Self, NationalIdError> {
        let mut digits = String::with_capacity(s.len());

        for c in s.chars() {
            if c.is_ascii_digit() {
                digits.push(c);
            } else if !matches!(c, '.' | '-' | '/' | ' ') {
                return Err(NationalIdError::InvalidCharacter { found: c });
            }
        }

        if digits.is_empty() {
            return Err(NationalIdError::Empty);
        }

        Ok(Self(digits))
    }

    /// Returns the normalized digit string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `NationalId` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for NationalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_separators() {
        let id = NationalId::parse("123.456.789-00").expect("valid id");
        assert_eq!(id.as_str(), "12345678900");
    }

    #[test]
    fn rejects_empty_and_letters() {
        assert!(matches!(NationalId::parse(""), Err(NationalIdError::Empty)));
        assert!(matches!(
            NationalId::parse("..-"),
            Err(NationalIdError::Empty)
        ));
        assert!(matches!(
            NationalId::parse("12a45"),
            Err(NationalIdError::InvalidCharacter { found: 'a' })
        ));
    }
}
