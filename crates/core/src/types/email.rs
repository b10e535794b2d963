//! Checkout email address.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Reasons a checkout email is rejected.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EmailError {
    /// Nothing was entered.
    #[error("email cannot be empty")]
    Empty,
    /// Longer than the RFC 5321 limit.
    #[error("email must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// No @ separating local part and domain.
    #[error("email must contain an @ symbol")]
    MissingAtSymbol,
    /// Nothing before the @.
    #[error("email local part cannot be empty")]
    EmptyLocalPart,
    /// Nothing after the @.
    #[error("email domain cannot be empty")]
    EmptyDomain,
    /// Spaces or other whitespace inside the address.
    #[error("email cannot contain whitespace")]
    ContainsWhitespace,
}

/// The address a payment receipt is sent to.
///
/// Validation is structural only: surrounding whitespace is trimmed, then
/// the address needs a local part and a domain around an @ and no inner
/// whitespace.
///
/// ```
/// use kinetic_core::Email;
///
/// assert!(Email::parse("buyer@example.ng").is_ok());
/// assert!(Email::parse(" buyer@example.ng ").is_ok());
/// assert!(Email::parse("buyer").is_err());
/// assert!(Email::parse("@example.ng").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Maximum length of an email address (RFC 5321).
    pub const MAX_LENGTH: usize = 254;

    /// Parse and validate an address.
    ///
    /// # Errors
    ///
    /// Returns an `EmailError` describing the first structural problem found.
    pub fn parse(input: &str) -> Result<Self, EmailError> {
        let s = input.trim();
        if s.is_empty() {
            return Err(EmailError::Empty);
        }
        if s.len() > Self::MAX_LENGTH {
            return Err(EmailError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }
        if s.chars().any(char::is_whitespace) {
            return Err(EmailError::ContainsWhitespace);
        }

        let (local, domain) = s.split_once('@').ok_or(EmailError::MissingAtSymbol)?;
        if local.is_empty() {
            return Err(EmailError::EmptyLocalPart);
        }
        if domain.is_empty() {
            return Err(EmailError::EmptyDomain);
        }

        Ok(Self(s.to_owned()))
    }

    /// The address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The part after the @.
    #[must_use]
    pub fn domain(&self) -> &str {
        self.0.split_once('@').map_or("", |(_, domain)| domain)
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Email {
    type Err = EmailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        assert!(Email::parse("buyer@example.ng").is_ok());
        assert!(Email::parse("first.last+bag@shop.example.co.uk").is_ok());
        assert!(Email::parse("a@b").is_ok());
    }

    #[test]
    fn test_parse_trims() {
        let email = Email::parse("  buyer@example.ng \n").unwrap();
        assert_eq!(email.as_str(), "buyer@example.ng");
        assert_eq!(email.domain(), "example.ng");
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(Email::parse("   "), Err(EmailError::Empty));
        assert_eq!(Email::parse("buyer"), Err(EmailError::MissingAtSymbol));
        assert_eq!(Email::parse("@example.ng"), Err(EmailError::EmptyLocalPart));
        assert_eq!(Email::parse("buyer@"), Err(EmailError::EmptyDomain));
        assert_eq!(
            Email::parse("buy er@example.ng"),
            Err(EmailError::ContainsWhitespace)
        );
        let long = format!("{}@example.ng", "a".repeat(250));
        assert_eq!(
            Email::parse(&long),
            Err(EmailError::TooLong {
                max: Email::MAX_LENGTH
            })
        );
    }

    #[test]
    fn test_display_and_from_str() {
        let email: Email = "buyer@example.ng".parse().unwrap();
        assert_eq!(email.to_string(), "buyer@example.ng");
    }
}
