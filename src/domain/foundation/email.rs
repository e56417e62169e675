//! Email address value object.
//!
//! Addresses are normalized (trimmed, lowercased) before validation so two
//! spellings of the same mailbox compare equal.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// Validated, normalized email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Creates an email address, normalizing and validating the input.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::empty_field("email"));
        }

        let normalized = Self::normalize(&value);
        if !Self::is_valid(&normalized) {
            return Err(ValidationError::invalid_format(
                "email",
                format!("Invalid email format: {}", value),
            ));
        }

        Ok(Self(normalized))
    }

    /// Normalizes an address: trims whitespace and lowercases.
    pub fn normalize(value: &str) -> String {
        value.trim().to_lowercase()
    }

    /// Checks whether a string is a structurally valid address.
    ///
    /// Accepts `local@domain.tld` where the local part uses
    /// `[A-Za-z0-9._%+-]`, the domain uses `[A-Za-z0-9.-]`, and the final
    /// label is alphabetic with at least two characters.
    pub fn is_valid(value: &str) -> bool {
        let Some((local, domain)) = value.split_once('@') else {
            return false;
        };
        if local.is_empty() || domain.is_empty() || domain.contains('@') {
            return false;
        }
        if !local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '%' | '+' | '-'))
        {
            return false;
        }
        if !domain
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-'))
        {
            return false;
        }
        let Some((_, tld)) = domain.rsplit_once('.') else {
            return false;
        };
        tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic())
    }

    /// Returns the full normalized address.
    pub fn value(&self) -> &str {
        &self.0
    }

    /// Returns the part before the `@`.
    pub fn local_part(&self) -> &str {
        self.0.split('@').next().unwrap_or("")
    }

    /// Returns the part after the `@`.
    pub fn domain(&self) -> &str {
        self.0.split('@').nth(1).unwrap_or("")
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_standard_address() {
        let email = EmailAddress::new("alice@example.com").unwrap();
        assert_eq!(email.value(), "alice@example.com");
    }

    #[test]
    fn normalizes_case_and_whitespace() {
        let email = EmailAddress::new("  Alice.Smith@Example.COM ").unwrap();
        assert_eq!(email.value(), "alice.smith@example.com");
    }

    #[test]
    fn normalized_addresses_compare_equal() {
        let a = EmailAddress::new("bob@example.com").unwrap();
        let b = EmailAddress::new("BOB@EXAMPLE.COM").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn accepts_plus_and_percent_in_local_part() {
        assert!(EmailAddress::new("user+tag@example.com").is_ok());
        assert!(EmailAddress::new("user%x@example.com").is_ok());
    }

    #[test]
    fn rejects_empty_input() {
        assert!(EmailAddress::new("").is_err());
        assert!(EmailAddress::new("   ").is_err());
    }

    #[test]
    fn rejects_missing_at_sign() {
        assert!(EmailAddress::new("alice.example.com").is_err());
    }

    #[test]
    fn rejects_missing_tld() {
        assert!(EmailAddress::new("alice@example").is_err());
    }

    #[test]
    fn rejects_numeric_tld() {
        assert!(EmailAddress::new("alice@example.c0m").is_err());
    }

    #[test]
    fn rejects_single_char_tld() {
        assert!(EmailAddress::new("alice@example.c").is_err());
    }

    #[test]
    fn rejects_spaces_inside_address() {
        assert!(EmailAddress::new("ali ce@example.com").is_err());
    }

    #[test]
    fn rejects_double_at_sign() {
        assert!(EmailAddress::new("alice@@example.com").is_err());
        assert!(EmailAddress::new("alice@ex@ample.com").is_err());
    }

    #[test]
    fn splits_local_part_and_domain() {
        let email = EmailAddress::new("carol@mail.example.org").unwrap();
        assert_eq!(email.local_part(), "carol");
        assert_eq!(email.domain(), "mail.example.org");
    }

    #[test]
    fn is_valid_rejects_empty_parts() {
        assert!(!EmailAddress::is_valid("@example.com"));
        assert!(!EmailAddress::is_valid("alice@"));
    }
}
