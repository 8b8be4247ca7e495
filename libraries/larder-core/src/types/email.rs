/// Email address value object
use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A validated, normalized email address.
///
/// Normalization lowercases the domain portion (everything after the last
/// `@`) and leaves the local part untouched, so `Cook@Example.COM` and
/// `Cook@example.com` refer to the same account while `cook@example.com`
/// does not.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Parse and normalize a raw email address.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidInput` when the address is empty, has no
    /// `@`, or has an empty local part or domain.
    pub fn parse(raw: impl AsRef<str>) -> Result<Self> {
        let raw = raw.as_ref().trim();
        if raw.is_empty() {
            return Err(CoreError::invalid_input("email address must not be empty"));
        }

        let (local, domain) = raw
            .rsplit_once('@')
            .ok_or_else(|| CoreError::invalid_input(format!("not an email address: {raw}")))?;

        if local.is_empty() || domain.is_empty() {
            return Err(CoreError::invalid_input(format!(
                "not an email address: {raw}"
            )));
        }

        Ok(Self(format!("{}@{}", local, domain.to_lowercase())))
    }

    /// Wrap an already-normalized address loaded from storage.
    pub fn new_unchecked(normalized: impl Into<String>) -> Self {
        Self(normalized.into())
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_is_lowercased() {
        let email = Email::parse("Cook@Example.COM").unwrap();
        assert_eq!(email.as_str(), "Cook@example.com");
    }

    #[test]
    fn local_part_is_preserved() {
        let email = Email::parse("MixedCase@example.com").unwrap();
        assert_eq!(email.as_str(), "MixedCase@example.com");
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        let email = Email::parse("  cook@example.com  ").unwrap();
        assert_eq!(email.as_str(), "cook@example.com");
    }

    #[test]
    fn empty_address_is_rejected() {
        assert!(Email::parse("").is_err());
        assert!(Email::parse("   ").is_err());
    }

    #[test]
    fn malformed_addresses_are_rejected() {
        assert!(Email::parse("no-at-sign").is_err());
        assert!(Email::parse("@example.com").is_err());
        assert!(Email::parse("cook@").is_err());
    }

    #[test]
    fn normalization_uses_last_at_sign() {
        // quoted local parts may contain @; the domain is after the last one
        let email = Email::parse("a@b@Example.COM").unwrap();
        assert_eq!(email.as_str(), "a@b@example.com");
    }
}
