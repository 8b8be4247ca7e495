/// Identity (user account) domain types
use crate::types::{Email, IdentityId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Independent status and privilege flags for an identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permissions {
    /// Whether the account may authenticate at all
    pub is_active: bool,

    /// Whether the account may use the administrative surface
    pub is_staff: bool,

    /// Whether the account holds every privilege
    pub is_superuser: bool,
}

impl Permissions {
    /// Flags for a regular account
    pub fn member() -> Self {
        Self {
            is_active: true,
            is_staff: false,
            is_superuser: false,
        }
    }

    /// Flags for a staff account
    pub fn staff() -> Self {
        Self {
            is_staff: true,
            ..Self::member()
        }
    }

    /// Flags for a superuser account
    pub fn superuser() -> Self {
        Self {
            is_staff: true,
            is_superuser: true,
            ..Self::member()
        }
    }
}

impl Default for Permissions {
    fn default() -> Self {
        Self::member()
    }
}

/// An already-hashed password credential.
///
/// The wrapper exists so plaintext can never be persisted by accident: the
/// only way to construct one outside of storage loading is from a hash, and
/// the inner value is redacted from `Debug` output and never serialized.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap an already-computed hash
    pub fn new(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    /// Get the stored hash string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(..)")
    }
}

/// User account, keyed by normalized email.
///
/// The credential is not a field here: serializable representations of an
/// identity must never carry password material, so the hash travels through
/// storage separately as a [`PasswordHash`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Unique identifier
    pub id: IdentityId,

    /// Normalized, unique email address used as the login name
    pub email: Email,

    /// Display name
    pub name: String,

    /// Status and privilege flags
    #[serde(flatten)]
    pub permissions: Permissions,

    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Identity {
    /// Create a new identity
    pub fn new(email: Email, name: impl Into<String>, permissions: Permissions) -> Self {
        Self {
            id: IdentityId::generate(),
            email,
            name: name.into(),
            permissions,
            created_at: Utc::now(),
        }
    }

    /// Create an identity with a specific ID (for database loading)
    pub fn with_id(
        id: IdentityId,
        email: Email,
        name: impl Into<String>,
        permissions: Permissions,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            email,
            name: name.into(),
            permissions,
            created_at,
        }
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.email)
    }
}
