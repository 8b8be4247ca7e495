/// Tag domain type
use crate::types::{IdentityId, TagId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Named label for recipes, scoped to its owning identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Unique identifier
    pub id: TagId,

    /// Owning identity
    pub owner_id: IdentityId,

    /// Tag name, unique per owner
    pub name: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Tag {
    /// Create a new tag
    pub fn new(owner_id: IdentityId, name: impl Into<String>) -> Self {
        Self {
            id: TagId::generate(),
            owner_id,
            name: name.into(),
            created_at: Utc::now(),
        }
    }
}
