/// Ingredient domain type
use crate::types::{IdentityId, IngredientId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Named ingredient, scoped to its owning identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Unique identifier
    pub id: IngredientId,

    /// Owning identity
    pub owner_id: IdentityId,

    /// Ingredient name, unique per owner
    pub name: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Ingredient {
    /// Create a new ingredient
    pub fn new(owner_id: IdentityId, name: impl Into<String>) -> Self {
        Self {
            id: IngredientId::generate(),
            owner_id,
            name: name.into(),
            created_at: Utc::now(),
        }
    }
}
