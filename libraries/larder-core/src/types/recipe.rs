/// Recipe domain type
use crate::types::{IdentityId, Price, RecipeId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Recipe record, owned by exactly one identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    /// Unique identifier
    pub id: RecipeId,

    /// Owning identity; deleting the owner deletes the recipe
    pub owner_id: IdentityId,

    /// Recipe title
    pub title: String,

    /// Optional free-form description
    pub description: Option<String>,

    /// Estimated preparation time in minutes
    pub time_minutes: i64,

    /// Estimated price
    pub price: Price,

    /// Optional external link
    pub link: Option<String>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Recipe {
    /// Create a new recipe
    pub fn new(
        owner_id: IdentityId,
        title: impl Into<String>,
        time_minutes: i64,
        price: Price,
    ) -> Self {
        Self {
            id: RecipeId::generate(),
            owner_id,
            title: title.into(),
            description: None,
            time_minutes,
            price,
            link: None,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recipe_creation() {
        let owner = IdentityId::generate();
        let recipe = Recipe::new(owner.clone(), "Shakshuka", 25, Price::parse("6.40").unwrap());

        assert_eq!(recipe.owner_id, owner);
        assert_eq!(recipe.title, "Shakshuka");
        assert!(recipe.description.is_none());
        assert!(recipe.created_at <= Utc::now());
    }
}
