//! Larder Core
//!
//! Domain types, value objects, and error handling for the Larder recipe
//! catalogue.
//!
//! This crate defines:
//! - **Value Objects**: `Email`, `Permissions`, `PasswordHash`, `Price`, and
//!   the ID newtypes
//! - **Entities**: `Identity`, `Recipe`, `Tag`, `Ingredient`
//! - **Error Handling**: Unified `CoreError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use larder_core::{Email, Identity, Permissions, Recipe, Price};
//!
//! let email = Email::parse("Cook@Example.COM").unwrap();
//! assert_eq!(email.as_str(), "Cook@example.com");
//!
//! let identity = Identity::new(email, "Cook", Permissions::member());
//! let recipe = Recipe::new(
//!     identity.id.clone(),
//!     "Shakshuka",
//!     25,
//!     Price::parse("6.40").unwrap(),
//! );
//! assert_eq!(recipe.owner_id, identity.id);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod types;

// Re-export commonly used types
pub use error::{CoreError, Result};

pub use types::{
    Email, Identity, IdentityId, Ingredient, IngredientId, PasswordHash, Permissions, Price,
    Recipe, RecipeId, Tag, TagId,
};
