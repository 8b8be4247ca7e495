//! Domain types for Larder entities

mod email;
mod identity;
mod ids;
mod ingredient;
mod price;
mod recipe;
mod tag;

pub use email::Email;
pub use identity::{Identity, PasswordHash, Permissions};
pub use ids::{IdentityId, IngredientId, RecipeId, TagId};
pub use ingredient::Ingredient;
pub use price::Price;
pub use recipe::Recipe;
pub use tag::Tag;
