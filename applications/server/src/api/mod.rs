/// API route modules
pub mod admin;
pub mod health;
pub mod ingredients;
pub mod recipes;
pub mod tags;
pub mod users;
