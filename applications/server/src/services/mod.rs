/// Service layer
pub mod accounts;
pub mod auth;

pub use accounts::{AccountFactory, AccountOverrides};
pub use auth::AuthService;
