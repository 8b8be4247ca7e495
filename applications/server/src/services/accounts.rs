/// Account factory - validated construction of identity records
///
/// The only path that creates identity rows. Creation is a single
/// validate -> normalize -> hash -> persist sequence; a failure at any point
/// leaves no partial state behind.
use larder_core::{Email, Identity, PasswordHash, Permissions};
use larder_storage::{identities, StorageError};
use sqlx::SqlitePool;
use thiserror::Error;

/// Minimum accepted password length, checked before hashing
pub const MIN_PASSWORD_LENGTH: usize = 5;

#[derive(Debug, Error)]
pub enum AccountError {
    #[error("Invalid email: {0}")]
    InvalidEmail(String),

    #[error("Password must be at least {0} characters")]
    PasswordTooShort(usize),

    #[error("Email already registered: {0}")]
    EmailTaken(String),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Password hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),
}

type Result<T> = std::result::Result<T, AccountError>;

/// Recognized optional fields for account creation.
///
/// An explicit structure rather than a free-form field map: anything not
/// listed here cannot be set at creation time.
#[derive(Debug, Clone, Default)]
pub struct AccountOverrides {
    pub name: Option<String>,
    pub is_staff: Option<bool>,
    pub is_superuser: Option<bool>,
}

/// Constructs identity records with correct defaults per privilege tier.
///
/// Holds only a storage handle; hashing happens here so no caller ever
/// passes plaintext further down.
#[derive(Clone)]
pub struct AccountFactory {
    pool: SqlitePool,
}

impl AccountFactory {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a regular account (`is_staff` and `is_superuser` default false)
    pub async fn create_user(
        &self,
        email: &str,
        password: &str,
        overrides: AccountOverrides,
    ) -> Result<Identity> {
        self.create(email, password, Permissions::member(), overrides)
            .await
    }

    /// Create a staff account (`is_staff` defaults true)
    pub async fn create_staff_user(
        &self,
        email: &str,
        password: &str,
        overrides: AccountOverrides,
    ) -> Result<Identity> {
        self.create(email, password, Permissions::staff(), overrides)
            .await
    }

    /// Create a superuser account (`is_staff` and `is_superuser` default true)
    pub async fn create_superuser(
        &self,
        email: &str,
        password: &str,
        overrides: AccountOverrides,
    ) -> Result<Identity> {
        self.create(email, password, Permissions::superuser(), overrides)
            .await
    }

    async fn create(
        &self,
        email: &str,
        password: &str,
        defaults: Permissions,
        overrides: AccountOverrides,
    ) -> Result<Identity> {
        let email =
            Email::parse(email).map_err(|e| AccountError::InvalidEmail(e.to_string()))?;

        if password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(AccountError::PasswordTooShort(MIN_PASSWORD_LENGTH));
        }

        let permissions = Permissions {
            is_active: true,
            is_staff: overrides.is_staff.unwrap_or(defaults.is_staff),
            is_superuser: overrides.is_superuser.unwrap_or(defaults.is_superuser),
        };

        let identity = Identity::new(email, overrides.name.unwrap_or_default(), permissions);
        let password_hash = PasswordHash::new(bcrypt::hash(password, bcrypt::DEFAULT_COST)?);

        identities::insert(&self.pool, &identity, &password_hash)
            .await
            .map_err(|e| match e {
                StorageError::Duplicate(_) => {
                    AccountError::EmailTaken(identity.email.to_string())
                }
                other => AccountError::Storage(other),
            })?;

        tracing::info!(identity = %identity.id, "account created");
        Ok(identity)
    }

    /// Check a login attempt against the stored credential.
    ///
    /// Returns `None` for unknown emails, wrong or blank passwords, and
    /// deactivated accounts; the caller cannot distinguish which.
    pub async fn verify_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<Identity>> {
        if password.is_empty() {
            return Ok(None);
        }

        let Ok(email) = Email::parse(email) else {
            return Ok(None);
        };

        let Some(identity) = identities::find_by_email(&self.pool, email.as_str()).await? else {
            return Ok(None);
        };

        if !identity.permissions.is_active {
            return Ok(None);
        }

        let Some(hash) = identities::get_password_hash(&self.pool, &identity.id).await? else {
            return Ok(None);
        };

        if bcrypt::verify(password, &hash)? {
            Ok(Some(identity))
        } else {
            Ok(None)
        }
    }
}
