use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use record_store::StoreError;
use serde::Deserialize;
use validator::Validate;

use crate::db::domain::{MessagePrivacy, NewUser, User};
use crate::db::error::DbError;
use crate::db::users::UserTable;
use crate::session::SessionCell;
use crate::validation::{normalize_email, normalize_username, validate_username};

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 32), custom(function = "validate_username"))]
    pub username: String,
    #[validate(email, length(max = 255))]
    pub email: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Username already taken")]
    UsernameTaken,
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Password hash error")]
    PasswordHash,
    #[error("Session storage error: {0}")]
    Session(#[from] StoreError),
    #[error(transparent)]
    Db(DbError),
}

impl From<DbError> for AuthError {
    fn from(value: DbError) -> Self {
        match value {
            DbError::DuplicateUsername(_) => AuthError::UsernameTaken,
            other => AuthError::Db(other),
        }
    }
}

/// Hash password using Argon2
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify password against hash
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::PasswordHash)?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Local signup/login over the users table and the session cell. Domain
/// failures (duplicate username, bad credentials) come back as typed
/// `Err` variants; nothing here retries.
#[derive(Clone)]
pub struct AuthService {
    users: UserTable,
    session: SessionCell,
}

impl AuthService {
    pub fn new(users: UserTable, session: SessionCell) -> Self {
        Self { users, session }
    }

    pub async fn register(&self, req: RegisterRequest) -> Result<User, AuthError> {
        req.validate()
            .map_err(|e| AuthError::Validation(e.to_string()))?;

        let username = normalize_username(&req.username);
        let email = normalize_email(&req.email);
        let password_hash = hash_password(&req.password)?;

        let user = self
            .users
            .create(NewUser {
                email,
                username,
                password_hash: Some(password_hash),
                avatar_url: None,
                bio: None,
                message_privacy: MessagePrivacy::All,
            })
            .await?;

        self.session.save(&user).await?;
        tracing::info!(component = "auth", user = %user.username, "account registered");
        Ok(user)
    }

    /// Login by username, case-insensitive. Unknown user, a provisioned
    /// account without a credential, and a failed verify all collapse
    /// into `InvalidCredentials`.
    pub async fn login(&self, username: &str, password: &str) -> Result<User, AuthError> {
        let user = self
            .users
            .get_by_username(username.trim())
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let Some(hash) = user.password_hash.as_deref() else {
            return Err(AuthError::InvalidCredentials);
        };

        if !verify_password(password, hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        self.session.save(&user).await?;
        tracing::info!(component = "auth", user = %user.username, "login succeeded");
        Ok(user)
    }

    pub async fn logout(&self) -> Result<(), AuthError> {
        self.session.clear().await?;
        Ok(())
    }

    pub async fn current_user(&self) -> Result<Option<User>, AuthError> {
        Ok(self.session.load().await?)
    }
}
