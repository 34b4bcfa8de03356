use serde::Serialize;

use record_store::{BackendError, StoreError};

use crate::auth::AuthError;
use crate::db::error::DbError;

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AppErrorCode {
    Storage,
    Auth,
    Validation,
    NotFound,
    Network,
    Internal,
}

#[derive(Debug, Clone, Serialize)]
pub struct AppError {
    pub code: AppErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn new(code: AppErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
            trace_id: Some(crate::observability::trace_id().to_string()),
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(AppErrorCode::Storage, message)
    }

    pub fn auth(message: impl Into<String>) -> Self {
        Self::new(AppErrorCode::Auth, message)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(AppErrorCode::Validation, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(AppErrorCode::NotFound, message)
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(AppErrorCode::Network, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(AppErrorCode::Internal, message)
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AppError {}

impl From<BackendError> for AppError {
    fn from(value: BackendError) -> Self {
        AppError::storage("Key-value backend failure").with_details(value.to_string())
    }
}

impl From<StoreError> for AppError {
    fn from(value: StoreError) -> Self {
        AppError::storage("Record store failure").with_details(value.to_string())
    }
}

impl From<DbError> for AppError {
    fn from(value: DbError) -> Self {
        match value {
            DbError::NotFound(what) => AppError::not_found(format!("No such record: {what}")),
            DbError::DuplicateUsername(name) => {
                AppError::validation(format!("Username already taken: {name}"))
            }
            DbError::Bootstrap(detail) => {
                AppError::storage("Seed data initialization failed").with_details(detail)
            }
            DbError::Store(err) => err.into(),
        }
    }
}

impl From<AuthError> for AppError {
    fn from(value: AuthError) -> Self {
        match value {
            AuthError::InvalidCredentials | AuthError::UsernameTaken => {
                AppError::auth(value.to_string())
            }
            AuthError::Validation(detail) => {
                AppError::validation("Invalid signup input").with_details(detail)
            }
            AuthError::PasswordHash => AppError::internal("Password hashing failed"),
            AuthError::Session(err) => {
                AppError::storage("Session storage failure").with_details(err.to_string())
            }
            AuthError::Db(err) => err.into(),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        AppError::internal("Invalid JSON payload").with_details(value.to_string())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(value: reqwest::Error) -> Self {
        AppError::network("Network request failed").with_details(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_error_payload_shape() {
        let err = AppError::storage("Record store failure").with_details("disk full");
        let json = serde_json::to_value(err).expect("serialize app error");

        assert_eq!(json["code"], "storage");
        assert_eq!(json["message"], "Record store failure");
        assert_eq!(json["details"], "disk full");
        assert!(json.get("trace_id").is_some());
    }

    #[test]
    fn domain_errors_map_to_codes() {
        let err: AppError = DbError::NotFound("user u1".to_string()).into();
        assert!(matches!(err.code, AppErrorCode::NotFound));

        let err: AppError = DbError::DuplicateUsername("alice".to_string()).into();
        assert!(matches!(err.code, AppErrorCode::Validation));

        let err: AppError = crate::auth::AuthError::InvalidCredentials.into();
        assert!(matches!(err.code, AppErrorCode::Auth));
    }
}
