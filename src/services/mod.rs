//! Service layer: pure pipeline/ticket utilities, mutations and the board engine.

use thiserror::Error;

use crate::repository::errors::RepositoryError;

pub mod board;
pub mod notify;
pub mod opportunity;
pub mod pipeline;
pub mod session;
pub mod tickets;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("you must be signed in to perform this action")]
    Unauthorized,

    #[error("record not found")]
    NotFound,

    #[error("form error: {0}")]
    Form(String),

    #[error("invalid value: {0}")]
    TypeConstraint(String),

    #[error(transparent)]
    Repository(RepositoryError),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound,
            other => ServiceError::Repository(other),
        }
    }
}

impl ServiceError {
    /// Text suitable for a user-facing notification.
    ///
    /// Store failures surface the store's own message when it has one;
    /// otherwise `fallback` is used.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ServiceError::Repository(err) => err
                .store_message()
                .map_or_else(|| fallback.to_string(), str::to_string),
            ServiceError::Internal(_) | ServiceError::NotFound => fallback.to_string(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_prefers_store_message() {
        let err = ServiceError::from(RepositoryError::ConstraintViolation(
            "value must be positive".to_string(),
        ));
        assert_eq!(err.user_message("Could not save"), "value must be positive");
    }

    #[test]
    fn user_message_falls_back_when_store_is_silent() {
        let err = ServiceError::from(RepositoryError::NotFound);
        assert_eq!(err.user_message("Could not save"), "Could not save");
        assert_eq!(
            ServiceError::Internal("join error".to_string()).user_message("Could not save"),
            "Could not save"
        );
    }

    #[test]
    fn missing_rows_become_not_found() {
        assert!(matches!(
            ServiceError::from(RepositoryError::NotFound),
            ServiceError::NotFound
        ));
        assert!(matches!(
            ServiceError::from(RepositoryError::ConnectionError("offline".to_string())),
            ServiceError::Repository(_)
        ));
    }

    #[test]
    fn user_message_explains_missing_session() {
        assert_eq!(
            ServiceError::Unauthorized.user_message("ignored"),
            "you must be signed in to perform this action"
        );
    }
}
