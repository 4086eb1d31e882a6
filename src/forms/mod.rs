//! Form definitions backing the create/update operations.

use thiserror::Error;
use validator::ValidationErrors;

pub mod opportunity;
pub mod ticket;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("invalid client id")]
    InvalidClientId,

    #[error("invalid amount")]
    InvalidAmount,

    #[error("invalid probability")]
    InvalidProbability,

    #[error("invalid stage")]
    InvalidStage,

    #[error("invalid title")]
    InvalidTitle,

    #[error("invalid status")]
    InvalidStatus,

    #[error("invalid priority")]
    InvalidPriority,

    #[error("invalid category")]
    InvalidCategory,
}
