use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepoError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: Uuid },

    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },
}

impl RepoError {
    pub fn not_found(entity: &'static str, id: Uuid) -> Self {
        RepoError::NotFound { entity, id }
    }

    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        RepoError::Validation {
            field,
            reason: reason.into(),
        }
    }
}

pub type RepoResult<T> = Result<T, RepoError>;
