pub mod businesses;
pub mod people;
pub mod posts;

pub use businesses::{BusinessRepo, CreateBusiness};
pub use people::{CreatePerson, PersonRepo, UpdatePerson};
pub use posts::{CreatePost, PostRepo};

use crate::error::{RepoError, RepoResult};

/// Trim `value` and reject it when nothing is left.
pub(crate) fn non_blank(field: &'static str, value: &str) -> RepoResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(RepoError::validation(field, "must not be blank"));
    }
    Ok(trimmed.to_string())
}

pub(crate) fn non_negative(field: &'static str, value: i32) -> RepoResult<i32> {
    if value < 0 {
        return Err(RepoError::validation(
            field,
            format!("must not be negative (got {value})"),
        ));
    }
    Ok(value)
}
