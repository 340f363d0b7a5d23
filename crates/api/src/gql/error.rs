use infra::RepoError;

use super::global_id::GlobalIdError;

/// Unified error type for GraphQL resolvers.
///
/// async-graphql has a blanket `impl<T: Display + Send + Sync + 'static> From<T> for Error`,
/// so any type implementing `Display` auto-converts via `?`.
///
/// This enum gives us:
///   - `From<RepoError>`: not-found and validation failures, shown as-is
///   - `From<GlobalIdError>`: malformed or mistyped global IDs
///   - `GqlError::new("…")`: custom one-off messages
#[derive(Debug)]
pub enum GqlError {
    Repo(RepoError),
    GlobalId(GlobalIdError),
    Custom(String),
}

impl GqlError {
    pub fn new(msg: impl Into<String>) -> Self {
        GqlError::Custom(msg.into())
    }
}

impl std::fmt::Display for GqlError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GqlError::Repo(RepoError::NotFound { entity, .. }) => {
                write!(f, "{} not found", capitalize(entity))
            }
            GqlError::Repo(e) => write!(f, "{e}"),
            GqlError::GlobalId(e) => {
                tracing::warn!("rejected global ID: {e}");
                write!(f, "{e}")
            }
            GqlError::Custom(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for GqlError {}

impl From<RepoError> for GqlError {
    fn from(e: RepoError) -> Self {
        GqlError::Repo(e)
    }
}

impl From<GlobalIdError> for GqlError {
    fn from(e: GlobalIdError) -> Self {
        GqlError::GlobalId(e)
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn not_found_hides_the_uuid() {
        let err = GqlError::from(RepoError::not_found("post", Uuid::nil()));
        assert_eq!(err.to_string(), "Post not found");
    }

    #[test]
    fn validation_is_shown_verbatim() {
        let err = GqlError::from(RepoError::validation("title", "must not be blank"));
        assert_eq!(err.to_string(), "invalid title: must not be blank");
    }
}
