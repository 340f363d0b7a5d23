use async_graphql::dataloader::Loader;
use infra::{db::Db, models::PersonRow, repos::PersonRepo};
use std::{collections::HashMap, convert::Infallible, future::Future};
use uuid::Uuid;

// PersonLoader - batch load authors by ID
#[derive(Clone)]
pub struct PersonLoader {
    repo: PersonRepo,
}

impl PersonLoader {
    pub fn new(db: Db) -> Self {
        Self {
            repo: PersonRepo::new(db),
        }
    }
}

impl Loader<Uuid> for PersonLoader {
    type Value = PersonRow;
    type Error = Infallible;

    fn load(
        &self,
        keys: &[Uuid],
    ) -> impl Future<Output = std::result::Result<HashMap<Uuid, Self::Value>, Self::Error>> + Send
    {
        let rows = if keys.is_empty() {
            Vec::new()
        } else {
            self.repo.get_many(keys)
        };
        tracing::debug!(requested = keys.len(), found = rows.len(), "batched person load");

        async move { Ok(rows.into_iter().map(|r| (r.id, r)).collect()) }
    }
}
