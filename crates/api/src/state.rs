use infra::db::Db;
use infra::repos::{BusinessRepo, PersonRepo, PostRepo};

use crate::gql::subscriptions::PostEvents;

#[derive(Clone)]
pub struct AppState {
    pub db: Db,
    /// Subscription channels for posts in `db`.
    pub events: PostEvents,
}

impl AppState {
    pub fn new(db: Db) -> Self {
        Self {
            db,
            events: PostEvents::default(),
        }
    }

    pub fn people(&self) -> PersonRepo {
        PersonRepo::new(self.db.clone())
    }

    pub fn businesses(&self) -> BusinessRepo {
        BusinessRepo::new(self.db.clone())
    }

    pub fn posts(&self) -> PostRepo {
        PostRepo::new(self.db.clone())
    }
}
