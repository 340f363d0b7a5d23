use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::non_blank;
use crate::db::Db;
use crate::error::{RepoError, RepoResult};
use crate::models::PostRow;
use crate::pagination::LimitOffset;

#[derive(Debug, Clone)]
pub struct CreatePost {
    pub author_id: Uuid,
    pub title: String,
    pub body: String,
    pub published_at: Option<DateTime<Utc>>,
}

#[derive(Clone)]
pub struct PostRepo {
    db: Db,
}

impl PostRepo {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    pub fn get(&self, id: Uuid) -> Option<PostRow> {
        self.db.read().posts.get(id).cloned()
    }

    pub fn list(&self, page: LimitOffset) -> Vec<PostRow> {
        page.apply(self.db.read().posts.iter())
    }

    pub fn count(&self) -> usize {
        self.db.read().posts.len()
    }

    /// Offset of the post within [`PostRepo::list`] ordering.
    pub fn position(&self, id: Uuid) -> Option<usize> {
        self.db.read().posts.iter().position(|p| p.id == id)
    }

    pub fn list_by_author(&self, author_id: Uuid, page: LimitOffset) -> Vec<PostRow> {
        let tables = self.db.read();
        page.apply(tables.posts.iter().filter(|p| p.author_id == author_id))
    }

    pub fn count_by_author(&self, author_id: Uuid) -> usize {
        self.db
            .read()
            .posts
            .iter()
            .filter(|p| p.author_id == author_id)
            .count()
    }

    pub fn create(&self, data: CreatePost) -> RepoResult<PostRow> {
        let title = non_blank("title", &data.title)?;

        let mut tables = self.db.write();
        if !tables.people.contains(data.author_id) {
            return Err(RepoError::not_found("person", data.author_id));
        }

        let row = PostRow {
            id: Uuid::new_v4(),
            author_id: data.author_id,
            title,
            body: data.body,
            published_at: data.published_at,
            created_at: Utc::now(),
        };
        tables.posts.insert(row.clone());

        tracing::debug!(post_id = %row.id, author_id = %row.author_id, "post created");
        Ok(row)
    }

    pub fn publish(&self, id: Uuid, at: DateTime<Utc>) -> RepoResult<PostRow> {
        let mut tables = self.db.write();
        let row = tables
            .posts
            .get_mut(id)
            .ok_or_else(|| RepoError::not_found("post", id))?;
        row.published_at = Some(at);

        tracing::debug!(post_id = %id, published_at = %at, "post published");
        Ok(row.clone())
    }

    pub fn delete(&self, id: Uuid) -> RepoResult<PostRow> {
        let removed = self
            .db
            .write()
            .posts
            .remove(id)
            .ok_or_else(|| RepoError::not_found("post", id))?;

        tracing::debug!(post_id = %id, "post deleted");
        Ok(removed)
    }
}
