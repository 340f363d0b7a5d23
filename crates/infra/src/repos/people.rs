use chrono::Utc;
use uuid::Uuid;

use super::{non_blank, non_negative};
use crate::db::Db;
use crate::error::{RepoError, RepoResult};
use crate::models::PersonRow;
use crate::pagination::LimitOffset;

#[derive(Debug, Clone)]
pub struct CreatePerson {
    pub name: String,
    pub age: Option<i32>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdatePerson {
    pub name: Option<String>,
    pub age: Option<i32>,
}

#[derive(Clone)]
pub struct PersonRepo {
    db: Db,
}

impl PersonRepo {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    pub fn get(&self, id: Uuid) -> Option<PersonRow> {
        self.db.read().people.get(id).cloned()
    }

    /// Rows for the ids that exist; unknown ids are skipped.
    pub fn get_many(&self, ids: &[Uuid]) -> Vec<PersonRow> {
        let tables = self.db.read();
        ids.iter()
            .filter_map(|id| tables.people.get(*id).cloned())
            .collect()
    }

    pub fn list(&self, page: LimitOffset) -> Vec<PersonRow> {
        page.apply(self.db.read().people.iter())
    }

    pub fn count(&self) -> usize {
        self.db.read().people.len()
    }

    pub fn create(&self, data: CreatePerson) -> RepoResult<PersonRow> {
        let name = non_blank("name", &data.name)?;
        let age = data.age.map(|a| non_negative("age", a)).transpose()?;

        let now = Utc::now();
        let row = PersonRow {
            id: Uuid::new_v4(),
            name,
            age,
            created_at: now,
            updated_at: now,
        };

        self.db.write().people.insert(row.clone());
        tracing::debug!(person_id = %row.id, "person created");
        Ok(row)
    }

    pub fn update(&self, id: Uuid, data: UpdatePerson) -> RepoResult<PersonRow> {
        let name = data.name.as_deref().map(|n| non_blank("name", n)).transpose()?;
        let age = data.age.map(|a| non_negative("age", a)).transpose()?;

        let mut tables = self.db.write();
        let row = tables
            .people
            .get_mut(id)
            .ok_or_else(|| RepoError::not_found("person", id))?;

        if let Some(name) = name {
            row.name = name;
        }
        if let Some(age) = age {
            row.age = Some(age);
        }
        row.updated_at = Utc::now();

        tracing::debug!(person_id = %id, "person updated");
        Ok(row.clone())
    }
}
