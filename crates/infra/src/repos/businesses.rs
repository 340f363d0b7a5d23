use chrono::Utc;
use uuid::Uuid;

use super::{non_blank, non_negative};
use crate::db::Db;
use crate::error::RepoResult;
use crate::models::BusinessRow;
use crate::pagination::LimitOffset;

#[derive(Debug, Clone)]
pub struct CreateBusiness {
    pub name: String,
    pub employee_count: i32,
}

#[derive(Clone)]
pub struct BusinessRepo {
    db: Db,
}

impl BusinessRepo {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    pub fn get(&self, id: Uuid) -> Option<BusinessRow> {
        self.db.read().businesses.get(id).cloned()
    }

    pub fn list(&self, page: LimitOffset) -> Vec<BusinessRow> {
        page.apply(self.db.read().businesses.iter())
    }

    pub fn count(&self) -> usize {
        self.db.read().businesses.len()
    }

    pub fn create(&self, data: CreateBusiness) -> RepoResult<BusinessRow> {
        let row = BusinessRow {
            id: Uuid::new_v4(),
            name: non_blank("name", &data.name)?,
            employee_count: non_negative("employee_count", data.employee_count)?,
            created_at: Utc::now(),
        };

        self.db.write().businesses.insert(row.clone());
        tracing::debug!(business_id = %row.id, "business created");
        Ok(row)
    }
}
