use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

use crate::models::{BusinessRow, PersonRow, PostRow};

/// Rows that can be stored in a [`Table`].
pub trait Keyed {
    fn key(&self) -> Uuid;
}

impl Keyed for PersonRow {
    fn key(&self) -> Uuid {
        self.id
    }
}

impl Keyed for BusinessRow {
    fn key(&self) -> Uuid {
        self.id
    }
}

impl Keyed for PostRow {
    fn key(&self) -> Uuid {
        self.id
    }
}

/// Insertion-ordered rows. Order is what offset pagination relies on.
#[derive(Debug)]
pub struct Table<T> {
    rows: Vec<T>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self { rows: Vec::new() }
    }
}

impl<T: Keyed> Table<T> {
    pub fn get(&self, id: Uuid) -> Option<&T> {
        self.rows.iter().find(|row| row.key() == id)
    }

    pub fn get_mut(&mut self, id: Uuid) -> Option<&mut T> {
        self.rows.iter_mut().find(|row| row.key() == id)
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.get(id).is_some()
    }

    pub fn insert(&mut self, row: T) {
        self.rows.push(row);
    }

    pub fn remove(&mut self, id: Uuid) -> Option<T> {
        let idx = self.rows.iter().position(|row| row.key() == id)?;
        Some(self.rows.remove(idx))
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct Tables {
    pub people: Table<PersonRow>,
    pub businesses: Table<BusinessRow>,
    pub posts: Table<PostRow>,
}

/// Shared handle to the in-memory store. Cloning is cheap.
#[derive(Clone, Debug, Default)]
pub struct Db {
    inner: Arc<RwLock<Tables>>,
}

impl Db {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn read(&self) -> RwLockReadGuard<'_, Tables> {
        self.inner.read()
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, Tables> {
        self.inner.write()
    }
}
