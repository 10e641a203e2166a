use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use super::{Database, StoreError};
use crate::domain::Id;

/// Trait that any row type must implement to live in a [`Table`].
pub trait Record: Clone + Send + Sync + 'static {
    /// Table name, used in log fields and error messages.
    const TABLE: &'static str;

    fn id(&self) -> Id;
    fn assign_id(&mut self, id: Id);

    /// Sets `updated_at`, and `created_at` as well when `inserting`.
    fn stamp(&mut self, now: DateTime<Utc>, inserting: bool);

    fn table(db: &Database) -> &Table<Self>;
    fn table_mut(db: &mut Database) -> &mut Table<Self>;

    // --- Lifecycle Hooks ---

    /// Column-level validation. Messages are human readable, one per problem.
    fn validate(&self) -> Vec<String> {
        Vec::new()
    }

    /// Checks outgoing references and uniqueness against the rest of the database.
    fn check_references(&self, _db: &Database) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Rows of one type keyed by id, with a monotonically increasing id sequence.
#[derive(Debug, Clone)]
pub struct Table<T> {
    rows: BTreeMap<Id, T>,
    next_id: Id,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl<T: Record> Table<T> {
    pub fn get(&self, id: Id) -> Option<&T> {
        self.rows.get(&id)
    }

    pub fn contains(&self, id: Id) -> bool {
        self.rows.contains_key(&id)
    }

    /// Rows in id order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.rows.values()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub(super) fn insert(&mut self, mut row: T) -> T {
        let id = self.next_id;
        self.next_id += 1;
        row.assign_id(id);
        self.rows.insert(id, row.clone());
        row
    }

    pub(super) fn replace(&mut self, row: T) -> T {
        self.rows.insert(row.id(), row.clone());
        row
    }

    pub(super) fn remove(&mut self, id: Id) -> Option<T> {
        self.rows.remove(&id)
    }
}
