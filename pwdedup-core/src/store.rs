//! RecordStore: latest row per account key, in first-insertion order.
//!
//! Rows live in a Vec; the map only points at slots. Replacing a row
//! rewrites its slot, so output order is fixed by when a key was first seen.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::key::AccountKey;
use crate::row::Row;

/// What [`RecordStore::offer`] did with a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Offer {
    Inserted,
    Replaced,
    Kept,
}

#[derive(Debug, Default, Clone)]
pub struct RecordStore {
    slots: HashMap<AccountKey, usize>,
    rows: Vec<Row>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn contains(&self, key: &AccountKey) -> bool {
        self.slots.contains_key(key)
    }

    pub fn get(&self, key: &AccountKey) -> Option<&Row> {
        self.slots.get(key).map(|&i| &self.rows[i])
    }

    /// Store `row` under `key`.
    ///
    /// An unseen key is inserted. For a known key, `replaces(incoming, stored)`
    /// decides whether the incoming row takes over the slot.
    pub fn offer<F>(&mut self, key: AccountKey, row: Row, replaces: F) -> Offer
    where
        F: FnOnce(&Row, &Row) -> bool,
    {
        match self.slots.entry(key) {
            Entry::Vacant(slot) => {
                slot.insert(self.rows.len());
                self.rows.push(row);
                Offer::Inserted
            }
            Entry::Occupied(slot) => {
                let stored = &mut self.rows[*slot.get()];
                if replaces(&row, stored) {
                    *stored = row;
                    Offer::Replaced
                } else {
                    Offer::Kept
                }
            }
        }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }
}
