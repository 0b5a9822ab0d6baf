//! Row model: one decoded CSV record, kept as ordered (column, value) pairs.

use serde::{Deserialize, Serialize};

pub const USERNAME: &str = "username";
pub const URL: &str = "url";
pub const NAME: &str = "name";
pub const PASSWORD: &str = "password";
pub const MODIFY_TIME: &str = "modifyTime";
pub const CREATE_TIME: &str = "createTime";

/// A single export record.
///
/// Column order is preserved so unknown columns pass through untouched.
/// A column that was never set is *absent*, which is different from a
/// column holding an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    fields: Vec<(String, String)>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(n: usize) -> Self {
        Self {
            fields: Vec::with_capacity(n),
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
    }

    /// Set a column. An existing column keeps its position.
    pub fn set(&mut self, column: impl Into<String>, value: impl Into<String>) {
        let column = column.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(name, _)| *name == column) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((column, value)),
        }
    }

    pub fn with(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(column, value);
        self
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn username(&self) -> Option<&str> {
        self.get(USERNAME)
    }

    pub fn password(&self) -> Option<&str> {
        self.get(PASSWORD)
    }

    pub fn modify_time(&self) -> Option<&str> {
        self.get(MODIFY_TIME)
    }

    pub fn create_time(&self) -> Option<&str> {
        self.get(CREATE_TIME)
    }

    /// Site identifier: `url`, falling back to `name` only when `url` is absent.
    pub fn site(&self) -> Option<&str> {
        self.get(URL).or_else(|| self.get(NAME))
    }
}

impl<K, V> FromIterator<(K, V)> for Row
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = Row::new();
        for (k, v) in iter {
            row.set(k, v);
        }
        row
    }
}
