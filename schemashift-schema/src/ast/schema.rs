//! Top-level schema definition.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::Table;

/// A complete schema snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    /// Author recorded on generated changesets.
    #[serde(default)]
    pub author: String,
    /// Schema name.
    #[serde(default)]
    pub name: String,
    /// Schema version label.
    #[serde(default)]
    pub version: String,
    /// Tables in declaration order.
    #[serde(default)]
    pub tables: Vec<Table>,
}

impl Schema {
    /// Create a new empty schema.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the author.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    /// Set the version label.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Append a table.
    pub fn with_table(mut self, table: Table) -> Self {
        self.tables.push(table);
        self
    }

    /// Add a table.
    pub fn add_table(&mut self, table: Table) {
        self.tables.push(table);
    }

    /// Get a table by name. With duplicate names the last one wins.
    pub fn get_table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().rev().find(|t| t.name == name)
    }

    /// Index the tables by name. With duplicate names the last one wins,
    /// keeping the position of the first occurrence.
    pub fn table_map(&self) -> IndexMap<&str, &Table> {
        self.tables.iter().map(|t| (t.name.as_str(), t)).collect()
    }

    /// Get all table names in declaration order.
    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.tables.iter().map(|t| t.name.as_str())
    }

    /// Get the tables of a group.
    pub fn tables_in_group<'a>(&'a self, group: &'a str) -> impl Iterator<Item = &'a Table> {
        self.tables.iter().filter(move |t| t.group == group)
    }
}
