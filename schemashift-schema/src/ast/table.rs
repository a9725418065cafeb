//! Table definitions for the schema AST.

use std::collections::BTreeSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::Column;

/// A table index. Indices are carried along but never diffed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Index {
    /// Index name.
    pub name: String,
    /// Indexed columns, in order.
    pub columns: Vec<String>,
    /// Whether the index is unique.
    #[serde(default)]
    pub unique: bool,
}

impl Index {
    /// Create a new non-unique index.
    pub fn new(name: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            name: name.into(),
            columns,
            unique: false,
        }
    }
}

/// A table definition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    /// Table name.
    pub name: String,
    /// Table comment.
    #[serde(default)]
    pub description: String,
    /// Group used for filtering and output partitioning.
    #[serde(default)]
    pub group: String,
    /// Class name used by code generators.
    #[serde(default)]
    pub class_name: String,
    /// Columns in declaration order.
    #[serde(default)]
    pub columns: Vec<Column>,
    /// Indices.
    #[serde(default)]
    pub indices: Vec<Index>,
}

impl Table {
    /// Create a new empty table.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Get the table name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the group.
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = group.into();
        self
    }

    /// Append a column.
    pub fn with_column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    /// Append an index.
    pub fn with_index(mut self, index: Index) -> Self {
        self.indices.push(index);
        self
    }

    /// Get a column by name. With duplicate names the last one wins.
    pub fn get_column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().rev().find(|c| c.name == name)
    }

    /// Index the columns by name. With duplicate names the last one wins,
    /// keeping the position of the first occurrence.
    pub fn column_map(&self) -> IndexMap<&str, &Column> {
        self.columns.iter().map(|c| (c.name.as_str(), c)).collect()
    }

    /// Names of the primary key columns.
    pub fn primary_key_names(&self) -> BTreeSet<&str> {
        self.columns
            .iter()
            .filter(|c| c.primary_key)
            .map(|c| c.name.as_str())
            .collect()
    }

    /// Names of the columns in the unique constraint.
    pub fn unique_key_names(&self) -> BTreeSet<&str> {
        self.columns
            .iter()
            .filter(|c| c.unique_key)
            .map(|c| c.name.as_str())
            .collect()
    }

    /// Primary key columns in declaration order.
    pub fn primary_key_columns(&self) -> Vec<&Column> {
        self.columns.iter().filter(|c| c.primary_key).collect()
    }

    /// Unique constraint columns in declaration order.
    pub fn unique_key_columns(&self) -> Vec<&Column> {
        self.columns.iter().filter(|c| c.unique_key).collect()
    }

    /// The column declared right before `name`.
    pub fn column_before(&self, name: &str) -> Option<&Column> {
        let pos = self.columns.iter().position(|c| c.name == name)?;
        pos.checked_sub(1).and_then(|i| self.columns.get(i))
    }

    /// The column declared right after `name`.
    pub fn column_after(&self, name: &str) -> Option<&Column> {
        let pos = self.columns.iter().position(|c| c.name == name)?;
        self.columns.get(pos + 1)
    }

    /// Structural equality of the column lists.
    ///
    /// Columns are compared pairwise in order. A column reference pointing at
    /// this table matches a reference pointing at `other` itself, so a
    /// renamed self-referencing table still compares equal.
    pub fn same_columns(&self, other: &Table) -> bool {
        self.columns.len() == other.columns.len()
            && self
                .columns
                .iter()
                .zip(&other.columns)
                .all(|(a, b)| a.same_structure(b, &self.name, &other.name))
    }
}
