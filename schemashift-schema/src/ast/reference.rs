//! Soft foreign-key references between tables.

use serde::{Deserialize, Serialize};

/// The cardinality of a reference between two tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Relationship {
    /// Many rows of this table point at one row of the referenced table.
    #[default]
    ManyToOne,
    /// One row of this table is pointed at by many rows of the referenced table.
    OneToMany,
    /// One-to-one reference.
    OneToOne,
}

impl Relationship {
    /// Check if this is a "to-one" reference.
    pub fn is_to_one(&self) -> bool {
        matches!(self, Self::OneToOne | Self::ManyToOne)
    }

    /// Check if this is a "to-many" reference.
    pub fn is_to_many(&self) -> bool {
        matches!(self, Self::OneToMany)
    }
}

impl std::fmt::Display for Relationship {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OneToOne => write!(f, "1:1"),
            Self::OneToMany => write!(f, "1:n"),
            Self::ManyToOne => write!(f, "n:1"),
        }
    }
}

/// A descriptive reference from a column to a column of another table.
///
/// References are never turned into enforced foreign keys; they are copied
/// forward as metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Reference {
    /// The referenced table.
    pub table: String,
    /// The referenced column.
    pub column: String,
    /// Cardinality of the reference.
    #[serde(default)]
    pub relationship: Relationship,
}

impl Reference {
    /// Create a new many-to-one reference.
    pub fn new(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            column: column.into(),
            relationship: Relationship::ManyToOne,
        }
    }

    /// Set the relationship.
    pub fn with_relationship(mut self, relationship: Relationship) -> Self {
        self.relationship = relationship;
        self
    }

    /// Check if this reference points back at the given table.
    pub fn is_self_reference(&self, table: &str) -> bool {
        self.table == table
    }
}
