//! Changesets and comparison results.

use serde::{Deserialize, Serialize};

use schemashift_schema::Schema;

use crate::change::{Change, ChangeKind};

/// An ordered bundle of changes sharing one version id.
///
/// A changeset always holds at least one change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeSet {
    /// Version id, `major` or `major-minor`.
    pub id: String,
    /// Author recorded on the changeset.
    pub author: String,
    /// Changes, in application order.
    pub changes: Vec<Change>,
}

impl ChangeSet {
    /// Create a changeset holding a single change.
    pub fn new(id: impl Into<String>, author: impl Into<String>, change: Change) -> Self {
        Self {
            id: id.into(),
            author: author.into(),
            changes: vec![change],
        }
    }

    /// Create a changeset from a batch of changes, or `None` if the batch is empty.
    pub fn from_changes(
        id: impl Into<String>,
        author: impl Into<String>,
        changes: Vec<Change>,
    ) -> Option<Self> {
        if changes.is_empty() {
            return None;
        }
        Some(Self {
            id: id.into(),
            author: author.into(),
            changes,
        })
    }

    /// The major part of the id.
    pub fn major(&self) -> &str {
        self.id.split('-').next().unwrap_or(&self.id)
    }

    /// The table the first change is scoped to.
    pub fn table_name(&self) -> &str {
        self.changes.first().map(Change::table_name).unwrap_or_default()
    }
}

/// The outcome of comparing two schemas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffResult {
    /// The source schema.
    pub from: Schema,
    /// The target schema.
    pub to: Schema,
    /// Changesets in application order.
    pub change_sets: Vec<ChangeSet>,
}

impl DiffResult {
    /// Check if there are any differences.
    pub fn is_empty(&self) -> bool {
        self.change_sets.is_empty()
    }

    /// Total number of changes across all changesets.
    pub fn change_count(&self) -> usize {
        self.change_sets.iter().map(|cs| cs.changes.len()).sum()
    }

    /// Iterate over every change in order.
    pub fn changes(&self) -> impl Iterator<Item = &Change> {
        self.change_sets.iter().flat_map(|cs| cs.changes.iter())
    }

    /// Count the changes of one kind.
    pub fn count_of(&self, kind: ChangeKind) -> usize {
        self.changes().filter(|c| c.kind() == kind).count()
    }

    /// Get a human-readable summary of the diff.
    pub fn summary(&self) -> String {
        let labels = [
            (ChangeKind::CreateTable, "Create", "tables"),
            (ChangeKind::DropTable, "Drop", "tables"),
            (ChangeKind::RenameTable, "Rename", "tables"),
            (ChangeKind::AddColumn, "Add", "columns"),
            (ChangeKind::DropColumn, "Drop", "columns"),
            (ChangeKind::RenameColumn, "Rename", "columns"),
            (ChangeKind::ChangeColumnType, "Retype", "columns"),
        ];

        let mut parts = Vec::new();
        for (kind, verb, noun) in labels {
            let n = self.count_of(kind);
            if n > 0 {
                parts.push(format!("{} {} {}", verb, n, noun));
            }
        }

        let other = self.change_count()
            - labels.iter().map(|(kind, _, _)| self.count_of(*kind)).sum::<usize>();
        if other > 0 {
            parts.push(format!("{} other changes", other));
        }

        if parts.is_empty() {
            "No changes".to_string()
        } else {
            parts.join(", ")
        }
    }
}
