//! The closed set of atomic schema changes.
//!
//! [`Change`] is the contract between the comparator and every renderer.
//! Renderers match on it exhaustively, so adding a variant is a compile
//! error everywhere it is not handled yet.

use serde::{Deserialize, Serialize};

use schemashift_schema::{Column, Table};

/// A single atomic schema change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Change {
    /// Create a table.
    CreateTable {
        /// The new table.
        table: Table,
    },
    /// Drop a table.
    DropTable {
        /// The dropped table.
        table: Table,
    },
    /// Rename a table.
    RenameTable {
        /// The table before the rename.
        old_table: Table,
        /// The table after the rename.
        table: Table,
    },
    /// Replace the primary key.
    UpdatePrimaryKey {
        /// The table with the old key.
        old_table: Table,
        /// The table with the new key.
        table: Table,
    },
    /// Drop the named unique constraint.
    DropUniqueConstraint {
        /// Constraint name.
        name: String,
        /// The table owning the constraint.
        table: Table,
    },
    /// Create the named unique constraint over the table's unique columns.
    CreateUniqueConstraint {
        /// Constraint name.
        name: String,
        /// The table owning the constraint.
        table: Table,
    },
    /// Set the table comment to the table's description.
    SetTableComment {
        /// The table with the new description.
        table: Table,
    },
    /// Add a column.
    AddColumn {
        /// The table receiving the column.
        table: Table,
        /// The new column.
        column: Column,
        /// The column declared right after the new one, if any.
        before: Option<Column>,
        /// The column declared right before the new one, if any.
        after: Option<Column>,
    },
    /// Drop a column.
    DropColumn {
        /// The table losing the column.
        table: Table,
        /// Name of the dropped column.
        column_name: String,
    },
    /// Set the column comment to the column's description.
    SetColumnComment {
        /// The table owning the column.
        table: Table,
        /// The column with the new description.
        column: Column,
    },
    /// Change type, size or scale of a column.
    ChangeColumnType {
        /// The table owning the column.
        table: Table,
        /// The column before the change.
        old_column: Column,
        /// The column after the change.
        column: Column,
    },
    /// Rename a column.
    RenameColumn {
        /// The table owning the column.
        table: Table,
        /// The column before the rename.
        old_column: Column,
        /// The column after the rename.
        column: Column,
    },
    /// Add or remove a `NOT NULL` constraint.
    SetNotNullConstraint {
        /// The table owning the column.
        table: Table,
        /// The column carrying the new flag.
        column: Column,
    },
    /// Turn auto increment on or off.
    SetAutoIncrement {
        /// The table owning the column.
        table: Table,
        /// The column carrying the new flag.
        column: Column,
    },
    /// Set or drop a default value. An empty value means "dropped".
    SetDefaultValue {
        /// The table owning the column.
        table: Table,
        /// The column carrying the new value.
        column: Column,
    },
}

/// The kind of a [`Change`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    /// See [`Change::CreateTable`].
    CreateTable,
    /// See [`Change::DropTable`].
    DropTable,
    /// See [`Change::RenameTable`].
    RenameTable,
    /// See [`Change::UpdatePrimaryKey`].
    UpdatePrimaryKey,
    /// See [`Change::DropUniqueConstraint`].
    DropUniqueConstraint,
    /// See [`Change::CreateUniqueConstraint`].
    CreateUniqueConstraint,
    /// See [`Change::SetTableComment`].
    SetTableComment,
    /// See [`Change::AddColumn`].
    AddColumn,
    /// See [`Change::DropColumn`].
    DropColumn,
    /// See [`Change::SetColumnComment`].
    SetColumnComment,
    /// See [`Change::ChangeColumnType`].
    ChangeColumnType,
    /// See [`Change::RenameColumn`].
    RenameColumn,
    /// See [`Change::SetNotNullConstraint`].
    SetNotNullConstraint,
    /// See [`Change::SetAutoIncrement`].
    SetAutoIncrement,
    /// See [`Change::SetDefaultValue`].
    SetDefaultValue,
}

impl ChangeKind {
    /// All kinds, in taxonomy order.
    pub const ALL: [ChangeKind; 15] = [
        Self::CreateTable,
        Self::DropTable,
        Self::RenameTable,
        Self::UpdatePrimaryKey,
        Self::DropUniqueConstraint,
        Self::CreateUniqueConstraint,
        Self::SetTableComment,
        Self::AddColumn,
        Self::DropColumn,
        Self::SetColumnComment,
        Self::ChangeColumnType,
        Self::RenameColumn,
        Self::SetNotNullConstraint,
        Self::SetAutoIncrement,
        Self::SetDefaultValue,
    ];

    /// Stable snake_case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreateTable => "create_table",
            Self::DropTable => "drop_table",
            Self::RenameTable => "rename_table",
            Self::UpdatePrimaryKey => "update_primary_key",
            Self::DropUniqueConstraint => "drop_unique_constraint",
            Self::CreateUniqueConstraint => "create_unique_constraint",
            Self::SetTableComment => "set_table_comment",
            Self::AddColumn => "add_column",
            Self::DropColumn => "drop_column",
            Self::SetColumnComment => "set_column_comment",
            Self::ChangeColumnType => "change_column_type",
            Self::RenameColumn => "rename_column",
            Self::SetNotNullConstraint => "set_not_null_constraint",
            Self::SetAutoIncrement => "set_auto_increment",
            Self::SetDefaultValue => "set_default_value",
        }
    }
}

impl std::fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Primary key columns gained and lost by an [`Change::UpdatePrimaryKey`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyDelta<'a> {
    /// Key columns only in the new table.
    pub added: Vec<&'a str>,
    /// Key columns only in the old table.
    pub removed: Vec<&'a str>,
}

impl Change {
    /// Get the kind of this change.
    pub fn kind(&self) -> ChangeKind {
        match self {
            Self::CreateTable { .. } => ChangeKind::CreateTable,
            Self::DropTable { .. } => ChangeKind::DropTable,
            Self::RenameTable { .. } => ChangeKind::RenameTable,
            Self::UpdatePrimaryKey { .. } => ChangeKind::UpdatePrimaryKey,
            Self::DropUniqueConstraint { .. } => ChangeKind::DropUniqueConstraint,
            Self::CreateUniqueConstraint { .. } => ChangeKind::CreateUniqueConstraint,
            Self::SetTableComment { .. } => ChangeKind::SetTableComment,
            Self::AddColumn { .. } => ChangeKind::AddColumn,
            Self::DropColumn { .. } => ChangeKind::DropColumn,
            Self::SetColumnComment { .. } => ChangeKind::SetColumnComment,
            Self::ChangeColumnType { .. } => ChangeKind::ChangeColumnType,
            Self::RenameColumn { .. } => ChangeKind::RenameColumn,
            Self::SetNotNullConstraint { .. } => ChangeKind::SetNotNullConstraint,
            Self::SetAutoIncrement { .. } => ChangeKind::SetAutoIncrement,
            Self::SetDefaultValue { .. } => ChangeKind::SetDefaultValue,
        }
    }

    /// Get the table this change is scoped to.
    ///
    /// Renames and key updates report the new table.
    pub fn table(&self) -> &Table {
        match self {
            Self::CreateTable { table }
            | Self::DropTable { table }
            | Self::RenameTable { table, .. }
            | Self::UpdatePrimaryKey { table, .. }
            | Self::DropUniqueConstraint { table, .. }
            | Self::CreateUniqueConstraint { table, .. }
            | Self::SetTableComment { table }
            | Self::AddColumn { table, .. }
            | Self::DropColumn { table, .. }
            | Self::SetColumnComment { table, .. }
            | Self::ChangeColumnType { table, .. }
            | Self::RenameColumn { table, .. }
            | Self::SetNotNullConstraint { table, .. }
            | Self::SetAutoIncrement { table, .. }
            | Self::SetDefaultValue { table, .. } => table,
        }
    }

    /// Get the table name this change is scoped to.
    pub fn table_name(&self) -> &str {
        &self.table().name
    }

    /// Compute the primary key columns gained and lost, for key updates.
    pub fn primary_key_delta(&self) -> Option<KeyDelta<'_>> {
        let Self::UpdatePrimaryKey { old_table, table } = self else {
            return None;
        };

        let old_keys = old_table.primary_key_names();
        let new_keys = table.primary_key_names();

        Some(KeyDelta {
            added: new_keys.difference(&old_keys).copied().collect(),
            removed: old_keys.difference(&new_keys).copied().collect(),
        })
    }

    /// A one-line human readable summary.
    pub fn describe(&self) -> String {
        match self {
            Self::CreateTable { table } => {
                format!("Create table `{}` ({} columns)", table.name, table.columns.len())
            }
            Self::DropTable { table } => format!("Drop table `{}`", table.name),
            Self::RenameTable { old_table, table } => {
                format!("Rename table `{}` to `{}`", old_table.name, table.name)
            }
            Self::UpdatePrimaryKey { table, .. } => {
                let keys: Vec<_> = table.primary_key_names().into_iter().collect();
                format!("Set primary key of `{}` to ({})", table.name, keys.join(", "))
            }
            Self::DropUniqueConstraint { name, table } => {
                format!("Drop unique constraint `{}` on `{}`", name, table.name)
            }
            Self::CreateUniqueConstraint { name, table } => {
                let keys: Vec<_> = table.unique_key_columns().iter().map(|c| c.name.as_str()).collect();
                format!(
                    "Create unique constraint `{}` on `{}` ({})",
                    name,
                    table.name,
                    keys.join(", ")
                )
            }
            Self::SetTableComment { table } => {
                format!("Set comment of table `{}` to \"{}\"", table.name, table.description)
            }
            Self::AddColumn { table, column, .. } => {
                format!("Add column `{}.{}` {}", table.name, column.name, column.column_type)
            }
            Self::DropColumn { table, column_name } => {
                format!("Drop column `{}.{}`", table.name, column_name)
            }
            Self::SetColumnComment { table, column } => format!(
                "Set comment of column `{}.{}` to \"{}\"",
                table.name, column.name, column.description
            ),
            Self::ChangeColumnType {
                table,
                old_column,
                column,
            } => format!(
                "Change type of column `{}.{}` from {} to {}",
                table.name,
                column.name,
                type_label(old_column),
                type_label(column)
            ),
            Self::RenameColumn {
                table,
                old_column,
                column,
            } => format!(
                "Rename column `{}.{}` to `{}`",
                table.name, old_column.name, column.name
            ),
            Self::SetNotNullConstraint { table, column } => {
                let action = if column.not_null { "Add" } else { "Drop" };
                format!("{} NOT NULL on `{}.{}`", action, table.name, column.name)
            }
            Self::SetAutoIncrement { table, column } => {
                let action = if column.auto_incremental { "Enable" } else { "Disable" };
                format!("{} auto increment on `{}.{}`", action, table.name, column.name)
            }
            Self::SetDefaultValue { table, column } => {
                if column.has_default() {
                    format!(
                        "Set default of `{}.{}` to {}",
                        table.name, column.name, column.default_value
                    )
                } else {
                    format!("Drop default of `{}.{}`", table.name, column.name)
                }
            }
        }
    }
}

/// Type with size and scale, e.g. `decimal(10,2)`.
pub(crate) fn type_label(column: &Column) -> String {
    match (column.size, column.scale) {
        (0, _) => column.column_type.to_string(),
        (size, 0) => format!("{}({})", column.column_type, size),
        (size, scale) => format!("{}({},{})", column.column_type, size, scale),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schemashift_schema::ColumnType;

    fn user() -> Table {
        Table::new("user")
            .with_column(Column::new("id", ColumnType::Int64).primary_key())
            .with_column(Column::new("email", ColumnType::Varchar).with_size(128).unique())
    }

    #[test]
    fn test_kind_names_are_unique() {
        let names: std::collections::HashSet<_> = ChangeKind::ALL.iter().map(|k| k.as_str()).collect();
        assert_eq!(names.len(), 15);
    }

    #[test]
    fn test_table_scope() {
        let mut member = user();
        member.name = "member".to_string();

        let change = Change::RenameTable {
            old_table: user(),
            table: member,
        };
        assert_eq!(change.kind(), ChangeKind::RenameTable);
        assert_eq!(change.table_name(), "member");

        let change = Change::DropColumn {
            table: user(),
            column_name: "email".to_string(),
        };
        assert_eq!(change.table_name(), "user");
    }

    #[test]
    fn test_primary_key_delta() {
        let old_table = user();
        let mut table = user();
        table.columns[0].primary_key = false;
        table.columns[1].primary_key = true;

        let change = Change::UpdatePrimaryKey { old_table, table };
        let delta = change.primary_key_delta().unwrap();
        assert_eq!(delta.added, vec!["email"]);
        assert_eq!(delta.removed, vec!["id"]);

        assert!(Change::DropTable { table: user() }.primary_key_delta().is_none());
    }

    #[test]
    fn test_describe() {
        let change = Change::CreateUniqueConstraint {
            name: "user_uq".to_string(),
            table: user(),
        };
        assert_eq!(change.describe(), "Create unique constraint `user_uq` on `user` (email)");

        let old_column = Column::new("price", ColumnType::Decimal).with_size(10).with_scale(2);
        let column = Column::new("price", ColumnType::Decimal).with_size(12).with_scale(4);
        let change = Change::ChangeColumnType {
            table: user(),
            old_column,
            column,
        };
        assert_eq!(
            change.describe(),
            "Change type of column `user.price` from decimal(10,2) to decimal(12,4)"
        );

        let change = Change::SetDefaultValue {
            table: user(),
            column: Column::new("email", ColumnType::Varchar),
        };
        assert_eq!(change.describe(), "Drop default of `user.email`");
    }

    #[test]
    fn test_serialize_tagged() {
        let change = Change::DropColumn {
            table: Table::new("user"),
            column_name: "email".to_string(),
        };
        let json = serde_json::to_value(&change).unwrap();
        assert_eq!(json["kind"], "drop_column");
        assert_eq!(json["column_name"], "email");
    }
}
