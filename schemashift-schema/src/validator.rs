//! Structural checks for loaded schemas.
//!
//! The comparator assumes well-formed input and never runs these checks on
//! its own. They exist for callers that want to reject a malformed snapshot
//! before comparing:
//! - No duplicate table names
//! - No duplicate column names within a table
//! - Every table has at least one column
//! - Column references point at existing tables and columns

use std::collections::HashSet;

use crate::ast::{Schema, Table};
use crate::error::{SchemaError, SchemaResult};

/// Schema validator collecting every issue it finds.
#[derive(Debug, Default)]
pub struct Validator {
    /// Collected validation errors.
    errors: Vec<SchemaError>,
}

impl Validator {
    /// Create a new validator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check a schema and return all issues found.
    pub fn check(&mut self, schema: &Schema) -> Vec<SchemaError> {
        self.errors.clear();

        self.check_duplicate_tables(schema);
        for table in &schema.tables {
            self.check_table(table, schema);
        }

        std::mem::take(&mut self.errors)
    }

    /// Check a schema, failing if any issue is found.
    pub fn validate(&mut self, schema: &Schema) -> SchemaResult<()> {
        let errors = self.check(schema);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::ValidationFailed {
                count: errors.len(),
                errors,
            })
        }
    }

    fn check_duplicate_tables(&mut self, schema: &Schema) {
        let mut seen = HashSet::new();
        for table in &schema.tables {
            if !seen.insert(table.name.as_str()) {
                self.errors.push(SchemaError::duplicate("table", &table.name));
            }
        }
    }

    fn check_table(&mut self, table: &Table, schema: &Schema) {
        if table.columns.is_empty() {
            self.errors.push(SchemaError::EmptyTable {
                table: table.name.clone(),
            });
        }

        let mut seen = HashSet::new();
        for column in &table.columns {
            if !seen.insert(column.name.as_str()) {
                self.errors.push(SchemaError::duplicate(
                    "column",
                    format!("{}.{}", table.name, column.name),
                ));
            }

            let Some(reference) = &column.reference else {
                continue;
            };

            let target_exists = schema
                .get_table(&reference.table)
                .is_some_and(|t| t.get_column(&reference.column).is_some());

            if !target_exists {
                self.errors.push(SchemaError::unknown_reference(
                    &table.name,
                    &column.name,
                    format!("{}.{}", reference.table, reference.column),
                ));
            }
        }
    }
}

/// Validate a schema with a fresh [`Validator`].
pub fn validate_schema(schema: &Schema) -> SchemaResult<()> {
    Validator::new().validate(schema)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Column, ColumnType, Reference};

    fn valid_schema() -> Schema {
        Schema::new("shop")
            .with_table(Table::new("user").with_column(Column::new("id", ColumnType::Int64).primary_key()))
            .with_table(
                Table::new("order")
                    .with_column(Column::new("id", ColumnType::Int64).primary_key())
                    .with_column(
                        Column::new("user_id", ColumnType::Int64).with_reference(Reference::new("user", "id")),
                    ),
            )
    }

    #[test]
    fn test_valid_schema() {
        assert!(validate_schema(&valid_schema()).is_ok());
    }

    #[test]
    fn test_duplicate_table() {
        let schema = valid_schema().with_table(Table::new("user").with_column(Column::new("id", ColumnType::Int64)));
        let errors = Validator::new().check(&schema);
        assert_eq!(errors.len(), 1);
        assert!(matches!(&errors[0], SchemaError::Duplicate { kind, name } if kind == "table" && name == "user"));
    }

    #[test]
    fn test_duplicate_column_and_empty_table() {
        let schema = Schema::new("s")
            .with_table(
                Table::new("t")
                    .with_column(Column::new("a", ColumnType::Int32))
                    .with_column(Column::new("a", ColumnType::Int32)),
            )
            .with_table(Table::new("empty"));

        let errors = Validator::new().check(&schema);
        assert_eq!(errors.len(), 2);
        assert!(matches!(&errors[0], SchemaError::Duplicate { name, .. } if name == "t.a"));
        assert!(matches!(&errors[1], SchemaError::EmptyTable { table } if table == "empty"));
    }

    #[test]
    fn test_unknown_reference() {
        let schema = Schema::new("s").with_table(
            Table::new("order").with_column(
                Column::new("user_id", ColumnType::Int64).with_reference(Reference::new("account", "id")),
            ),
        );

        let err = validate_schema(&schema).unwrap_err();
        match err {
            SchemaError::ValidationFailed { count, errors } => {
                assert_eq!(count, 1);
                assert!(errors[0].to_string().contains("account.id"));
            }
            other => panic!("Expected ValidationFailed, got {other:?}"),
        }
    }
}
