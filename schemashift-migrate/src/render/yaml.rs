//! Liquibase YAML changelog rendering.
//!
//! Default values are typed: integer and decimal columns get
//! `defaultValueNumeric`, bool columns `defaultValueBoolean`, and
//! `NULL`/`CURRENT_TIMESTAMP` become `defaultValueComputed`. A literal that
//! does not fit the column type is a [`MigrationError::ValueCoercion`].
//!
//! Liquibase has no change type for removing auto increment, so disabling it
//! renders as [`Rendered::Unsupported`].

use serde::Serialize;
use serde_yaml::{Mapping, Number, Value};

use schemashift_schema::{Column, ColumnType, Table};

use super::{Renderer, Rendered, mysql_type, unsupported_note};
use crate::change::Change;
use crate::changeset::DiffResult;
use crate::error::{MigrateResult, MigrationError};

/// Renders changesets as a Liquibase `databaseChangeLog`.
#[derive(Debug, Clone)]
pub struct YamlRenderer {
    unique_suffix: String,
}

impl Default for YamlRenderer {
    fn default() -> Self {
        Self {
            unique_suffix: schemashift_schema::config::DEFAULT_UNIQUE_SUFFIX.to_string(),
        }
    }
}

#[derive(Serialize)]
struct ChangeLog {
    #[serde(rename = "databaseChangeLog")]
    entries: Vec<ChangeSetEntry>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ChangeSetEntry {
    change_set: ChangeSetDoc,
}

#[derive(Serialize)]
struct ChangeSetDoc {
    id: String,
    author: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    comment: Option<String>,
    changes: Vec<Value>,
}

/// Attributes of a single Liquibase change. Unset fields are omitted.
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct ChangeDoc {
    #[serde(skip_serializing_if = "Option::is_none")]
    table_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    old_table_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    new_table_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    index_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    constraint_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    column_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    old_column_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    new_column_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    column_names: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    column_data_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    new_data_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    unique: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    remarks: Option<String>,
    #[serde(flatten)]
    default: DefaultDoc,
    #[serde(skip_serializing_if = "Option::is_none")]
    columns: Option<Vec<ColumnEntry>>,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct DefaultDoc {
    #[serde(skip_serializing_if = "Option::is_none")]
    default_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    default_value_numeric: Option<Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    default_value_boolean: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    default_value_computed: Option<String>,
}

#[derive(Debug, Serialize)]
struct ColumnEntry {
    column: ColumnDoc,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct ColumnDoc {
    name: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    column_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    auto_increment: Option<bool>,
    #[serde(flatten)]
    default: DefaultDoc,
    #[serde(skip_serializing_if = "Option::is_none")]
    remarks: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    after_column: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    before_column: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    constraints: Option<ConstraintsDoc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ConstraintsDoc {
    #[serde(skip_serializing_if = "Option::is_none")]
    primary_key: Option<bool>,
    nullable: bool,
}

impl YamlRenderer {
    /// Create a renderer with the default unique constraint suffix.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the suffix used to name unique constraints of created tables.
    pub fn with_unique_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.unique_suffix = suffix.into();
        self
    }

    /// Build the Liquibase changes for one change, or `None` if there is no equivalent.
    fn changes(&self, change: &Change) -> MigrateResult<Option<Vec<Value>>> {
        let values = match change {
            Change::CreateTable { table } => self.create_table(table)?,
            Change::DropTable { table } => vec![entry("dropTable", on_table(table))?],
            Change::RenameTable { old_table, table } => vec![entry(
                "renameTable",
                ChangeDoc {
                    old_table_name: Some(old_table.name.clone()),
                    new_table_name: Some(table.name.clone()),
                    ..ChangeDoc::default()
                },
            )?],
            Change::UpdatePrimaryKey { old_table, table } => {
                let mut values = Vec::new();
                if !old_table.primary_key_names().is_empty() {
                    values.push(entry("dropPrimaryKey", on_table(table))?);
                }
                let pk = table.primary_key_columns();
                if !pk.is_empty() {
                    values.push(entry(
                        "addPrimaryKey",
                        ChangeDoc {
                            column_names: Some(name_list(&pk)),
                            ..on_table(table)
                        },
                    )?);
                }
                values
            }
            Change::DropUniqueConstraint { name, table } => vec![entry(
                "dropUniqueConstraint",
                ChangeDoc {
                    constraint_name: Some(name.clone()),
                    ..on_table(table)
                },
            )?],
            Change::CreateUniqueConstraint { name, table } => {
                vec![add_unique_constraint(table, name)?]
            }
            Change::SetTableComment { table } => vec![entry(
                "setTableRemarks",
                ChangeDoc {
                    remarks: Some(table.description.clone()),
                    ..on_table(table)
                },
            )?],
            Change::AddColumn {
                table,
                column,
                before,
                after,
            } => {
                let mut doc = column_doc(column)?;
                match (after, before) {
                    (Some(prev), _) => doc.after_column = Some(prev.name.clone()),
                    (None, Some(next)) => doc.before_column = Some(next.name.clone()),
                    (None, None) => {}
                }
                vec![entry(
                    "addColumn",
                    ChangeDoc {
                        columns: Some(vec![ColumnEntry { column: doc }]),
                        ..on_table(table)
                    },
                )?]
            }
            Change::DropColumn { table, column_name } => vec![entry(
                "dropColumn",
                ChangeDoc {
                    column_name: Some(column_name.clone()),
                    ..on_table(table)
                },
            )?],
            Change::SetColumnComment { table, column } => vec![entry(
                "setColumnRemarks",
                ChangeDoc {
                    remarks: Some(column.description.clone()),
                    ..on_column(table, column)
                },
            )?],
            Change::ChangeColumnType { table, column, .. } => vec![entry(
                "modifyDataType",
                ChangeDoc {
                    new_data_type: Some(liquibase_type(column)),
                    ..on_column(table, column)
                },
            )?],
            Change::RenameColumn {
                table,
                old_column,
                column,
            } => vec![entry(
                "renameColumn",
                ChangeDoc {
                    old_column_name: Some(old_column.name.clone()),
                    new_column_name: Some(column.name.clone()),
                    column_data_type: Some(liquibase_type(column)),
                    ..on_table(table)
                },
            )?],
            Change::SetNotNullConstraint { table, column } => {
                let kind = if column.not_null {
                    "addNotNullConstraint"
                } else {
                    "dropNotNullConstraint"
                };
                vec![entry(kind, typed_column(table, column))?]
            }
            Change::SetAutoIncrement { table, column } => {
                if !column.auto_incremental {
                    return Ok(None);
                }
                vec![entry("addAutoIncrement", typed_column(table, column))?]
            }
            Change::SetDefaultValue { table, column } => {
                if column.has_default() {
                    vec![entry(
                        "addDefaultValue",
                        ChangeDoc {
                            default: default_doc(column)?,
                            ..typed_column(table, column)
                        },
                    )?]
                } else {
                    vec![entry("dropDefaultValue", on_column(table, column))?]
                }
            }
        };

        Ok(Some(values))
    }

    fn create_table(&self, table: &Table) -> MigrateResult<Vec<Value>> {
        let columns = table
            .columns
            .iter()
            .map(|c| column_doc(c).map(|column| ColumnEntry { column }))
            .collect::<MigrateResult<Vec<_>>>()?;

        let mut values = vec![entry(
            "createTable",
            ChangeDoc {
                remarks: non_empty(&table.description),
                columns: Some(columns),
                ..on_table(table)
            },
        )?];

        if !table.unique_key_columns().is_empty() {
            let name = format!("{}{}", table.name, self.unique_suffix);
            values.push(add_unique_constraint(table, &name)?);
        }

        for index in &table.indices {
            let columns = index
                .columns
                .iter()
                .map(|name| ColumnEntry {
                    column: ColumnDoc {
                        name: name.clone(),
                        ..ColumnDoc::default()
                    },
                })
                .collect();
            values.push(entry(
                "createIndex",
                ChangeDoc {
                    index_name: Some(index.name.clone()),
                    unique: index.unique.then_some(true),
                    columns: Some(columns),
                    ..on_table(table)
                },
            )?);
        }

        Ok(values)
    }
}

impl Renderer for YamlRenderer {
    fn name(&self) -> &'static str {
        "yaml"
    }

    fn render_change(&self, change: &Change) -> MigrateResult<Rendered> {
        match self.changes(change)? {
            Some(values) => {
                let stmts = values
                    .iter()
                    .map(serde_yaml::to_string)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Rendered::Statements(stmts))
            }
            None => Ok(Rendered::Unsupported {
                kind: change.kind(),
                target: self.name(),
            }),
        }
    }

    fn render(&self, result: &DiffResult) -> MigrateResult<String> {
        let mut notes = Vec::new();
        let mut entries = Vec::with_capacity(result.change_sets.len());

        for change_set in &result.change_sets {
            let mut changes = Vec::new();
            let mut unsupported = Vec::new();

            for change in &change_set.changes {
                match self.changes(change)? {
                    Some(values) => changes.extend(values),
                    None => unsupported.push(unsupported_note(change, self.name())),
                }
            }

            notes.extend(
                unsupported
                    .iter()
                    .map(|note| format!("# changeset {}: {}", change_set.id, note)),
            );

            entries.push(ChangeSetEntry {
                change_set: ChangeSetDoc {
                    id: change_set.id.clone(),
                    author: change_set.author.clone(),
                    comment: (!unsupported.is_empty()).then(|| unsupported.join("; ")),
                    changes,
                },
            });
        }

        let body = serde_yaml::to_string(&ChangeLog { entries })?;

        let mut out = String::new();
        for note in notes {
            out.push_str(&note);
            out.push('\n');
        }
        out.push_str(&body);
        Ok(out)
    }
}

/// Wrap a change document under its Liquibase change type.
fn entry(kind: &str, doc: ChangeDoc) -> MigrateResult<Value> {
    let mut map = Mapping::new();
    map.insert(Value::String(kind.to_string()), serde_yaml::to_value(doc)?);
    Ok(Value::Mapping(map))
}

fn on_table(table: &Table) -> ChangeDoc {
    ChangeDoc {
        table_name: Some(table.name.clone()),
        ..ChangeDoc::default()
    }
}

fn on_column(table: &Table, column: &Column) -> ChangeDoc {
    ChangeDoc {
        column_name: Some(column.name.clone()),
        ..on_table(table)
    }
}

fn typed_column(table: &Table, column: &Column) -> ChangeDoc {
    ChangeDoc {
        column_data_type: Some(liquibase_type(column)),
        ..on_column(table, column)
    }
}

fn add_unique_constraint(table: &Table, name: &str) -> MigrateResult<Value> {
    entry(
        "addUniqueConstraint",
        ChangeDoc {
            constraint_name: Some(name.to_string()),
            column_names: Some(name_list(&table.unique_key_columns())),
            ..on_table(table)
        },
    )
}

fn column_doc(column: &Column) -> MigrateResult<ColumnDoc> {
    let constraints = if column.primary_key {
        Some(ConstraintsDoc {
            primary_key: Some(true),
            nullable: false,
        })
    } else if column.not_null {
        Some(ConstraintsDoc {
            primary_key: None,
            nullable: false,
        })
    } else {
        None
    };

    Ok(ColumnDoc {
        name: column.name.clone(),
        column_type: Some(liquibase_type(column)),
        auto_increment: column.auto_incremental.then_some(true),
        default: default_doc(column)?,
        remarks: non_empty(&column.description),
        after_column: None,
        before_column: None,
        constraints,
    })
}

/// Type the default value literal of a column.
fn default_doc(column: &Column) -> MigrateResult<DefaultDoc> {
    let value = column.default_value.as_str();
    let mut doc = DefaultDoc::default();
    if value.is_empty() {
        return Ok(doc);
    }

    let upper = value.to_ascii_uppercase();
    if upper == "NULL" || upper.starts_with("CURRENT_TIMESTAMP") {
        doc.default_value_computed = Some(value.to_string());
        return Ok(doc);
    }

    let coercion = || {
        MigrationError::value_coercion(&column.name, value, column.column_type.to_string())
    };

    let ty = &column.column_type;
    if *ty == ColumnType::Bool {
        let flag = match value.to_ascii_lowercase().as_str() {
            "true" | "1" => true,
            "false" | "0" => false,
            _ => return Err(coercion()),
        };
        doc.default_value_boolean = Some(flag);
    } else if ty.is_integer() {
        let number = if let Ok(n) = value.parse::<i64>() {
            Number::from(n)
        } else if let Ok(n) = value.parse::<u64>() {
            Number::from(n)
        } else {
            return Err(coercion());
        };
        doc.default_value_numeric = Some(number);
    } else if ty.is_numeric() {
        let n = value
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .ok_or_else(coercion)?;
        doc.default_value_numeric = Some(Number::from(n));
    } else {
        doc.default_value = Some(value.to_string());
    }

    Ok(doc)
}

fn liquibase_type(column: &Column) -> String {
    match column.column_type {
        ColumnType::Bool => "BOOLEAN".to_string(),
        ColumnType::Uuid => "UUID".to_string(),
        _ => mysql_type(column),
    }
}

fn name_list(columns: &[&Column]) -> String {
    columns
        .iter()
        .map(|c| c.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_string())
}
