//! MySQL DDL rendering.

use schemashift_schema::{Column, ColumnType, Index, Table};

use super::{Renderer, Rendered, unsupported_note};
use crate::change::Change;
use crate::changeset::DiffResult;
use crate::error::MigrateResult;

/// Renders changesets as MySQL DDL, one `-- changeset author:id` header per changeset.
#[derive(Debug, Clone)]
pub struct SqlRenderer {
    unique_suffix: String,
}

impl Default for SqlRenderer {
    fn default() -> Self {
        Self {
            unique_suffix: schemashift_schema::config::DEFAULT_UNIQUE_SUFFIX.to_string(),
        }
    }
}

impl SqlRenderer {
    /// Create a renderer with the default unique constraint suffix.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the suffix used to name unique constraints of created tables.
    pub fn with_unique_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.unique_suffix = suffix.into();
        self
    }

    /// Generate CREATE TABLE plus its index statements.
    fn create_table(&self, table: &Table) -> Vec<String> {
        let mut lines: Vec<String> = table
            .columns
            .iter()
            .map(|c| self.column_definition(c))
            .collect();

        let pk = table.primary_key_columns();
        if !pk.is_empty() {
            lines.push(format!("PRIMARY KEY ({})", column_list(pk)));
        }

        let unique = table.unique_key_columns();
        if !unique.is_empty() {
            lines.push(format!(
                "CONSTRAINT `{}{}` UNIQUE ({})",
                table.name,
                self.unique_suffix,
                column_list(unique)
            ));
        }

        let mut sql = format!(
            "CREATE TABLE `{}` (\n    {}\n) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4",
            table.name,
            lines.join(",\n    ")
        );
        if !table.description.is_empty() {
            sql.push_str(&format!(" COMMENT={}", quote(&table.description)));
        }
        sql.push(';');

        let mut stmts = vec![sql];
        stmts.extend(table.indices.iter().map(|index| create_index(&table.name, index)));
        stmts
    }

    /// Generate a full column definition, as used by ADD, MODIFY and CHANGE.
    fn column_definition(&self, column: &Column) -> String {
        let mut parts = vec![format!("`{}`", column.name), mysql_type(column)];

        parts.push(if column.not_null { "NOT NULL" } else { "NULL" }.to_string());

        if column.auto_incremental {
            parts.push("AUTO_INCREMENT".to_string());
        }

        if column.has_default() {
            parts.push(format!("DEFAULT {}", sql_literal(&column.default_value)));
        }

        if !column.on_update.is_empty() {
            parts.push(format!("ON UPDATE {}", column.on_update));
        }

        if !column.description.is_empty() {
            parts.push(format!("COMMENT {}", quote(&column.description)));
        }

        parts.join(" ")
    }

    fn modify_column(&self, table: &Table, column: &Column) -> String {
        format!(
            "ALTER TABLE `{}` MODIFY COLUMN {};",
            table.name,
            self.column_definition(column)
        )
    }
}

impl Renderer for SqlRenderer {
    fn name(&self) -> &'static str {
        "sql"
    }

    fn render_change(&self, change: &Change) -> MigrateResult<Rendered> {
        let stmts = match change {
            Change::CreateTable { table } => self.create_table(table),
            Change::DropTable { table } => vec![format!("DROP TABLE `{}`;", table.name)],
            Change::RenameTable { old_table, table } => vec![format!(
                "RENAME TABLE `{}` TO `{}`;",
                old_table.name, table.name
            )],
            Change::UpdatePrimaryKey { old_table, table } => {
                let mut stmts = Vec::new();
                if !old_table.primary_key_names().is_empty() {
                    stmts.push(format!("ALTER TABLE `{}` DROP PRIMARY KEY;", table.name));
                }
                let pk = table.primary_key_columns();
                if !pk.is_empty() {
                    stmts.push(format!(
                        "ALTER TABLE `{}` ADD PRIMARY KEY ({});",
                        table.name,
                        column_list(pk)
                    ));
                }
                stmts
            }
            Change::DropUniqueConstraint { name, table } => {
                vec![format!("ALTER TABLE `{}` DROP INDEX `{}`;", table.name, name)]
            }
            Change::CreateUniqueConstraint { name, table } => vec![format!(
                "ALTER TABLE `{}` ADD CONSTRAINT `{}` UNIQUE ({});",
                table.name,
                name,
                column_list(table.unique_key_columns())
            )],
            Change::SetTableComment { table } => vec![format!(
                "ALTER TABLE `{}` COMMENT = {};",
                table.name,
                quote(&table.description)
            )],
            Change::AddColumn {
                table,
                column,
                before,
                after,
            } => {
                let position = match (after, before) {
                    (Some(prev), _) => format!(" AFTER `{}`", prev.name),
                    (None, Some(_)) => " FIRST".to_string(),
                    (None, None) => String::new(),
                };
                vec![format!(
                    "ALTER TABLE `{}` ADD COLUMN {}{};",
                    table.name,
                    self.column_definition(column),
                    position
                )]
            }
            Change::DropColumn { table, column_name } => vec![format!(
                "ALTER TABLE `{}` DROP COLUMN `{}`;",
                table.name, column_name
            )],
            Change::RenameColumn {
                table,
                old_column,
                column,
            } => vec![format!(
                "ALTER TABLE `{}` CHANGE COLUMN `{}` {};",
                table.name,
                old_column.name,
                self.column_definition(column)
            )],
            Change::SetColumnComment { table, column }
            | Change::ChangeColumnType { table, column, .. }
            | Change::SetNotNullConstraint { table, column }
            | Change::SetAutoIncrement { table, column } => {
                vec![self.modify_column(table, column)]
            }
            Change::SetDefaultValue { table, column } => {
                if column.has_default() {
                    vec![format!(
                        "ALTER TABLE `{}` ALTER COLUMN `{}` SET DEFAULT {};",
                        table.name,
                        column.name,
                        sql_literal(&column.default_value)
                    )]
                } else {
                    vec![format!(
                        "ALTER TABLE `{}` ALTER COLUMN `{}` DROP DEFAULT;",
                        table.name, column.name
                    )]
                }
            }
        };

        Ok(Rendered::Statements(stmts))
    }

    fn render(&self, result: &DiffResult) -> MigrateResult<String> {
        let mut out = format!(
            "-- schemashift migration from '{}' to '{}'\n",
            result.from.name, result.to.name
        );

        for change_set in &result.change_sets {
            out.push_str(&format!(
                "\n-- changeset {}:{}\n",
                change_set.author, change_set.id
            ));
            for change in &change_set.changes {
                match self.render_change(change)? {
                    Rendered::Statements(stmts) => {
                        for stmt in stmts {
                            out.push_str(&stmt);
                            out.push('\n');
                        }
                    }
                    Rendered::Unsupported { .. } => {
                        out.push_str(&format!("-- {}\n", unsupported_note(change, self.name())));
                    }
                }
            }
        }

        Ok(out)
    }
}

/// Map a column's logical type to a MySQL column type.
pub fn mysql_type(column: &Column) -> String {
    let size = column.size;
    let sized = |name: &str, fallback: Option<u32>| match (size, fallback) {
        (0, Some(n)) => format!("{}({})", name, n),
        (0, None) => name.to_string(),
        (n, _) => format!("{}({})", name, n),
    };

    match &column.column_type {
        ColumnType::Bool => "TINYINT(1)".to_string(),
        ColumnType::Int8 => "TINYINT".to_string(),
        ColumnType::Int16 => "SMALLINT".to_string(),
        ColumnType::Int32 => "INT".to_string(),
        ColumnType::Int64 => "BIGINT".to_string(),
        ColumnType::Uint8 => "TINYINT UNSIGNED".to_string(),
        ColumnType::Uint16 => "SMALLINT UNSIGNED".to_string(),
        ColumnType::Uint32 => "INT UNSIGNED".to_string(),
        ColumnType::Uint64 => "BIGINT UNSIGNED".to_string(),
        ColumnType::Float32 => "FLOAT".to_string(),
        ColumnType::Float64 => "DOUBLE".to_string(),
        ColumnType::Decimal => match (column.size, column.scale) {
            (0, _) => "DECIMAL".to_string(),
            (p, 0) => format!("DECIMAL({})", p),
            (p, s) => format!("DECIMAL({},{})", p, s),
        },
        ColumnType::Char => sized("CHAR", None),
        ColumnType::Varchar => sized("VARCHAR", Some(255)),
        ColumnType::Text => "TEXT".to_string(),
        ColumnType::MediumText => "MEDIUMTEXT".to_string(),
        ColumnType::LongText => "LONGTEXT".to_string(),
        ColumnType::Date => "DATE".to_string(),
        ColumnType::Time => "TIME".to_string(),
        ColumnType::DateTime => "DATETIME".to_string(),
        ColumnType::Timestamp => "TIMESTAMP".to_string(),
        ColumnType::Json => "JSON".to_string(),
        ColumnType::Binary => sized("BINARY", None),
        ColumnType::Blob => "BLOB".to_string(),
        ColumnType::Uuid => "CHAR(36)".to_string(),
        ColumnType::Other(tag) => sized(&tag.to_ascii_uppercase(), None),
    }
}

/// Format a default value literal for MySQL.
///
/// Numbers, booleans, `NULL` and `CURRENT_TIMESTAMP` are emitted bare;
/// everything else is quoted.
pub fn sql_literal(value: &str) -> String {
    let upper = value.to_ascii_uppercase();
    let is_number = value.parse::<f64>().is_ok() && value.chars().any(|c| c.is_ascii_digit());

    if is_number
        || matches!(upper.as_str(), "TRUE" | "FALSE" | "NULL")
        || upper.starts_with("CURRENT_TIMESTAMP")
    {
        value.to_string()
    } else {
        quote(value)
    }
}

fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

fn column_list(columns: Vec<&Column>) -> String {
    columns
        .iter()
        .map(|c| format!("`{}`", c.name))
        .collect::<Vec<_>>()
        .join(", ")
}

fn create_index(table: &str, index: &Index) -> String {
    let unique = if index.unique { "UNIQUE " } else { "" };
    let cols: Vec<String> = index.columns.iter().map(|c| format!("`{}`", c)).collect();
    format!(
        "CREATE {}INDEX `{}` ON `{}`({});",
        unique,
        index.name,
        table,
        cols.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::change::ChangeKind;
    use crate::changeset::ChangeSet;
    use schemashift_schema::Schema;

    fn user() -> Table {
        Table::new("user")
            .with_description("accounts")
            .with_column(Column::new("id", ColumnType::Int64).primary_key().auto_increment())
            .with_column(Column::new("email", ColumnType::Varchar).with_size(128).not_null().unique())
            .with_column(
                Column::new("balance", ColumnType::Decimal)
                    .with_size(10)
                    .with_scale(2)
                    .with_default("0"),
            )
            .with_index(Index::new("idx_user_email", vec!["email".to_string()]))
    }

    fn statements(change: &Change) -> Vec<String> {
        SqlRenderer::new()
            .render_change(change)
            .unwrap()
            .into_statements()
            .unwrap()
    }

    #[test]
    fn test_mysql_type_mapping() {
        assert_eq!(mysql_type(&Column::new("a", ColumnType::Int64)), "BIGINT");
        assert_eq!(mysql_type(&Column::new("a", ColumnType::Varchar)), "VARCHAR(255)");
        assert_eq!(mysql_type(&Column::new("a", ColumnType::Varchar).with_size(40)), "VARCHAR(40)");
        assert_eq!(
            mysql_type(&Column::new("a", ColumnType::Decimal).with_size(10).with_scale(2)),
            "DECIMAL(10,2)"
        );
        assert_eq!(mysql_type(&Column::new("a", ColumnType::Bool)), "TINYINT(1)");
        assert_eq!(mysql_type(&Column::new("a", "geometry")), "GEOMETRY");
    }

    #[test]
    fn test_sql_literal() {
        assert_eq!(sql_literal("42"), "42");
        assert_eq!(sql_literal("-1.5"), "-1.5");
        assert_eq!(sql_literal("true"), "true");
        assert_eq!(sql_literal("NULL"), "NULL");
        assert_eq!(sql_literal("CURRENT_TIMESTAMP"), "CURRENT_TIMESTAMP");
        assert_eq!(sql_literal("guest"), "'guest'");
        assert_eq!(sql_literal("inf"), "'inf'");
        assert_eq!(sql_literal("it's"), "'it''s'");
    }

    #[test]
    fn test_create_table() {
        let stmts = statements(&Change::CreateTable { table: user() });
        assert_eq!(stmts.len(), 2);

        let sql = &stmts[0];
        assert!(sql.contains("CREATE TABLE `user`"));
        assert!(sql.contains("`id` BIGINT NOT NULL AUTO_INCREMENT"));
        assert!(sql.contains("`balance` DECIMAL(10,2) NULL DEFAULT 0"));
        assert!(sql.contains("PRIMARY KEY (`id`)"));
        assert!(sql.contains("CONSTRAINT `user_uq` UNIQUE (`email`)"));
        assert!(sql.contains("ENGINE=InnoDB"));
        assert!(sql.ends_with("COMMENT='accounts';"));

        assert_eq!(stmts[1], "CREATE INDEX `idx_user_email` ON `user`(`email`);");
    }

    #[test]
    fn test_unique_suffix() {
        let stmts = SqlRenderer::new()
            .with_unique_suffix("_unique")
            .render_change(&Change::CreateTable { table: user() })
            .unwrap()
            .into_statements()
            .unwrap();
        assert!(stmts[0].contains("CONSTRAINT `user_unique` UNIQUE"));
    }

    #[test]
    fn test_add_column_position() {
        let table = user();
        let column = Column::new("nick", ColumnType::Varchar).with_size(20);

        let stmts = statements(&Change::AddColumn {
            table: table.clone(),
            column: column.clone(),
            before: None,
            after: table.get_column("email").cloned(),
        });
        assert_eq!(
            stmts,
            vec!["ALTER TABLE `user` ADD COLUMN `nick` VARCHAR(20) NULL AFTER `email`;"]
        );

        let stmts = statements(&Change::AddColumn {
            table: table.clone(),
            column: column.clone(),
            before: table.get_column("id").cloned(),
            after: None,
        });
        assert!(stmts[0].ends_with(" FIRST;"));

        let stmts = statements(&Change::AddColumn {
            table,
            column,
            before: None,
            after: None,
        });
        assert!(stmts[0].ends_with("NULL;"));
    }

    #[test]
    fn test_update_primary_key() {
        let old_table = user();
        let mut table = user();
        table.columns[1].primary_key = true;

        let stmts = statements(&Change::UpdatePrimaryKey { old_table, table });
        assert_eq!(
            stmts,
            vec![
                "ALTER TABLE `user` DROP PRIMARY KEY;",
                "ALTER TABLE `user` ADD PRIMARY KEY (`id`, `email`);",
            ]
        );
    }

    #[test]
    fn test_default_value() {
        let column = Column::new("role", ColumnType::Varchar).with_default("guest");
        let stmts = statements(&Change::SetDefaultValue {
            table: user(),
            column,
        });
        assert_eq!(
            stmts,
            vec!["ALTER TABLE `user` ALTER COLUMN `role` SET DEFAULT 'guest';"]
        );

        let stmts = statements(&Change::SetDefaultValue {
            table: user(),
            column: Column::new("role", ColumnType::Varchar),
        });
        assert_eq!(stmts, vec!["ALTER TABLE `user` ALTER COLUMN `role` DROP DEFAULT;"]);
    }

    #[test]
    fn test_rename_column_uses_change() {
        let stmts = statements(&Change::RenameColumn {
            table: user(),
            old_column: Column::new("login", ColumnType::Varchar).with_size(40),
            column: Column::new("name", ColumnType::Varchar).with_size(40),
        });
        assert_eq!(
            stmts,
            vec!["ALTER TABLE `user` CHANGE COLUMN `login` `name` VARCHAR(40) NULL;"]
        );
    }

    #[test]
    fn test_every_kind_renders() {
        let table = user();
        let column = table.columns[1].clone();
        let changes = vec![
            Change::CreateTable { table: table.clone() },
            Change::DropTable { table: table.clone() },
            Change::RenameTable { old_table: table.clone(), table: table.clone() },
            Change::UpdatePrimaryKey { old_table: table.clone(), table: table.clone() },
            Change::DropUniqueConstraint { name: "user_uq".into(), table: table.clone() },
            Change::CreateUniqueConstraint { name: "user_uq".into(), table: table.clone() },
            Change::SetTableComment { table: table.clone() },
            Change::AddColumn { table: table.clone(), column: column.clone(), before: None, after: None },
            Change::DropColumn { table: table.clone(), column_name: "email".into() },
            Change::SetColumnComment { table: table.clone(), column: column.clone() },
            Change::ChangeColumnType { table: table.clone(), old_column: column.clone(), column: column.clone() },
            Change::RenameColumn { table: table.clone(), old_column: column.clone(), column: column.clone() },
            Change::SetNotNullConstraint { table: table.clone(), column: column.clone() },
            Change::SetAutoIncrement { table: table.clone(), column: column.clone() },
            Change::SetDefaultValue { table: table.clone(), column },
        ];

        let kinds: std::collections::HashSet<ChangeKind> = changes.iter().map(Change::kind).collect();
        assert_eq!(kinds.len(), ChangeKind::ALL.len());

        for change in &changes {
            let rendered = SqlRenderer::new().render_change(change).unwrap();
            assert!(!rendered.is_unsupported(), "{} unsupported", change.kind());
        }
    }

    #[test]
    fn test_render_headers() {
        let result = DiffResult {
            from: Schema::new("v1"),
            to: Schema::new("v2"),
            change_sets: vec![
                ChangeSet::new("1", "dba", Change::DropTable { table: Table::new("legacy") }),
                ChangeSet::new(
                    "2-1",
                    "dba",
                    Change::DropColumn {
                        table: Table::new("user"),
                        column_name: "nick".into(),
                    },
                ),
            ],
        };

        let sql = SqlRenderer::new().render(&result).unwrap();
        pretty_assertions::assert_eq!(
            sql,
            "-- schemashift migration from 'v1' to 'v2'\n\
             \n-- changeset dba:1\n\
             DROP TABLE `legacy`;\n\
             \n-- changeset dba:2-1\n\
             ALTER TABLE `user` DROP COLUMN `nick`;\n"
        );
    }
}
