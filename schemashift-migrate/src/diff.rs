//! Schema comparison.
//!
//! [`SchemaDiffer`] compares two schema snapshots and emits the ordered
//! changesets that turn the first into the second.
//!
//! Table pass, in emission order:
//! 1. tables present in both schemas are diffed column by column, each in its
//!    own major group (a group left empty gives its number back);
//! 2. removed tables are dropped;
//! 3. removed/added pairs with structurally equal columns become renames;
//! 4. remaining added tables are created.
//!
//! Rename detection is first-match-wins in declaration order. When several
//! candidates are equally good the earliest declared one is taken; there is
//! no scoring.

use schemashift_schema::{Column, DiffConfig, Schema, Table, TableFilter, Validator};
use tracing::{debug, info};

use crate::change::Change;
use crate::changeset::{ChangeSet, DiffResult};
use crate::error::{MigrateResult, MigrationError};
use crate::sequencer::VersionSequencer;

/// Options for a comparison.
#[derive(Debug, Clone)]
pub struct DiffOptions {
    /// Which target tables take part. Removed source tables are always considered.
    pub table_filter: TableFilter,
    /// Whether descriptions are compared.
    pub compare_comments: bool,
    /// Suffix appended to a table name to name its unique constraint.
    pub unique_suffix: String,
    /// Changeset author; the target schema author is used when absent.
    pub author: Option<String>,
    /// Whether both schemas are validated before comparing.
    pub strict: bool,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            table_filter: TableFilter::all(),
            compare_comments: false,
            unique_suffix: schemashift_schema::config::DEFAULT_UNIQUE_SUFFIX.to_string(),
            author: None,
            strict: false,
        }
    }
}

impl DiffOptions {
    /// Create default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build options from the `[diff]` section of `schemashift.toml`.
    pub fn from_config(config: &DiffConfig) -> Self {
        Self {
            table_filter: config.table_filter(),
            compare_comments: config.compare_comments,
            unique_suffix: config.unique_suffix.clone(),
            author: config.author.clone(),
            strict: false,
        }
    }

    /// Set the table filter.
    pub fn table_filter(mut self, filter: TableFilter) -> Self {
        self.table_filter = filter;
        self
    }

    /// Enable or disable comment comparison.
    pub fn compare_comments(mut self, compare: bool) -> Self {
        self.compare_comments = compare;
        self
    }

    /// Set the unique constraint name suffix.
    pub fn unique_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.unique_suffix = suffix.into();
        self
    }

    /// Set the changeset author.
    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Validate both schemas before comparing.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Name of the unique constraint of a table.
    pub fn unique_constraint_name(&self, table: &Table) -> String {
        format!("{}{}", table.name, self.unique_suffix)
    }
}

/// Schema differ for comparing schemas.
#[derive(Debug, Clone, Default)]
pub struct SchemaDiffer {
    options: DiffOptions,
}

impl SchemaDiffer {
    /// Create a new differ.
    pub fn new(options: DiffOptions) -> Self {
        Self { options }
    }

    /// Get the options.
    pub fn options(&self) -> &DiffOptions {
        &self.options
    }

    /// Compute the changesets turning `from` into `to`.
    ///
    /// Comparison itself never fails; errors only come from strict validation.
    pub fn diff(&self, from: &Schema, to: &Schema) -> MigrateResult<DiffResult> {
        if self.options.strict {
            check_schema(from)?;
            check_schema(to)?;
        }

        let author = self
            .options
            .author
            .clone()
            .filter(|a| !a.is_empty())
            .unwrap_or_else(|| to.author.clone());

        let mut run = DiffRun {
            options: &self.options,
            author,
            seq: VersionSequencer::new(),
            change_sets: Vec::new(),
        };
        run.diff_tables(from, to);

        info!(
            "Compared '{}' to '{}': {} changesets",
            from.name,
            to.name,
            run.change_sets.len()
        );

        Ok(DiffResult {
            from: from.clone(),
            to: to.clone(),
            change_sets: run.change_sets,
        })
    }
}

/// Compare two schemas with the given options.
pub fn diff(from: &Schema, to: &Schema, options: DiffOptions) -> MigrateResult<DiffResult> {
    SchemaDiffer::new(options).diff(from, to)
}

fn check_schema(schema: &Schema) -> MigrateResult<()> {
    let errors = Validator::new().check(schema);
    if errors.is_empty() {
        return Ok(());
    }

    let message = errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ");
    Err(MigrationError::invalid_schema(&schema.name, message))
}

/// State of a single comparison.
struct DiffRun<'a> {
    options: &'a DiffOptions,
    author: String,
    seq: VersionSequencer,
    change_sets: Vec<ChangeSet>,
}

impl DiffRun<'_> {
    fn diff_tables(&mut self, from: &Schema, to: &Schema) {
        let from_tables = from.table_map();
        let to_tables = to.table_map();

        let mut added: Vec<&Table> = Vec::new();
        for table in to_tables.values().copied() {
            if !self.options.table_filter.matches(table) {
                continue;
            }

            match from_tables.get(table.name.as_str()) {
                Some(old_table) => {
                    self.seq.bump_major();
                    let before = self.change_sets.len();
                    self.diff_columns(table, old_table);
                    if self.change_sets.len() == before {
                        self.seq.revert_major();
                    } else {
                        debug!(
                            "Table '{}': {} changesets",
                            table.name,
                            self.change_sets.len() - before
                        );
                    }
                }
                None => added.push(table),
            }
        }

        let mut removed: Vec<&Table> = from_tables
            .values()
            .copied()
            .filter(|t| !to_tables.contains_key(t.name.as_str()))
            .collect();

        let mut renamed: Vec<(&Table, &Table)> = Vec::new();
        let mut created: Vec<&Table> = Vec::new();
        for table in added {
            match removed.iter().position(|old| old.same_columns(table)) {
                Some(i) => {
                    let old_table = removed.remove(i);
                    debug!("Detected table rename '{}' -> '{}'", old_table.name, table.name);
                    renamed.push((old_table, table));
                }
                None => created.push(table),
            }
        }

        for old_table in removed {
            self.seq.bump_major();
            self.push_version(Change::DropTable {
                table: old_table.clone(),
            });
        }

        for (old_table, table) in renamed {
            self.rename_table(old_table, table);
        }

        for table in created {
            self.seq.bump_major();
            self.push_version(Change::CreateTable {
                table: table.clone(),
            });
        }
    }

    /// The unique constraint name embeds the table name, so it is dropped
    /// under the old name and recreated under the new one.
    fn rename_table(&mut self, old_table: &Table, table: &Table) {
        self.seq.bump_major();

        if !old_table.unique_key_names().is_empty() {
            self.push_minor(Change::DropUniqueConstraint {
                name: self.options.unique_constraint_name(old_table),
                table: old_table.clone(),
            });
        }

        self.push_minor(Change::RenameTable {
            old_table: old_table.clone(),
            table: table.clone(),
        });

        if !table.unique_key_names().is_empty() {
            self.push_minor(Change::CreateUniqueConstraint {
                name: self.options.unique_constraint_name(table),
                table: table.clone(),
            });
        }
    }

    fn diff_columns(&mut self, table: &Table, old_table: &Table) {
        let compare_comments = self.options.compare_comments;
        let old_columns = old_table.column_map();
        let new_columns = table.column_map();

        if compare_comments && table.description != old_table.description {
            self.push_minor(Change::SetTableComment {
                table: table.clone(),
            });
        }

        let mut added: Vec<&Column> = Vec::new();
        for column in new_columns.values().copied() {
            match old_columns.get(column.name.as_str()) {
                Some(old_column) => self.diff_column(table, column, old_column),
                None => added.push(column),
            }
        }

        let mut removed: Vec<&Column> = old_columns
            .values()
            .copied()
            .filter(|c| !new_columns.contains_key(c.name.as_str()))
            .collect();

        let mut renamed: Vec<(&Column, &Column)> = Vec::new();
        let mut appended: Vec<&Column> = Vec::new();
        for column in added {
            match removed
                .iter()
                .position(|old| column.is_renamed_from(old, compare_comments))
            {
                Some(i) => {
                    let old_column = removed.remove(i);
                    debug!(
                        "Detected column rename '{}.{}' -> '{}'",
                        table.name, old_column.name, column.name
                    );
                    renamed.push((old_column, column));
                }
                None => appended.push(column),
            }
        }

        let old_unique = old_table.unique_key_names();
        let new_unique = table.unique_key_names();
        let unique_changed = old_unique != new_unique;

        if unique_changed && !old_unique.is_empty() {
            self.push_minor(Change::DropUniqueConstraint {
                name: self.options.unique_constraint_name(old_table),
                table: old_table.clone(),
            });
        }

        for old_column in removed {
            self.push_minor(Change::DropColumn {
                table: table.clone(),
                column_name: old_column.name.clone(),
            });
        }

        for (old_column, column) in renamed {
            self.push_minor(Change::RenameColumn {
                table: table.clone(),
                old_column: old_column.clone(),
                column: column.clone(),
            });
        }

        if !appended.is_empty() {
            let changes = appended
                .into_iter()
                .map(|column| Change::AddColumn {
                    table: table.clone(),
                    column: column.clone(),
                    before: table.column_after(&column.name).cloned(),
                    after: table.column_before(&column.name).cloned(),
                })
                .collect();
            self.push_batch(changes);
        }

        if old_table.primary_key_names() != table.primary_key_names() {
            self.push_minor(Change::UpdatePrimaryKey {
                old_table: old_table.clone(),
                table: table.clone(),
            });
        }

        if unique_changed && !new_unique.is_empty() {
            self.push_minor(Change::CreateUniqueConstraint {
                name: self.options.unique_constraint_name(table),
                table: table.clone(),
            });
        }
    }

    /// Each differing attribute becomes its own changeset.
    fn diff_column(&mut self, table: &Table, column: &Column, old_column: &Column) {
        if column.name != old_column.name {
            self.push_minor(Change::RenameColumn {
                table: table.clone(),
                old_column: old_column.clone(),
                column: column.clone(),
            });
        }

        if column.type_differs(old_column) {
            self.push_minor(Change::ChangeColumnType {
                table: table.clone(),
                old_column: old_column.clone(),
                column: column.clone(),
            });
        }

        if self.options.compare_comments && column.description != old_column.description {
            self.push_minor(Change::SetColumnComment {
                table: table.clone(),
                column: column.clone(),
            });
        }

        if column.not_null != old_column.not_null {
            self.push_minor(Change::SetNotNullConstraint {
                table: table.clone(),
                column: column.clone(),
            });
        }

        if column.auto_incremental != old_column.auto_incremental {
            self.push_minor(Change::SetAutoIncrement {
                table: table.clone(),
                column: column.clone(),
            });
        }

        if column.default_value != old_column.default_value {
            self.push_minor(Change::SetDefaultValue {
                table: table.clone(),
                column: column.clone(),
            });
        }
    }

    /// Push a single-change changeset under the current major id.
    fn push_version(&mut self, change: Change) {
        let id = self.seq.version();
        self.change_sets.push(ChangeSet::new(id, &self.author, change));
    }

    /// Push a single-change changeset under a new minor id.
    fn push_minor(&mut self, change: Change) {
        let id = self.seq.bump_minor();
        self.change_sets.push(ChangeSet::new(id, &self.author, change));
    }

    /// Push a batch of changes as one changeset under a new minor id.
    fn push_batch(&mut self, changes: Vec<Change>) {
        let id = self.seq.bump_minor();
        if let Some(change_set) = ChangeSet::from_changes(id, &self.author, changes) {
            self.change_sets.push(change_set);
        }
    }
}
