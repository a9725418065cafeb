//! Markdown change report.

use schemashift_schema::Table;

use super::{Renderer, Rendered, unsupported_note};
use crate::change::{Change, type_label};
use crate::changeset::DiffResult;
use crate::error::MigrateResult;

/// Renders a human readable report: a heading per changeset, a bullet per change.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownRenderer;

impl MarkdownRenderer {
    /// Create a new renderer.
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for MarkdownRenderer {
    fn name(&self) -> &'static str {
        "markdown"
    }

    fn render_change(&self, change: &Change) -> MigrateResult<Rendered> {
        let mut lines = vec![format!("- {}", change.describe())];

        match change {
            Change::CreateTable { table } => {
                lines.push(String::new());
                lines.extend(column_table(table));
            }
            Change::UpdatePrimaryKey { .. } => {
                if let Some(delta) = change.primary_key_delta() {
                    if !delta.added.is_empty() {
                        lines.push(format!("  - added: {}", delta.added.join(", ")));
                    }
                    if !delta.removed.is_empty() {
                        lines.push(format!("  - removed: {}", delta.removed.join(", ")));
                    }
                }
            }
            Change::AddColumn { after, before, .. } => match (after, before) {
                (Some(prev), _) => lines.push(format!("  - after `{}`", prev.name)),
                (None, Some(next)) => lines.push(format!("  - before `{}`", next.name)),
                (None, None) => {}
            },
            Change::DropTable { .. }
            | Change::RenameTable { .. }
            | Change::DropUniqueConstraint { .. }
            | Change::CreateUniqueConstraint { .. }
            | Change::SetTableComment { .. }
            | Change::DropColumn { .. }
            | Change::SetColumnComment { .. }
            | Change::ChangeColumnType { .. }
            | Change::RenameColumn { .. }
            | Change::SetNotNullConstraint { .. }
            | Change::SetAutoIncrement { .. }
            | Change::SetDefaultValue { .. } => {}
        }

        Ok(Rendered::Statements(lines))
    }

    fn render(&self, result: &DiffResult) -> MigrateResult<String> {
        let mut out = format!(
            "# Migration from `{}` to `{}`\n\n{}\n",
            result.from.name,
            result.to.name,
            result.summary()
        );

        for change_set in &result.change_sets {
            out.push_str(&format!(
                "\n## Changeset {} ({})\n\n",
                change_set.id, change_set.author
            ));
            for change in &change_set.changes {
                match self.render_change(change)? {
                    Rendered::Statements(lines) => {
                        for line in lines {
                            out.push_str(&line);
                            out.push('\n');
                        }
                    }
                    Rendered::Unsupported { .. } => {
                        out.push_str(&format!("- _{}_\n", unsupported_note(change, self.name())));
                    }
                }
            }
        }

        Ok(out)
    }
}

fn column_table(table: &Table) -> Vec<String> {
    let mut lines = vec![
        "  | Column | Type | Null | Key | Default | Comment |".to_string(),
        "  |---|---|---|---|---|---|".to_string(),
    ];

    for column in &table.columns {
        let key = if column.primary_key {
            "PRI"
        } else if column.unique_key {
            "UNI"
        } else {
            ""
        };
        lines.push(format!(
            "  | {} | {} | {} | {} | {} | {} |",
            column.name,
            type_label(column),
            if column.not_null { "NO" } else { "YES" },
            key,
            column.default_value,
            column.description.replace('|', "\\|")
        ));
    }

    lines
}
