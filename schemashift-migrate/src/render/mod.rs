//! Output renderers for comparison results.
//!
//! A renderer turns each [`Change`] into target-specific text. Every renderer
//! matches on `Change` exhaustively. A change the target cannot express comes
//! back as [`Rendered::Unsupported`]; `render` writes a visible note for it
//! instead of dropping it.

mod json;
mod markdown;
mod sql;
mod yaml;

pub use json::JsonRenderer;
pub use markdown::MarkdownRenderer;
pub use sql::{SqlRenderer, mysql_type, sql_literal};
pub use yaml::YamlRenderer;

use schemashift_schema::OutputFormat;

use crate::change::{Change, ChangeKind};
use crate::changeset::DiffResult;
use crate::error::{MigrateResult, MigrationError};

/// The rendering of a single change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    /// Target text, one entry per statement.
    Statements(Vec<String>),
    /// The target has no equivalent for this change.
    Unsupported {
        /// The change kind.
        kind: ChangeKind,
        /// The renderer name.
        target: &'static str,
    },
}

impl Rendered {
    /// Check if the change could not be expressed.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported { .. })
    }

    /// Get the statements, failing on unsupported changes.
    pub fn into_statements(self) -> MigrateResult<Vec<String>> {
        match self {
            Self::Statements(stmts) => Ok(stmts),
            Self::Unsupported { kind, target } => {
                Err(MigrationError::UnsupportedChange { kind, target })
            }
        }
    }
}

/// A migration output target.
pub trait Renderer {
    /// Short target name, used in notes and errors.
    fn name(&self) -> &'static str;

    /// Render one change.
    fn render_change(&self, change: &Change) -> MigrateResult<Rendered>;

    /// Render a whole comparison result.
    fn render(&self, result: &DiffResult) -> MigrateResult<String>;
}

/// Get the renderer for an output format.
pub fn renderer_for(format: OutputFormat, unique_suffix: &str) -> Box<dyn Renderer> {
    match format {
        OutputFormat::Sql => Box::new(SqlRenderer::new().with_unique_suffix(unique_suffix)),
        OutputFormat::Yaml => Box::new(YamlRenderer::new().with_unique_suffix(unique_suffix)),
        OutputFormat::Markdown => Box::new(MarkdownRenderer::new()),
        OutputFormat::Json => Box::new(JsonRenderer::new()),
    }
}

/// Note text for a change a target cannot express.
pub(crate) fn unsupported_note(change: &Change, target: &str) -> String {
    format!(
        "unsupported by {}: {} ({})",
        target,
        change.kind(),
        change.describe()
    )
}
