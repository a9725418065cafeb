//! JSON dump of a comparison result.

use super::{Renderer, Rendered};
use crate::change::Change;
use crate::changeset::DiffResult;
use crate::error::MigrateResult;

/// Serializes the comparison result as pretty-printed JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

impl JsonRenderer {
    /// Create a new renderer.
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for JsonRenderer {
    fn name(&self) -> &'static str {
        "json"
    }

    fn render_change(&self, change: &Change) -> MigrateResult<Rendered> {
        Ok(Rendered::Statements(vec![serde_json::to_string(change)?]))
    }

    fn render(&self, result: &DiffResult) -> MigrateResult<String> {
        let mut out = serde_json::to_string_pretty(result)?;
        out.push('\n');
        Ok(out)
    }
}
