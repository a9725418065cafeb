//! Loading schema documents from JSON.

use std::path::Path;

use tracing::debug;

use crate::ast::Schema;
use crate::error::{SchemaError, SchemaResult};

/// Parse a schema document from a JSON string.
pub fn parse_schema(json: &str) -> SchemaResult<Schema> {
    serde_json::from_str(json).map_err(SchemaError::json)
}

/// Read and parse a schema document.
pub fn parse_schema_file(path: impl AsRef<Path>) -> SchemaResult<Schema> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| SchemaError::IoError {
        path: path.display().to_string(),
        source: e,
    })?;

    let schema: Schema = serde_json::from_str(&content).map_err(|e| SchemaError::JsonError {
        path: path.display().to_string(),
        source: e,
    })?;

    debug!(
        "Loaded schema '{}' from {} ({} tables)",
        schema.name,
        path.display(),
        schema.tables.len()
    );
    Ok(schema)
}

/// Serialize a schema to pretty-printed JSON.
pub fn to_json(schema: &Schema) -> SchemaResult<String> {
    serde_json::to_string_pretty(schema).map_err(SchemaError::json)
}
