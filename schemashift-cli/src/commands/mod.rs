//! CLI command implementations.

pub mod diff;
pub mod validate;
pub mod version;

use std::path::Path;

use schemashift_schema::Schema;

use crate::error::{CliError, CliResult};

/// Load a schema file, failing with a readable message if it is missing.
fn load_schema(path: &Path) -> CliResult<Schema> {
    if !path.exists() {
        return Err(CliError::Schema(format!(
            "Schema file not found: {}",
            path.display()
        )));
    }
    Ok(schemashift_schema::parse_schema_file(path)?)
}
