//! `schemashift validate` command - Check a schema file.

use std::collections::BTreeSet;

use schemashift_schema::Validator;

use super::load_schema;
use crate::cli::ValidateArgs;
use crate::error::{CliError, CliResult};
use crate::output::{self, success};

/// Run the validate command
pub fn run(args: ValidateArgs) -> CliResult<()> {
    output::header("Validate Schema");

    output::kv("Schema", &args.schema.display().to_string());
    output::newline();

    let schema = load_schema(&args.schema)?;
    let issues = Validator::new().check(&schema);

    if !issues.is_empty() {
        output::error("Schema validation failed!");
        output::newline();
        output::section("Errors");
        for issue in &issues {
            output::list_item(&issue.to_string());
        }
        return Err(CliError::Validation(format!(
            "Found {} validation errors",
            issues.len()
        )));
    }

    success("Schema is valid!");
    output::newline();

    output::section("Schema Summary");
    output::kv("Name", &schema.name);
    output::kv("Version", &schema.version);
    output::kv("Tables", &schema.tables.len().to_string());

    let total_columns: usize = schema.tables.iter().map(|t| t.columns.len()).sum();
    output::kv("Total Columns", &total_columns.to_string());

    let groups: BTreeSet<&str> = schema
        .tables
        .iter()
        .map(|t| t.group.as_str())
        .filter(|g| !g.is_empty())
        .collect();
    if !groups.is_empty() {
        output::kv("Groups", &groups.into_iter().collect::<Vec<_>>().join(", "));
    }

    Ok(())
}
