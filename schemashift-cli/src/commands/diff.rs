//! `schemashift diff` command - Compare two schema files.

use schemashift_migrate::{SchemaDiffer, renderer_for};

use super::load_schema;
use crate::cli::DiffArgs;
use crate::config::{DiffSettings, load_config};
use crate::error::CliResult;
use crate::output::{self, info, success};

/// Run the diff command
pub fn run(args: DiffArgs) -> CliResult<()> {
    output::header("Schema Diff");

    let cwd = std::env::current_dir()?;
    let config = load_config(args.config.as_deref(), &cwd)?;
    let settings = DiffSettings::resolve(&args, &config);

    output::kv("From", &args.from.display().to_string());
    output::kv("To", &args.to.display().to_string());
    output::kv("Format", &settings.format.to_string());
    output::newline();

    let from = load_schema(&args.from)?;
    let to = load_schema(&args.to)?;

    let result = SchemaDiffer::new(settings.options.clone()).diff(&from, &to)?;

    let renderer = renderer_for(settings.format, &settings.options.unique_suffix);
    let rendered = renderer.render(&result)?;

    if result.is_empty() {
        success("Schemas are identical - no changes needed");
    } else {
        info(&format!(
            "{} changesets: {}",
            result.change_sets.len(),
            result.summary()
        ));
    }

    match &settings.output {
        Some(path) => {
            std::fs::write(path, &rendered)?;
            success(&format!("Migration written to {}", path.display()));
        }
        None => print!("{}", rendered),
    }

    Ok(())
}
