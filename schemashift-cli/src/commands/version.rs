//! `schemashift version` command - Display version information.

use crate::error::CliResult;
use crate::output::{self, kv};

/// Package version
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Run the version command
pub fn run() -> CliResult<()> {
    output::section("schemashift");
    output::newline();

    kv("Version", VERSION);
    kv("Binary", "schemashift");

    #[cfg(debug_assertions)]
    let build_mode = "debug";
    #[cfg(not(debug_assertions))]
    let build_mode = "release";

    kv("Build", build_mode);
    kv("Formats", "sql, yaml, markdown, json");

    output::newline();

    output::section("Components");
    kv("schemashift-schema", env!("CARGO_PKG_VERSION"));
    kv("schemashift-migrate", env!("CARGO_PKG_VERSION"));

    output::newline();
    output::dim("https://github.com/pegasusheavy/schemashift");

    Ok(())
}
