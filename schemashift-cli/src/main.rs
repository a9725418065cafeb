//! schemashift CLI - compare schema snapshots and emit migration changesets.

use clap::Parser;

use schemashift_cli::cli::{Cli, Command};
use schemashift_cli::commands;
use schemashift_cli::error::CliResult;
use schemashift_cli::output;

fn main() {
    // Run the CLI and handle errors
    if let Err(e) = run() {
        output::newline();
        output::error(&e.to_string());
        std::process::exit(1);
    }
}

fn run() -> CliResult<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    output::init_tracing(cli.verbose);

    // Run the appropriate command
    match cli.command {
        Command::Diff(args) => commands::diff::run(args),
        Command::Validate(args) => commands::validate::run(args),
        Command::Version => commands::version::run(),
    }
}
