//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use schemashift_schema::OutputFormat;

/// schemashift - schema comparison and migration changesets
#[derive(Parser, Debug)]
#[command(name = "schemashift")]
#[command(author = "Pegasus Heavy Industries LLC")]
#[command(version)]
#[command(about = "schemashift - compare schema snapshots and generate migration changesets", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compare two schema files and render the migration changesets
    Diff(DiffArgs),

    /// Check a schema file for structural problems
    Validate(ValidateArgs),

    /// Display version information
    Version,
}

// =============================================================================
// Diff Command
// =============================================================================

/// Arguments for the `diff` command
#[derive(Args, Debug)]
pub struct DiffArgs {
    /// Schema file describing the current state
    #[arg(long)]
    pub from: PathBuf,

    /// Schema file describing the desired state
    #[arg(long)]
    pub to: PathBuf,

    /// Only compare tables in these groups (comma separated)
    #[arg(short, long, value_delimiter = ',')]
    pub groups: Vec<String>,

    /// Compare table and column comments
    #[arg(long)]
    pub compare_comments: bool,

    /// Suffix used to name unique constraints
    #[arg(long)]
    pub unique_suffix: Option<String>,

    /// Author recorded on every changeset
    #[arg(short, long, env = "SCHEMASHIFT_AUTHOR")]
    pub author: Option<String>,

    /// Output format
    #[arg(short, long)]
    pub format: Option<FormatArg>,

    /// Write the rendered output to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Validate both schemas before comparing
    #[arg(long)]
    pub strict: bool,

    /// Path to schemashift.toml (defaults to the current directory)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Supported output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatArg {
    /// MySQL DDL
    Sql,
    /// Liquibase YAML changelog
    Yaml,
    /// Markdown report
    Markdown,
    /// JSON dump of the changesets
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Sql => OutputFormat::Sql,
            FormatArg::Yaml => OutputFormat::Yaml,
            FormatArg::Markdown => OutputFormat::Markdown,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

// =============================================================================
// Validate Command
// =============================================================================

/// Arguments for the `validate` command
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Path to schema file
    #[arg(short, long)]
    pub schema: PathBuf,
}
