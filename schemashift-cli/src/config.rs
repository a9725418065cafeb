//! CLI configuration handling.
//!
//! Settings come from `schemashift.toml` and are overridden by command line
//! flags.

use std::path::{Path, PathBuf};

use schemashift_migrate::DiffOptions;
use schemashift_schema::config::CONFIG_FILE_NAME;
use schemashift_schema::{OutputFormat, SchemashiftConfig, TableFilter};
use tracing::debug;

use crate::cli::DiffArgs;
use crate::error::{CliError, CliResult};

/// Load `schemashift.toml`.
///
/// An explicit path must exist. Without one, the file is looked up in `cwd`
/// and defaults are used when it is absent.
pub fn load_config(explicit: Option<&Path>, cwd: &Path) -> CliResult<SchemashiftConfig> {
    if let Some(path) = explicit {
        if !path.exists() {
            return Err(CliError::Config(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        return Ok(SchemashiftConfig::from_file(path)?);
    }

    let path = cwd.join(CONFIG_FILE_NAME);
    if path.exists() {
        debug!("Using config file {}", path.display());
        Ok(SchemashiftConfig::from_file(&path)?)
    } else {
        Ok(SchemashiftConfig::default())
    }
}

/// Effective settings of a `diff` run.
#[derive(Debug, Clone)]
pub struct DiffSettings {
    /// Comparator options.
    pub options: DiffOptions,
    /// Output format.
    pub format: OutputFormat,
    /// Output file; stdout when absent.
    pub output: Option<PathBuf>,
}

impl DiffSettings {
    /// Merge command line flags over the config file.
    pub fn resolve(args: &DiffArgs, config: &SchemashiftConfig) -> Self {
        let mut options = DiffOptions::from_config(&config.diff);

        if !args.groups.is_empty() {
            options = options.table_filter(TableFilter::from_groups(&args.groups));
        }
        if args.compare_comments {
            options = options.compare_comments(true);
        }
        if let Some(suffix) = &args.unique_suffix {
            options = options.unique_suffix(suffix.clone());
        }
        if let Some(author) = &args.author {
            options = options.author(author.clone());
        }
        options = options.strict(args.strict);

        Self {
            options,
            format: args.format.map(Into::into).unwrap_or(config.output.format),
            output: args.output.clone().or_else(|| config.output.path.clone()),
        }
    }
}
