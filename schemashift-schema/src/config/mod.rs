//! Configuration file parsing for `schemashift.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{SchemaError, SchemaResult};
use crate::filter::TableFilter;

/// Default config file name (lives in project root).
pub const CONFIG_FILE_NAME: &str = "schemashift.toml";

/// Default suffix appended to a table name to name its unique constraint.
pub const DEFAULT_UNIQUE_SUFFIX: &str = "_uq";

/// Main configuration structure for `schemashift.toml`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SchemashiftConfig {
    /// Comparison settings.
    #[serde(default)]
    pub diff: DiffConfig,

    /// Output settings.
    #[serde(default)]
    pub output: OutputConfig,
}

impl SchemashiftConfig {
    /// Load configuration from a file path.
    pub fn from_file(path: impl AsRef<Path>) -> SchemaResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| SchemaError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> SchemaResult<Self> {
        // First, expand environment variables
        let expanded = expand_env_vars(content);

        toml::from_str(&expanded).map_err(|e| SchemaError::TomlError { source: e })
    }
}

/// Comparison settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields, default)]
pub struct DiffConfig {
    /// Compare table and column descriptions.
    pub compare_comments: bool,

    /// Suffix appended to the table name to name its unique constraint.
    pub unique_suffix: String,

    /// Changeset author; the target schema author is used when absent.
    pub author: Option<String>,

    /// Table groups taking part in the comparison; empty means all.
    pub groups: Vec<String>,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            compare_comments: false,
            unique_suffix: DEFAULT_UNIQUE_SUFFIX.to_string(),
            author: None,
            groups: Vec::new(),
        }
    }
}

impl DiffConfig {
    /// Build the table filter for the configured groups.
    pub fn table_filter(&self) -> TableFilter {
        TableFilter::from_groups(&self.groups)
    }
}

/// Output format for rendered changesets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// MySQL DDL.
    #[default]
    Sql,
    /// Liquibase YAML changelog.
    Yaml,
    /// Markdown report.
    Markdown,
    /// Raw JSON dump of the diff result.
    Json,
}

impl OutputFormat {
    /// File extension conventionally used for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Sql => "sql",
            Self::Yaml => "yaml",
            Self::Markdown => "md",
            Self::Json => "json",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sql => write!(f, "sql"),
            Self::Yaml => write!(f, "yaml"),
            Self::Markdown => write!(f, "markdown"),
            Self::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sql" | "mysql" => Ok(Self::Sql),
            "yaml" | "yml" | "liquibase" => Ok(Self::Yaml),
            "markdown" | "md" => Ok(Self::Markdown),
            "json" => Ok(Self::Json),
            other => Err(SchemaError::config(format!("unknown output format `{other}`"))),
        }
    }
}

/// Output settings.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields, default)]
pub struct OutputConfig {
    /// Output format.
    pub format: OutputFormat,

    /// Output file; stdout when absent.
    pub path: Option<PathBuf>,
}

/// Expand environment variables in the format `${VAR_NAME}`.
fn expand_env_vars(content: &str) -> String {
    let mut result = content.to_string();
    let Ok(re) = regex_lite::Regex::new(r"\$\{([^}]+)\}") else {
        return result;
    };

    for cap in re.captures_iter(content) {
        let var_name = &cap[1];
        let full_match = &cap[0];

        if let Ok(value) = std::env::var(var_name) {
            result = result.replace(full_match, &value);
        }
    }

    result
}
