//! CLI error types and result alias.

use miette::Diagnostic;
use thiserror::Error;

use schemashift_migrate::MigrationError;
use schemashift_schema::SchemaError;

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// CLI error types
#[derive(Error, Debug, Diagnostic)]
pub enum CliError {
    /// IO error
    #[error("IO error: {0}")]
    #[diagnostic(code(schemashift::io))]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    #[diagnostic(code(schemashift::config))]
    Config(String),

    /// Schema loading error
    #[error("Schema error: {0}")]
    #[diagnostic(code(schemashift::schema))]
    Schema(String),

    /// Validation error
    #[error("Validation error: {0}")]
    #[diagnostic(code(schemashift::validation))]
    Validation(String),

    /// Comparison or rendering error
    #[error("Migration error: {0}")]
    #[diagnostic(code(schemashift::migration))]
    Migration(String),
}

impl From<SchemaError> for CliError {
    fn from(err: SchemaError) -> Self {
        match err {
            SchemaError::ConfigError { .. } | SchemaError::TomlError { .. } => {
                CliError::Config(err.to_string())
            }
            SchemaError::ValidationFailed { .. } => CliError::Validation(err.to_string()),
            other => CliError::Schema(other.to_string()),
        }
    }
}

impl From<MigrationError> for CliError {
    fn from(err: MigrationError) -> Self {
        match err {
            MigrationError::Io(e) => CliError::Io(e),
            MigrationError::InvalidSchema { .. } => CliError::Validation(err.to_string()),
            other => CliError::Migration(other.to_string()),
        }
    }
}

impl From<toml::de::Error> for CliError {
    fn from(err: toml::de::Error) -> Self {
        CliError::Config(format!("Failed to parse TOML: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_error_mapping() {
        let err: CliError = SchemaError::config("bad value").into();
        assert!(matches!(err, CliError::Config(_)));

        let err: CliError = SchemaError::duplicate("table", "user").into();
        assert!(matches!(err, CliError::Schema(_)));
    }

    #[test]
    fn test_migration_error_mapping() {
        let err: CliError = MigrationError::invalid_schema("shop", "empty table").into();
        assert!(matches!(err, CliError::Validation(_)));

        let err: CliError = MigrationError::value_coercion("age", "x", "int32").into();
        assert!(err.to_string().contains("age"));
    }
}
