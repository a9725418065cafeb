//! Error types for schema loading and configuration.

// These warnings are false positives - the fields are used by derive macros
#![allow(unused_assignments)]

use miette::Diagnostic;
use thiserror::Error;

/// Result type for schema operations.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors that can occur while loading schemas and configuration.
#[derive(Error, Debug, Diagnostic)]
pub enum SchemaError {
    /// Error reading a file.
    #[error("failed to read file: {path}")]
    #[diagnostic(code(schemashift::schema::io_error))]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Malformed schema document.
    #[error("invalid schema document `{path}`: {source}")]
    #[diagnostic(
        code(schemashift::schema::json_error),
        help("schema documents are JSON objects with `name` and `tables`")
    )]
    JsonError {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// Duplicate definition.
    #[error("duplicate {kind} `{name}`")]
    #[diagnostic(code(schemashift::schema::duplicate))]
    Duplicate { kind: String, name: String },

    /// Table without columns.
    #[error("table `{table}` has no columns")]
    #[diagnostic(code(schemashift::schema::empty_table))]
    EmptyTable { table: String },

    /// Reference to a table or column that does not exist.
    #[error("column `{table}.{column}` references unknown `{target}`")]
    #[diagnostic(code(schemashift::schema::unknown_reference))]
    UnknownReference {
        table: String,
        column: String,
        target: String,
    },

    /// Validation error with multiple issues.
    #[error("schema validation failed with {count} error(s)")]
    #[diagnostic(code(schemashift::schema::validation_failed))]
    ValidationFailed {
        count: usize,
        #[related]
        errors: Vec<SchemaError>,
    },

    /// Configuration error.
    #[error("configuration error: {message}")]
    #[diagnostic(code(schemashift::schema::config_error))]
    ConfigError { message: String },

    /// TOML parsing error.
    #[error("failed to parse TOML")]
    #[diagnostic(code(schemashift::schema::toml_error))]
    TomlError {
        #[source]
        source: toml::de::Error,
    },
}

impl SchemaError {
    /// Create a JSON error for an in-memory document.
    pub fn json(source: serde_json::Error) -> Self {
        Self::JsonError {
            path: "<input>".to_string(),
            source,
        }
    }

    /// Create a duplicate definition error.
    pub fn duplicate(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Duplicate {
            kind: kind.into(),
            name: name.into(),
        }
    }

    /// Create an unknown reference error.
    pub fn unknown_reference(
        table: impl Into<String>,
        column: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self::UnknownReference {
            table: table.into(),
            column: column.into(),
            target: target.into(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }
}

#[cfg(test)]
#[allow(unused_assignments)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_error() {
        let err = SchemaError::duplicate("table", "user");

        match err {
            SchemaError::Duplicate { kind, name } => {
                assert_eq!(kind, "table");
                assert_eq!(name, "user");
            }
            _ => panic!("Expected Duplicate"),
        }
    }

    #[test]
    fn test_io_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = SchemaError::IoError {
            path: "schema.json".to_string(),
            source: io_err,
        };

        let display = format!("{}", err);
        assert!(display.contains("schema.json"));
    }

    #[test]
    fn test_json_error_display() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = SchemaError::json(source);
        let display = format!("{}", err);
        assert!(display.contains("<input>"));
    }

    #[test]
    fn test_unknown_reference_display() {
        let err = SchemaError::unknown_reference("order", "user_id", "account.id");
        let display = format!("{}", err);
        assert!(display.contains("order.user_id"));
        assert!(display.contains("account.id"));
    }

    #[test]
    fn test_validation_failed_display() {
        let err = SchemaError::ValidationFailed {
            count: 3,
            errors: vec![],
        };
        let display = format!("{}", err);
        assert!(display.contains("3"));
    }

    #[test]
    fn test_config_error_display() {
        let err = SchemaError::config("unknown output format");
        let display = format!("{}", err);
        assert!(display.contains("unknown output format"));
    }
}
