//! Error types for the migration generator.

use thiserror::Error;

use crate::change::ChangeKind;

/// Result type alias for migration operations.
pub type MigrateResult<T> = Result<T, MigrationError>;

/// Errors that can occur while comparing schemas or rendering changesets.
#[derive(Debug, Error)]
pub enum MigrationError {
    /// File system error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An input schema failed validation.
    #[error("Invalid schema '{schema}': {message}")]
    InvalidSchema {
        /// Schema name.
        schema: String,
        /// Validation summary.
        message: String,
    },

    /// A renderer cannot express a change.
    #[error("{kind} is not supported by the {target} renderer")]
    UnsupportedChange {
        /// The change kind.
        kind: ChangeKind,
        /// The renderer name.
        target: &'static str,
    },

    /// A default value literal does not fit the column type.
    #[error("Cannot use default value '{value}' for column '{column}' of type {column_type}")]
    ValueCoercion {
        /// Column name.
        column: String,
        /// The literal.
        value: String,
        /// The column's logical type.
        column_type: String,
    },

    /// Rendering failed.
    #[error("Render error: {0}")]
    Render(String),

    /// Serialization failed.
    #[error("Serialization error: {0}")]
    Serialize(String),
}

impl MigrationError {
    /// Create an invalid schema error.
    pub fn invalid_schema(schema: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidSchema {
            schema: schema.into(),
            message: message.into(),
        }
    }

    /// Create a value coercion error.
    pub fn value_coercion(
        column: impl Into<String>,
        value: impl Into<String>,
        column_type: impl Into<String>,
    ) -> Self {
        Self::ValueCoercion {
            column: column.into(),
            value: value.into(),
            column_type: column_type.into(),
        }
    }

    /// Create a render error.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Check if this error only concerns a single output target.
    pub fn is_target_specific(&self) -> bool {
        matches!(self, Self::UnsupportedChange { .. } | Self::ValueCoercion { .. })
    }
}

impl From<serde_yaml::Error> for MigrationError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Serialize(err.to_string())
    }
}

impl From<serde_json::Error> for MigrationError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialize(err.to_string())
    }
}
