//! Logical column types.

use serde::{Deserialize, Serialize};

/// A normalized logical column type tag.
///
/// Type tags are database independent; renderers map them to concrete
/// database types. Unknown tags are preserved in [`ColumnType::Other`] so a
/// schema written by a newer tool still loads and compares by string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ColumnType {
    /// Boolean flag.
    Bool,
    /// 8-bit signed integer.
    Int8,
    /// 16-bit signed integer.
    Int16,
    /// 32-bit signed integer.
    Int32,
    /// 64-bit signed integer.
    Int64,
    /// 8-bit unsigned integer.
    Uint8,
    /// 16-bit unsigned integer.
    Uint16,
    /// 32-bit unsigned integer.
    Uint32,
    /// 64-bit unsigned integer.
    Uint64,
    /// Single precision float.
    Float32,
    /// Double precision float.
    Float64,
    /// Fixed point decimal (`size` is the precision, `scale` the scale).
    Decimal,
    /// Fixed length string.
    Char,
    /// Variable length string (`size` is the maximum length).
    #[default]
    Varchar,
    /// Text.
    Text,
    /// Medium text.
    MediumText,
    /// Long text.
    LongText,
    /// Calendar date.
    Date,
    /// Time of day.
    Time,
    /// Date and time.
    DateTime,
    /// Timestamp.
    Timestamp,
    /// JSON document.
    Json,
    /// Fixed length binary.
    Binary,
    /// Binary large object.
    Blob,
    /// UUID.
    Uuid,
    /// A tag this version does not know about.
    Other(String),
}

impl ColumnType {
    /// Get the canonical tag of this type.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Bool => "bool",
            Self::Int8 => "int8",
            Self::Int16 => "int16",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Uint8 => "uint8",
            Self::Uint16 => "uint16",
            Self::Uint32 => "uint32",
            Self::Uint64 => "uint64",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
            Self::Decimal => "decimal",
            Self::Char => "char",
            Self::Varchar => "varchar",
            Self::Text => "text",
            Self::MediumText => "mediumtext",
            Self::LongText => "longtext",
            Self::Date => "date",
            Self::Time => "time",
            Self::DateTime => "datetime",
            Self::Timestamp => "timestamp",
            Self::Json => "json",
            Self::Binary => "binary",
            Self::Blob => "blob",
            Self::Uuid => "uuid",
            Self::Other(tag) => tag,
        }
    }

    /// Check if this is an integer type.
    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            Self::Int8
                | Self::Int16
                | Self::Int32
                | Self::Int64
                | Self::Uint8
                | Self::Uint16
                | Self::Uint32
                | Self::Uint64
        )
    }

    /// Check if this is any numeric type.
    pub fn is_numeric(&self) -> bool {
        self.is_integer() || matches!(self, Self::Float32 | Self::Float64 | Self::Decimal)
    }

    /// Check if this is a string type.
    pub fn is_string(&self) -> bool {
        matches!(
            self,
            Self::Char | Self::Varchar | Self::Text | Self::MediumText | Self::LongText
        )
    }

    /// Check if this is a date or time type.
    pub fn is_temporal(&self) -> bool {
        matches!(
            self,
            Self::Date | Self::Time | Self::DateTime | Self::Timestamp
        )
    }
}

impl From<&str> for ColumnType {
    fn from(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "bool" | "boolean" => Self::Bool,
            "int8" => Self::Int8,
            "int16" => Self::Int16,
            "int32" | "int" => Self::Int32,
            "int64" => Self::Int64,
            "uint8" => Self::Uint8,
            "uint16" => Self::Uint16,
            "uint32" => Self::Uint32,
            "uint64" => Self::Uint64,
            "float32" | "float" => Self::Float32,
            "float64" | "double" => Self::Float64,
            "decimal" => Self::Decimal,
            "char" => Self::Char,
            "varchar" => Self::Varchar,
            "text" => Self::Text,
            "mediumtext" => Self::MediumText,
            "longtext" => Self::LongText,
            "date" => Self::Date,
            "time" => Self::Time,
            "datetime" => Self::DateTime,
            "timestamp" => Self::Timestamp,
            "json" => Self::Json,
            "binary" => Self::Binary,
            "blob" => Self::Blob,
            "uuid" => Self::Uuid,
            _ => Self::Other(tag.to_string()),
        }
    }
}

impl From<String> for ColumnType {
    fn from(tag: String) -> Self {
        Self::from(tag.as_str())
    }
}

impl From<ColumnType> for String {
    fn from(ty: ColumnType) -> Self {
        ty.as_str().to_string()
    }
}

impl std::fmt::Display for ColumnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
