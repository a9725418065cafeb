//! Column definitions for the schema AST.

use serde::{Deserialize, Serialize};

use super::{ColumnType, Reference};

/// A table column.
///
/// `default_value` and `on_update` are kept as raw literals. An empty string
/// means "not set"; the comparator only ever compares them for equality.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    /// Column name.
    pub name: String,
    /// Logical type tag.
    #[serde(rename = "type", default)]
    pub column_type: ColumnType,
    /// Column comment.
    #[serde(default)]
    pub description: String,
    /// Length or precision; 0 when not applicable.
    #[serde(default)]
    pub size: u32,
    /// Decimal scale; 0 when not applicable.
    #[serde(default)]
    pub scale: u32,
    /// Whether the column is `NOT NULL`.
    #[serde(default)]
    pub not_null: bool,
    /// Whether the column is part of the primary key.
    #[serde(default)]
    pub primary_key: bool,
    /// Whether the column is part of the table's unique constraint.
    #[serde(default)]
    pub unique_key: bool,
    /// Whether the column is auto incremented.
    #[serde(default)]
    pub auto_incremental: bool,
    /// Default value literal.
    #[serde(default)]
    pub default_value: String,
    /// `ON UPDATE` literal (e.g. `CURRENT_TIMESTAMP`).
    #[serde(default)]
    pub on_update: String,
    /// Soft foreign-key reference.
    #[serde(rename = "ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<Reference>,
}

impl Column {
    /// Create a new nullable column without size.
    pub fn new(name: impl Into<String>, column_type: impl Into<ColumnType>) -> Self {
        Self {
            name: name.into(),
            column_type: column_type.into(),
            ..Self::default()
        }
    }

    /// Get the column name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set the size (length or precision).
    pub fn with_size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }

    /// Set the decimal scale.
    pub fn with_scale(mut self, scale: u32) -> Self {
        self.scale = scale;
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Mark the column `NOT NULL`.
    pub fn not_null(mut self) -> Self {
        self.not_null = true;
        self
    }

    /// Mark the column as (part of) the primary key.
    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self.not_null = true;
        self
    }

    /// Mark the column as part of the unique constraint.
    pub fn unique(mut self) -> Self {
        self.unique_key = true;
        self
    }

    /// Mark the column as auto incremented.
    pub fn auto_increment(mut self) -> Self {
        self.auto_incremental = true;
        self
    }

    /// Set the default value literal.
    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default_value = value.into();
        self
    }

    /// Set the `ON UPDATE` literal.
    pub fn with_on_update(mut self, value: impl Into<String>) -> Self {
        self.on_update = value.into();
        self
    }

    /// Set the reference.
    pub fn with_reference(mut self, reference: Reference) -> Self {
        self.reference = Some(reference);
        self
    }

    /// Check if a default value is set.
    pub fn has_default(&self) -> bool {
        !self.default_value.is_empty()
    }

    /// Check if the type, size or scale differ from another column.
    pub fn type_differs(&self, other: &Column) -> bool {
        self.column_type != other.column_type || self.size != other.size || self.scale != other.scale
    }

    /// Check whether this column could be `other` under a different name.
    ///
    /// Every structural attribute must match; the description only counts
    /// when comments are compared.
    pub fn is_renamed_from(&self, other: &Column, compare_comments: bool) -> bool {
        self.column_type == other.column_type
            && self.size == other.size
            && self.scale == other.scale
            && self.not_null == other.not_null
            && self.primary_key == other.primary_key
            && self.unique_key == other.unique_key
            && self.auto_incremental == other.auto_incremental
            && self.default_value == other.default_value
            && (!compare_comments || self.description == other.description)
    }

    /// Deep equality where a reference to `own_table` on this side matches a
    /// reference to `other_table` on the other side.
    pub(crate) fn same_structure(&self, other: &Column, own_table: &str, other_table: &str) -> bool {
        let references_match = match (&self.reference, &other.reference) {
            (Some(a), Some(b)) if a.is_self_reference(own_table) && b.is_self_reference(other_table) => {
                a.column == b.column && a.relationship == b.relationship
            }
            (a, b) => a == b,
        };

        references_match
            && self.name == other.name
            && self.column_type == other.column_type
            && self.description == other.description
            && self.size == other.size
            && self.scale == other.scale
            && self.not_null == other.not_null
            && self.primary_key == other.primary_key
            && self.unique_key == other.unique_key
            && self.auto_incremental == other.auto_incremental
            && self.default_value == other.default_value
            && self.on_update == other.on_update
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn login_name() -> Column {
        Column::new("login_name", ColumnType::Varchar)
            .with_size(40)
            .not_null()
    }

    #[test]
    fn test_builder_defaults() {
        let col = Column::new("id", ColumnType::Int64).primary_key().auto_increment();
        assert!(col.primary_key);
        assert!(col.not_null);
        assert!(col.auto_incremental);
        assert!(!col.unique_key);
        assert!(!col.has_default());
    }

    #[test]
    fn test_is_renamed_ignores_name() {
        let old = login_name();
        let mut new = login_name();
        new.name = "name".to_string();
        assert!(new.is_renamed_from(&old, true));
    }

    #[test]
    fn test_is_renamed_requires_same_attributes() {
        let old = login_name();
        let new = Column::new("name", ColumnType::Varchar).with_size(64).not_null();
        assert!(!new.is_renamed_from(&old, false));

        let new = Column::new("name", ColumnType::Varchar)
            .with_size(40)
            .not_null()
            .with_default("guest");
        assert!(!new.is_renamed_from(&old, false));
    }

    #[test]
    fn test_is_renamed_description_only_with_comments() {
        let old = login_name().with_description("login");
        let mut new = login_name().with_description("display name");
        new.name = "name".to_string();

        assert!(new.is_renamed_from(&old, false));
        assert!(!new.is_renamed_from(&old, true));
    }

    #[test]
    fn test_type_differs() {
        let a = Column::new("price", ColumnType::Decimal).with_size(10).with_scale(2);
        let b = a.clone().with_scale(4);
        assert!(a.type_differs(&b));
        assert!(!a.type_differs(&a.clone()));
    }

    #[test]
    fn test_same_structure_with_self_reference() {
        let a = Column::new("parent_id", ColumnType::Int64).with_reference(Reference::new("category", "id"));
        let b = Column::new("parent_id", ColumnType::Int64).with_reference(Reference::new("tag", "id"));

        assert!(a.same_structure(&b, "category", "tag"));
        assert!(!a.same_structure(&b, "category", "category"));
    }

    #[test]
    fn test_json_keys() {
        let json = r#"{"name":"id","type":"int64","notNull":true,"primaryKey":true,"autoIncremental":true}"#;
        let col: Column = serde_json::from_str(json).unwrap();
        assert_eq!(col.column_type, ColumnType::Int64);
        assert!(col.primary_key);
        assert!(col.auto_incremental);
        assert_eq!(col.default_value, "");
        assert!(col.reference.is_none());
    }
}
