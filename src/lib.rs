//! # schemashift
//!
//! Compare two versions of a database schema and generate the ordered
//! migration changesets that turn one into the other.
//!
//! schemashift provides:
//! - A database independent schema model loaded from JSON
//! - A comparator with table and column rename detection
//! - `major[-minor]` versioned changesets
//! - Renderers for MySQL DDL, Liquibase YAML, Markdown and JSON
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use schemashift::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let from = parse_schema_file("schema/v1.json")?;
//!     let to = parse_schema_file("schema/v2.json")?;
//!
//!     let result = SchemaDiffer::new(DiffOptions::new().compare_comments(true))
//!         .diff(&from, &to)?;
//!
//!     for change_set in &result.change_sets {
//!         println!("{} by {}", change_set.id, change_set.author);
//!     }
//!     print!("{}", SqlRenderer::new().render(&result)?);
//!     Ok(())
//! }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// Schema model, loading and configuration.
pub mod schema {
    pub use schemashift_schema::*;
}

/// Comparison, changesets and renderers.
pub mod migrate {
    pub use schemashift_migrate::*;
}

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::migrate::{
        Change, ChangeKind, ChangeSet, DiffOptions, DiffResult, MarkdownRenderer, Renderer,
        SchemaDiffer, SqlRenderer, YamlRenderer,
    };
    pub use crate::schema::{
        Column, ColumnType, Schema, SchemashiftConfig, Table, TableFilter, parse_schema,
        parse_schema_file,
    };
}

// Re-export key types at the crate root
pub use migrate::{MigrationError, diff};
pub use schema::{Schema, SchemaError};
