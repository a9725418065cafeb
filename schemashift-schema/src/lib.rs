//! # schemashift-schema
//!
//! Schema model and loading for schemashift.
//!
//! This crate provides:
//! - The schema model (`Schema`, `Table`, `Column`, `Reference`, `Index`)
//!   with the structural queries the comparator relies on
//! - JSON loading of schema documents
//! - Table filtering by group
//! - Configuration parser for `schemashift.toml` files
//! - Optional structural validation
//!
//! ## Example
//!
//! ```rust,ignore
//! use schemashift_schema::{parse_schema_file, validate_schema, SchemashiftConfig};
//!
//! let schema = parse_schema_file("schema/v2.json")?;
//! validate_schema(&schema)?;
//!
//! let config = SchemashiftConfig::from_file("schemashift.toml")?;
//! ```

pub mod ast;
pub mod config;
pub mod error;
pub mod filter;
pub mod loader;
pub mod validator;

pub use ast::*;
pub use config::{DiffConfig, OutputConfig, OutputFormat, SchemashiftConfig};
pub use error::{SchemaError, SchemaResult};
pub use filter::TableFilter;
pub use loader::{parse_schema, parse_schema_file, to_json};
pub use validator::{Validator, validate_schema};
