//! # schemashift-migrate
//!
//! Migration changeset generation for schemashift.
//!
//! This crate provides functionality for:
//! - Comparing two schema snapshots table by table and column by column
//! - Heuristic table and column rename detection
//! - Grouping changes into `major[-minor]` versioned changesets
//! - Rendering changesets as MySQL DDL, a Liquibase YAML changelog,
//!   a Markdown report or JSON
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐     ┌────────────────┐     ┌─────────────┐
//! │ Schema v1/v2 │────▶│ Schema Differ  │────▶│ Renderer    │
//! └──────────────┘     └────────────────┘     └─────────────┘
//!                              │
//!                              ▼
//!                      ┌────────────────┐
//!                      │ ChangeSets     │
//!                      └────────────────┘
//! ```
//!
//! The comparator is pure: it never touches the file system or a database and
//! returns the same changesets for the same inputs.
//!
//! ## Example
//!
//! ```rust,ignore
//! use schemashift_migrate::{DiffOptions, Renderer, SchemaDiffer, SqlRenderer};
//! use schemashift_schema::{parse_schema_file, TableFilter};
//!
//! let from = parse_schema_file("schema/v1.json")?;
//! let to = parse_schema_file("schema/v2.json")?;
//!
//! let options = DiffOptions::new()
//!     .table_filter(TableFilter::groups("billing,auth"))
//!     .compare_comments(true);
//!
//! let result = SchemaDiffer::new(options).diff(&from, &to)?;
//! println!("{}", result.summary());
//! println!("{}", SqlRenderer::new().render(&result)?);
//! ```
//!
//! ## Changeset ids
//!
//! Every table-level operation opens a new major number. Changes produced
//! while diffing one table share its major number and are ordered by minor
//! number (`3-1`, `3-2`, ...). Table drops and creates stand alone (`4`).

pub mod change;
pub mod changeset;
pub mod diff;
pub mod error;
pub mod render;
pub mod sequencer;

// Re-exports
pub use change::{Change, ChangeKind, KeyDelta};
pub use changeset::{ChangeSet, DiffResult};
pub use diff::{DiffOptions, SchemaDiffer, diff};
pub use error::{MigrateResult, MigrationError};
pub use render::{
    JsonRenderer, MarkdownRenderer, Rendered, Renderer, SqlRenderer, YamlRenderer, renderer_for,
};
pub use sequencer::VersionSequencer;
