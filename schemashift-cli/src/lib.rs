//! schemashift CLI - compare schema snapshots and emit migration changesets.
//!
//! This crate provides the `schemashift` binary: schema validation, schema
//! comparison and rendering of the resulting changesets.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
