//! Schema model types.
//!
//! Schemas are loaded wholesale and treated as read-only values; the only
//! behavior here is structural queries.

mod column;
mod reference;
mod schema;
mod table;
mod types;

pub use column::*;
pub use reference::*;
pub use schema::*;
pub use table::*;
pub use types::*;
