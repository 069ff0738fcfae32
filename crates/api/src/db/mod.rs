//! Shared database schema, migrations, and query builders.

pub mod groups;
pub mod migrations;
pub mod revenue;
pub mod sales;
pub mod tables;
pub mod users;

// Re-export tables for convenience
pub use tables::*;

/// A built query: SQL text plus its bind values.
pub type Built = (String, sea_query::Values);
