//! Database initialization and schema

pub mod init;
pub mod schema;

pub use init::{init_database, init_memory_database};
pub use schema::{create_schema, SCHEMA_VERSION};
