//! PostgreSQL adapters - Database implementations for catalog and recorder ports.
//!
//! This module provides adapters for PostgreSQL-backed persistence:
//! - `PostgresCatalogSource` - Loads products and questions at startup
//! - `PostgresSessionRecorder` - Appends answers and outcomes

mod catalog_source;
mod session_recorder;

pub use catalog_source::PostgresCatalogSource;
pub use session_recorder::PostgresSessionRecorder;
