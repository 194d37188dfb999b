//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `catalog` - Built-in product list
//! - `postgres` - Catalog source and session recorder over PostgreSQL
//! - `recorder` - Log-only and in-memory session recorders
//! - `session_store` - In-memory session store with idle eviction
//! - `http` - axum JSON API

pub mod catalog;
pub mod http;
pub mod postgres;
pub mod recorder;
pub mod session_store;

pub use catalog::StaticCatalogSource;
pub use postgres::{PostgresCatalogSource, PostgresSessionRecorder};
pub use recorder::{InMemorySessionRecorder, TracingSessionRecorder};
pub use session_store::InMemorySessionStore;
