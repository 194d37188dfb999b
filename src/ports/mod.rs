//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `CatalogSource` - Loads the tier-ordered product list
//! - `SessionRecorder` - Best-effort sink for answers and outcomes
//! - `SessionStore` - Keeps live sessions between requests and serializes
//!   access to each one

mod catalog_source;
mod session_recorder;
mod session_store;

pub use catalog_source::CatalogSource;
pub use session_recorder::SessionRecorder;
pub use session_store::{SessionLock, SessionLocks, SessionStore};
