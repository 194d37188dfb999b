//! Catalog adapters that need no external storage.

mod static_source;

pub use static_source::StaticCatalogSource;
