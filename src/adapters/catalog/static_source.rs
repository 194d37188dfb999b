//! Catalog source backed by a fixed product list.

use async_trait::async_trait;

use crate::domain::catalog::{builtin_products, Product};
use crate::domain::foundation::DomainError;
use crate::ports::CatalogSource;

/// Serves a product list held in memory.
///
/// Used when no database is configured, and in tests that need a
/// hand-built catalog behind the `CatalogSource` port.
#[derive(Debug, Clone)]
pub struct StaticCatalogSource {
    products: Vec<Product>,
}

impl StaticCatalogSource {
    /// The four built-in products, best tier first.
    pub fn builtin() -> Self {
        Self {
            products: builtin_products(),
        }
    }

    pub fn with_products(products: Vec<Product>) -> Self {
        Self { products }
    }
}

impl Default for StaticCatalogSource {
    fn default() -> Self {
        Self::builtin()
    }
}

#[async_trait]
impl CatalogSource for StaticCatalogSource {
    async fn list_products(&self) -> Result<Vec<Product>, DomainError> {
        Ok(self.products.clone())
    }
}
