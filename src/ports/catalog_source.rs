//! Catalog source port.
//!
//! Supplies the product list a qualification flow runs over. Read once at
//! startup; the engine never calls back into it.

use async_trait::async_trait;

use crate::domain::catalog::Product;
use crate::domain::foundation::DomainError;

/// Port for loading the product catalog.
///
/// Implementations must return products ordered best tier first, each with
/// its questions in asking order.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// List every product with its questions.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` when the backing store cannot be read
    async fn list_products(&self) -> Result<Vec<Product>, DomainError>;
}
