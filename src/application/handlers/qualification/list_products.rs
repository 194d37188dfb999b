//! ListProductsHandler - Query handler for the product catalog.

use super::view::ProductSummary;
use crate::domain::qualification::QualificationEngine;

/// Handler for listing the catalog, best tier first.
pub struct ListProductsHandler {
    engine: QualificationEngine,
}

impl ListProductsHandler {
    pub fn new(engine: QualificationEngine) -> Self {
        Self { engine }
    }

    pub fn handle(&self) -> Vec<ProductSummary> {
        self.engine
            .catalog()
            .products()
            .iter()
            .map(ProductSummary::from)
            .collect()
    }
}
