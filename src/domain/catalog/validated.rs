//! Validated, tier-ordered product catalog.

use std::collections::HashSet;
use thiserror::Error;

use super::{CommonQuestionTable, Product, Tier};
use crate::domain::foundation::{ErrorCode, ProductId};

/// Reasons a product list cannot back a qualification flow.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("Product '{product}' ({tier}) is listed after a {previous} product; catalog must be ordered best tier first")]
    TierOrder {
        product: String,
        tier: Tier,
        previous: Tier,
    },

    #[error("Product name '{0}' appears more than once")]
    DuplicateProduct(String),

    #[error("Product at position {0} has an empty name")]
    EmptyProductName(usize),

    #[error("Question {index} of product '{product}' has empty text")]
    EmptyQuestion { product: String, index: usize },
}

impl CatalogError {
    pub fn code(&self) -> ErrorCode {
        ErrorCode::InvalidCatalog
    }
}

/// The immutable product list and common-question table shared by every
/// session.
///
/// # Invariants
///
/// - products are ordered by tier rank, best first (ties allowed)
/// - product names are unique and non-empty
/// - question texts are non-empty
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    common_questions: CommonQuestionTable,
    distinct_question_count: usize,
}

impl Catalog {
    /// Validates and builds a catalog.
    pub fn new(
        products: Vec<Product>,
        common_questions: CommonQuestionTable,
    ) -> Result<Self, CatalogError> {
        let mut names = HashSet::new();
        let mut previous: Option<Tier> = None;

        for (position, product) in products.iter().enumerate() {
            if product.name().trim().is_empty() {
                return Err(CatalogError::EmptyProductName(position));
            }
            if !names.insert(product.name()) {
                return Err(CatalogError::DuplicateProduct(product.name().to_string()));
            }
            if let Some(prev) = previous {
                if product.tier().is_better_than(&prev) {
                    return Err(CatalogError::TierOrder {
                        product: product.name().to_string(),
                        tier: product.tier(),
                        previous: prev,
                    });
                }
            }
            previous = Some(product.tier());

            if let Some(index) = product
                .questions()
                .iter()
                .position(|q| q.text().trim().is_empty())
            {
                return Err(CatalogError::EmptyQuestion {
                    product: product.name().to_string(),
                    index,
                });
            }
        }

        for name in common_questions.referenced_products() {
            if !names.contains(name) {
                tracing::warn!(product = %name, "Common-question table references a product not in the catalog");
            }
        }

        let distinct_question_count = products
            .iter()
            .flat_map(|p| p.questions().iter().map(|q| q.text()))
            .collect::<HashSet<_>>()
            .len();

        Ok(Self {
            products,
            common_questions,
            distinct_question_count,
        })
    }

    /// A catalog with no products and an empty table.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn product(&self, index: usize) -> Option<&Product> {
        self.products.get(index)
    }

    pub fn product_by_id(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id() == id)
    }

    pub fn common_questions(&self) -> &CommonQuestionTable {
        &self.common_questions
    }

    /// Number of distinct question texts across the whole catalog.
    ///
    /// This is the fixed denominator of session progress.
    pub fn distinct_question_count(&self) -> usize {
        self.distinct_question_count
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
