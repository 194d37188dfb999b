//! PostgreSQL implementation of CatalogSource.
//!
//! Reads `insurance_products` and `disqualifying_questions` and assembles
//! them into tier-ordered products.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use std::collections::HashMap;
use uuid::Uuid;

use crate::domain::catalog::{Product, Question, Tier};
use crate::domain::foundation::{DomainError, ProductId, QuestionId};
use crate::ports::CatalogSource;

/// PostgreSQL implementation of CatalogSource.
#[derive(Clone)]
pub struct PostgresCatalogSource {
    pool: PgPool,
}

impl PostgresCatalogSource {
    /// Creates a new PostgresCatalogSource.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogSource for PostgresCatalogSource {
    async fn list_products(&self) -> Result<Vec<Product>, DomainError> {
        // Tier is stored as text; sorting on the column itself would be
        // alphabetical, so rank it explicitly.
        let product_rows = sqlx::query(
            r#"
            SELECT id, name, tier, description, benefits
            FROM insurance_products
            ORDER BY
                CASE lower(tier)
                    WHEN 'preferred' THEN 0
                    WHEN 'standard' THEN 1
                    WHEN 'graded' THEN 2
                    WHEN 'modified' THEN 3
                    ELSE 4
                END,
                name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch products", e))?;

        let question_rows = sqlx::query(
            r#"
            SELECT id, product_id, question_text
            FROM disqualifying_questions
            ORDER BY product_id, question_order NULLS LAST, id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch questions", e))?;

        let mut questions_by_product: HashMap<Uuid, Vec<Question>> = HashMap::new();
        for row in question_rows {
            let (product_id, question) = row_to_question(&row)?;
            questions_by_product.entry(product_id).or_default().push(question);
        }

        let mut products = Vec::with_capacity(product_rows.len());
        for row in product_rows {
            let mut product = row_to_product(&row)?;
            if let Some(questions) = questions_by_product.remove(product.id().as_uuid()) {
                for question in questions {
                    product = product.with_question(question);
                }
            }
            products.push(product);
        }

        tracing::debug!(products = products.len(), "Loaded catalog from database");
        Ok(products)
    }
}

/// Reads one column, naming it in the error when the row doesn't match.
fn column<'r, T>(row: &'r PgRow, name: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    row.try_get(name)
        .map_err(|e| DomainError::database(&format!("Failed to read column {}", name), e))
}

fn str_to_tier(s: &str) -> Result<Tier, DomainError> {
    s.parse::<Tier>()
        .map_err(|e| DomainError::from(e).with_detail("table", "insurance_products"))
}

fn row_to_product(row: &PgRow) -> Result<Product, DomainError> {
    let id: Uuid = column(row, "id")?;
    let tier = str_to_tier(&column::<String>(row, "tier")?)?;
    let description: Option<String> = column(row, "description")?;
    let benefits: Option<Vec<String>> = column(row, "benefits")?;

    Ok(Product::new(ProductId::from_uuid(id), column::<String>(row, "name")?, tier)
        .with_description(description.unwrap_or_default())
        .with_benefits(benefits.unwrap_or_default()))
}

fn row_to_question(row: &PgRow) -> Result<(Uuid, Question), DomainError> {
    let id: Uuid = column(row, "id")?;
    let product_id: Uuid = column(row, "product_id")?;
    let text: String = column(row, "question_text")?;
    Ok((product_id, Question::new(QuestionId::from_uuid(id), text)))
}
