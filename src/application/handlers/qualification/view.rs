//! Read model shared by the qualification handlers.
//!
//! A `QualificationView` is what a client sees of a session: where it
//! stands, what to answer next, and how it ended. Handlers that change a
//! session also return the events of that change and the recorder failures
//! reported while the request waited.

use serde::Serialize;

use super::recording::RecorderFailure;
use crate::domain::catalog::{Product, Tier};
use crate::domain::foundation::{Percentage, ProductId, QuestionId, SessionId, Timestamp};
use crate::domain::qualification::{
    QualificationEngine, QualificationEvent, QualificationSession, QualificationStatus,
};

/// Snapshot of a session for clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QualificationView {
    pub session_id: SessionId,
    pub status: QualificationStatus,
    pub current_question: Option<CurrentQuestionView>,
    pub progress: Percentage,
    pub qualified_product: Option<ProductSummary>,
    /// Products skipped by a common question, by name.
    pub skipped_products: Vec<String>,
    pub started_at: Timestamp,
}

/// The question awaiting an answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrentQuestionView {
    pub product_id: ProductId,
    pub product_name: String,
    pub question_id: QuestionId,
    pub text: String,
    /// Zero-based position within the product.
    pub index: usize,
    pub total_for_product: usize,
}

/// Public description of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductSummary {
    pub id: ProductId,
    pub name: String,
    pub tier: Tier,
    pub description: String,
    pub benefits: Vec<String>,
    pub question_count: usize,
}

impl From<&Product> for ProductSummary {
    fn from(product: &Product) -> Self {
        Self {
            id: *product.id(),
            name: product.name().to_string(),
            tier: product.tier(),
            description: product.description().to_string(),
            benefits: product.benefits().to_vec(),
            question_count: product.question_count(),
        }
    }
}

impl QualificationView {
    pub fn from_session(engine: &QualificationEngine, session: &QualificationSession) -> Self {
        let current_question = engine.current_product(session).and_then(|product| {
            let index = session.current_question_index();
            product.question(index).map(|question| CurrentQuestionView {
                product_id: *product.id(),
                product_name: product.name().to_string(),
                question_id: *question.id(),
                text: question.text().to_string(),
                index,
                total_for_product: product.question_count(),
            })
        });

        Self {
            session_id: *session.id(),
            status: session.status(),
            current_question,
            progress: engine.progress(session),
            qualified_product: engine.qualified_product(session).map(ProductSummary::from),
            skipped_products: session.auto_disqualified_products().iter().cloned().collect(),
            started_at: *session.started_at(),
        }
    }
}

/// Result of a handler that moved a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QualificationOutcome {
    pub view: QualificationView,
    pub events: Vec<QualificationEvent>,
    pub recorder_failures: Vec<RecorderFailure>,
}
