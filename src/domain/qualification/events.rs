//! Events emitted by qualification transitions.
//!
//! Events are returned from each transition in the order they happened. The
//! presentation layer renders them; the application layer derives recorder
//! calls from the terminal ones.

use serde::{Deserialize, Serialize};

use crate::domain::catalog::{Product, Question};
use crate::domain::foundation::{Percentage, ProductId, QuestionId};

/// Something the applicant should be told about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QualificationEvent {
    /// A question is now awaiting an answer.
    QuestionPresented {
        product_id: ProductId,
        product_name: String,
        question_id: QuestionId,
        question: String,
        /// Zero-based position within the product's questions.
        index_in_product: usize,
        total_for_product: usize,
    },

    /// The applicant answered "yes" to one of this product's questions.
    Disqualified {
        product_id: ProductId,
        product_name: String,
    },

    /// Skipped without asking: an earlier common question already ruled it out.
    AutoDisqualified {
        product_id: ProductId,
        product_name: String,
    },

    /// Every question of this product was answered "no".
    Qualified {
        product_id: ProductId,
        product_name: String,
    },

    /// No product remains.
    Exhausted,

    ProgressChanged { percent: Percentage },
}

impl QualificationEvent {
    pub(crate) fn question_presented(product: &Product, index: usize, question: &Question) -> Self {
        QualificationEvent::QuestionPresented {
            product_id: *product.id(),
            product_name: product.name().to_string(),
            question_id: *question.id(),
            question: question.text().to_string(),
            index_in_product: index,
            total_for_product: product.question_count(),
        }
    }

    pub(crate) fn disqualified(product: &Product) -> Self {
        QualificationEvent::Disqualified {
            product_id: *product.id(),
            product_name: product.name().to_string(),
        }
    }

    pub(crate) fn auto_disqualified(product: &Product) -> Self {
        QualificationEvent::AutoDisqualified {
            product_id: *product.id(),
            product_name: product.name().to_string(),
        }
    }

    pub(crate) fn qualified(product: &Product) -> Self {
        QualificationEvent::Qualified {
            product_id: *product.id(),
            product_name: product.name().to_string(),
        }
    }

    /// Short name used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            QualificationEvent::QuestionPresented { .. } => "question_presented",
            QualificationEvent::Disqualified { .. } => "disqualified",
            QualificationEvent::AutoDisqualified { .. } => "auto_disqualified",
            QualificationEvent::Qualified { .. } => "qualified",
            QualificationEvent::Exhausted => "exhausted",
            QualificationEvent::ProgressChanged { .. } => "progress_changed",
        }
    }

    /// True for the events that end a session.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            QualificationEvent::Qualified { .. } | QualificationEvent::Exhausted
        )
    }
}

/// The question an answer was given to, as handed to the session recorder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnsweredQuestion {
    pub product_id: ProductId,
    pub question_id: QuestionId,
    pub question: String,
    pub answer: bool,
}
