//! Qualification session state record.
//!
//! A session is a plain value. The engine never mutates the session it is
//! given; each transition clones it and returns the successor. Once the
//! status is terminal no further transition is accepted.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::QualificationStatus;
use crate::domain::foundation::{
    ProductId, SessionId, StateMachine, Timestamp, ValidationError,
};

/// State of one qualification run.
///
/// # Invariants
///
/// - `current_product_index <= products.len()`
/// - `current_question_index` is reset to 0 whenever the product changes
/// - `qualified_product` is set iff status is `Qualified`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualificationSession {
    id: SessionId,
    status: QualificationStatus,
    current_product_index: usize,
    current_question_index: usize,
    /// Question texts already presented. Only used for progress.
    asked_questions: BTreeSet<String>,
    /// Product names skipped through the common-question table.
    auto_disqualified_products: BTreeSet<String>,
    /// Question text → answer, last write wins.
    responses: BTreeMap<String, bool>,
    qualified_product: Option<ProductId>,
    started_at: Timestamp,
}

impl QualificationSession {
    /// Creates a session positioned on the first question of the first product.
    pub(crate) fn new(id: SessionId) -> Self {
        Self {
            id,
            status: QualificationStatus::InProgress,
            current_product_index: 0,
            current_question_index: 0,
            asked_questions: BTreeSet::new(),
            auto_disqualified_products: BTreeSet::new(),
            responses: BTreeMap::new(),
            qualified_product: None,
            started_at: Timestamp::now(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn status(&self) -> QualificationStatus {
        self.status
    }

    pub fn is_complete(&self) -> bool {
        self.status.is_complete()
    }

    pub fn current_product_index(&self) -> usize {
        self.current_product_index
    }

    pub fn current_question_index(&self) -> usize {
        self.current_question_index
    }

    pub fn asked_questions(&self) -> &BTreeSet<String> {
        &self.asked_questions
    }

    pub fn auto_disqualified_products(&self) -> &BTreeSet<String> {
        &self.auto_disqualified_products
    }

    pub fn is_auto_disqualified(&self, product_name: &str) -> bool {
        self.auto_disqualified_products.contains(product_name)
    }

    pub fn responses(&self) -> &BTreeMap<String, bool> {
        &self.responses
    }

    /// Returns the recorded answer for a question text.
    pub fn response(&self, question: &str) -> Option<bool> {
        self.responses.get(question).copied()
    }

    pub fn qualified_product(&self) -> Option<&ProductId> {
        self.qualified_product.as_ref()
    }

    pub fn started_at(&self) -> &Timestamp {
        &self.started_at
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Transition steps (engine only)
    // ─────────────────────────────────────────────────────────────────────────

    pub(crate) fn record_response(&mut self, question: &str, value: bool) {
        self.asked_questions.insert(question.to_string());
        self.responses.insert(question.to_string(), value);
    }

    pub(crate) fn auto_disqualify<I>(&mut self, product_names: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.auto_disqualified_products.extend(product_names);
    }

    pub(crate) fn advance_question(&mut self) {
        self.current_question_index += 1;
    }

    pub(crate) fn move_to_product(&mut self, index: usize) {
        self.current_product_index = index;
        self.current_question_index = 0;
    }

    pub(crate) fn finish_qualified(&mut self, product: ProductId) -> Result<(), ValidationError> {
        self.status = self.status.transition_to(QualificationStatus::Qualified)?;
        self.qualified_product = Some(product);
        Ok(())
    }

    /// Marks the run exhausted; `product_count` parks the index past the end.
    pub(crate) fn finish_exhausted(&mut self, product_count: usize) -> Result<(), ValidationError> {
        self.status = self.status.transition_to(QualificationStatus::Exhausted)?;
        self.current_product_index = product_count;
        self.current_question_index = 0;
        self.qualified_product = None;
        Ok(())
    }
}
