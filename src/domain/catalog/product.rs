//! Product and question entities.
//!
//! Products are immutable once loaded. Questions keep the order the catalog
//! supplied them in, which is the order they are asked.

use serde::{Deserialize, Serialize};

use super::Tier;
use crate::domain::foundation::{ProductId, QuestionId};

/// A yes/no disqualifying question. Answering "yes" disqualifies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    id: QuestionId,
    text: String,
}

impl Question {
    pub fn new(id: QuestionId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
        }
    }

    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// An insurance product with its ordered disqualifying questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    name: String,
    tier: Tier,
    description: String,
    benefits: Vec<String>,
    questions: Vec<Question>,
}

impl Product {
    /// Creates a product with no description, benefits or questions.
    pub fn new(id: ProductId, name: impl Into<String>, tier: Tier) -> Self {
        Self {
            id,
            name: name.into(),
            tier,
            description: String::new(),
            benefits: Vec::new(),
            questions: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_benefits<I, S>(mut self, benefits: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.benefits = benefits.into_iter().map(Into::into).collect();
        self
    }

    /// Appends a question with an explicit id.
    pub fn with_question(mut self, question: Question) -> Self {
        self.questions.push(question);
        self
    }

    /// Appends questions by text, deriving ids from product name and text.
    pub fn with_question_texts<I, S>(mut self, texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for text in texts {
            let text = text.into();
            let id = QuestionId::derived(&self.name, &text);
            self.questions.push(Question::new(id, text));
        }
        self
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &ProductId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tier(&self) -> Tier {
        self.tier
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn benefits(&self) -> &[String] {
        &self.benefits
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Returns the question at `index`, if any.
    pub fn question(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    /// A product with no questions is qualified without asking anything.
    pub fn has_questions(&self) -> bool {
        !self.questions.is_empty()
    }
}
