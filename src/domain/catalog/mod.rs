//! Catalog domain module.
//!
//! Products, their tiers and disqualifying questions, and the
//! common-question table that links a question to other products.
//! Everything here is immutable once loaded and shared by all sessions.

mod builtin;
mod common_questions;
mod product;
mod tier;
mod validated;

pub use builtin::builtin_products;
pub use common_questions::{normalize_question, CommonQuestionTable, CommonQuestionTableError};
pub use product::{Product, Question};
pub use tier::Tier;
pub use validated::{Catalog, CatalogError};
