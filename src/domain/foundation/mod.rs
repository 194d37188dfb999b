//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and error types that the catalog
//! and qualification modules build on.

mod errors;
mod ids;
mod percentage;
mod state_machine;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{ProductId, QuestionId, SessionId};
pub use percentage::Percentage;
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
