//! Qualification domain module.
//!
//! The state machine that walks an applicant through disqualifying questions
//! across tier-ordered products and settles on the best product they
//! qualify for, or on none.
//!
//! # Events
//!
//! - `QuestionPresented` - A question awaits an answer
//! - `Disqualified` - A "yes" removed the current product
//! - `AutoDisqualified` - A later product was skipped by a common question
//! - `Qualified` - Every question of a product was answered "no"
//! - `Exhausted` - No product remains
//! - `ProgressChanged` - Overall progress moved

mod engine;
mod errors;
mod events;
mod session;
mod status;

pub use engine::{QualificationEngine, Transition};
pub use errors::QualificationError;
pub use events::{AnsweredQuestion, QualificationEvent};
pub use session::QualificationSession;
pub use status::QualificationStatus;
