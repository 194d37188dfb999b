//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates the qualification engine, the session store and
//! the session recorder. Command handlers move sessions; query handlers
//! only read.

pub mod handlers;

pub use handlers::{
    AnswerQuestionCommand, AnswerQuestionHandler, GetQualificationHandler, GetQualificationQuery,
    ListProductsHandler, QualificationOutcome, QualificationView, RecorderFailure,
    RestartQualificationCommand, RestartQualificationHandler, RestartQualificationResult,
    StartQualificationHandler,
};
