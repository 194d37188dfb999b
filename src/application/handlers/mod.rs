//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod qualification;

pub use qualification::{
    // Commands and queries
    AnswerQuestionCommand,
    GetQualificationQuery,
    RestartQualificationCommand,
    // Handlers
    AnswerQuestionHandler,
    GetQualificationHandler,
    ListProductsHandler,
    RestartQualificationHandler,
    StartQualificationHandler,
    // Results and views
    CurrentQuestionView,
    ProductSummary,
    QualificationOutcome,
    QualificationView,
    RecorderFailure,
    RecorderOperation,
    RestartQualificationResult,
};
