//! Qualification command and query handlers.

mod answer_question;
mod get_qualification;
mod list_products;
mod recording;
mod restart_qualification;
mod start_qualification;
mod view;

pub use answer_question::{AnswerQuestionCommand, AnswerQuestionHandler};
pub use get_qualification::{GetQualificationHandler, GetQualificationQuery};
pub use list_products::ListProductsHandler;
pub use restart_qualification::{
    RestartQualificationCommand, RestartQualificationHandler, RestartQualificationResult,
};
pub use start_qualification::StartQualificationHandler;
pub use recording::{RecorderFailure, RecorderOperation, TransitionRecorder};
pub use view::{CurrentQuestionView, ProductSummary, QualificationOutcome, QualificationView};
