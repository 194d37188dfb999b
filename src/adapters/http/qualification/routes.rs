//! HTTP routes for qualification endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    answer_question, get_qualification, list_products, restart_qualification,
    start_qualification, QualificationHandlers,
};

/// Creates the qualification router. Mounted under `/api`.
pub fn qualification_routes(handlers: QualificationHandlers) -> Router {
    Router::new()
        .route("/products", get(list_products))
        .route("/qualifications", post(start_qualification))
        .route("/qualifications/:id", get(get_qualification))
        .route("/qualifications/:id/answers", post(answer_question))
        .route("/qualifications/:id/restart", post(restart_qualification))
        .with_state(handlers)
}
