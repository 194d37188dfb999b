//! HTTP handlers for qualification endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::application::handlers::qualification::{
    AnswerQuestionCommand, AnswerQuestionHandler, GetQualificationHandler, GetQualificationQuery,
    ListProductsHandler, RestartQualificationCommand, RestartQualificationHandler,
    StartQualificationHandler,
};
use crate::domain::foundation::SessionId;
use crate::domain::qualification::QualificationError;

use super::dto::{
    AnswerRequest, ErrorResponse, ProductListResponse, QualificationResponse, RestartResponse,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct QualificationHandlers {
    start_handler: Arc<StartQualificationHandler>,
    answer_handler: Arc<AnswerQuestionHandler>,
    get_handler: Arc<GetQualificationHandler>,
    restart_handler: Arc<RestartQualificationHandler>,
    products_handler: Arc<ListProductsHandler>,
}

impl QualificationHandlers {
    pub fn new(
        start_handler: Arc<StartQualificationHandler>,
        answer_handler: Arc<AnswerQuestionHandler>,
        get_handler: Arc<GetQualificationHandler>,
        restart_handler: Arc<RestartQualificationHandler>,
        products_handler: Arc<ListProductsHandler>,
    ) -> Self {
        Self {
            start_handler,
            answer_handler,
            get_handler,
            restart_handler,
            products_handler,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET /api/products - List the catalog, best tier first
pub async fn list_products(State(handlers): State<QualificationHandlers>) -> Response {
    let response = ProductListResponse {
        products: handlers.products_handler.handle(),
    };
    (StatusCode::OK, Json(response)).into_response()
}

/// POST /api/qualifications - Start a new qualification session
pub async fn start_qualification(State(handlers): State<QualificationHandlers>) -> Response {
    match handlers.start_handler.handle().await {
        Ok(outcome) => {
            let response: QualificationResponse = outcome.into();
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => handle_qualification_error(e),
    }
}

/// GET /api/qualifications/:id - Get session state
pub async fn get_qualification(
    State(handlers): State<QualificationHandlers>,
    Path(session_id): Path<String>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers
        .get_handler
        .handle(GetQualificationQuery { session_id })
        .await
    {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(e) => handle_qualification_error(e),
    }
}

/// POST /api/qualifications/:id/answers - Answer the current question
pub async fn answer_question(
    State(handlers): State<QualificationHandlers>,
    Path(session_id): Path<String>,
    Json(req): Json<AnswerRequest>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let cmd = AnswerQuestionCommand {
        session_id,
        answer: req.answer,
    };

    match handlers.answer_handler.handle(cmd).await {
        Ok(outcome) => {
            let response: QualificationResponse = outcome.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_qualification_error(e),
    }
}

/// POST /api/qualifications/:id/restart - Discard the session and start over
pub async fn restart_qualification(
    State(handlers): State<QualificationHandlers>,
    Path(session_id): Path<String>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers
        .restart_handler
        .handle(RestartQualificationCommand { session_id })
        .await
    {
        Ok(result) => {
            let response: RestartResponse = result.into();
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => handle_qualification_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

#[allow(clippy::result_large_err)]
fn parse_session_id(raw: &str) -> Result<SessionId, Response> {
    raw.parse::<SessionId>().map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request("Invalid session ID")),
        )
            .into_response()
    })
}

fn handle_qualification_error(error: QualificationError) -> Response {
    let (status, body) = match &error {
        QualificationError::NotFound(id) => (
            StatusCode::NOT_FOUND,
            ErrorResponse::not_found("Qualification session", &id.to_string()),
        ),
        QualificationError::SessionComplete(_) => (
            StatusCode::CONFLICT,
            ErrorResponse::session_complete(error.to_string()),
        ),
        QualificationError::Infrastructure(msg) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorResponse::internal(msg.clone()),
        ),
        QualificationError::NoCurrentQuestion { .. } | QualificationError::InvalidTransition(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorResponse::internal(error.to_string()),
        ),
    };

    if status.is_server_error() {
        if error.is_invariant_violation() {
            tracing::error!(code = %error.code(), error = %error, "Qualification invariant violated");
        } else {
            tracing::error!(code = %error.code(), error = %error, "Qualification request failed");
        }
    }
    (status, Json(body)).into_response()
}
