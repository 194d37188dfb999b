//! DTOs for qualification HTTP endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::qualification::{
    ProductSummary, QualificationOutcome, QualificationView, RecorderFailure,
    RestartQualificationResult,
};
use crate::domain::qualification::QualificationEvent;

// ════════════════════════════════════════════════════════════════════════════
// Requests
// ════════════════════════════════════════════════════════════════════════════

/// Body of `POST /api/qualifications/:id/answers`.
#[derive(Debug, Clone, Deserialize)]
pub struct AnswerRequest {
    /// `true` for "yes".
    pub answer: bool,
}

// ════════════════════════════════════════════════════════════════════════════
// Responses
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct ProductListResponse {
    pub products: Vec<ProductSummary>,
}

/// Session state plus what just happened to it.
#[derive(Debug, Clone, Serialize)]
pub struct QualificationResponse {
    pub session: QualificationView,
    pub events: Vec<QualificationEvent>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub recorder_failures: Vec<RecorderFailure>,
}

impl From<QualificationOutcome> for QualificationResponse {
    fn from(outcome: QualificationOutcome) -> Self {
        Self {
            session: outcome.view,
            events: outcome.events,
            recorder_failures: outcome.recorder_failures,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RestartResponse {
    pub previous_session_id: String,
    #[serde(flatten)]
    pub qualification: QualificationResponse,
}

impl From<RestartQualificationResult> for RestartResponse {
    fn from(result: RestartQualificationResult) -> Self {
        Self {
            previous_session_id: result.previous_session_id.to_string(),
            qualification: result.outcome.into(),
        }
    }
}

/// Standard error body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
        }
    }

    pub fn not_found(resource_type: &str, id: &str) -> Self {
        Self {
            code: "NOT_FOUND".to_string(),
            message: format!("{} not found: {}", resource_type, id),
        }
    }

    pub fn session_complete(message: impl Into<String>) -> Self {
        Self {
            code: "SESSION_COMPLETE".to_string(),
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            code: "INTERNAL_ERROR".to_string(),
            message: message.into(),
        }
    }
}
