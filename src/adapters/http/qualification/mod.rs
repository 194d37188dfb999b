//! HTTP adapter for qualification endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    AnswerRequest, ErrorResponse, ProductListResponse, QualificationResponse, RestartResponse,
};
pub use handlers::QualificationHandlers;
pub use routes::qualification_routes;
