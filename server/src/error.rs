use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

/// Failures of the `/api` proxy itself, as opposed to error answers from the
/// backend, which are passed through untouched.
#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("The card service could not be reached: {0}")]
    Upstream(#[from] reqwest::Error),

    #[error("Method {0} is not supported")]
    Method(String),
}

impl ResponseError for ProxyError {
    fn status_code(&self) -> StatusCode {
        match self {
            ProxyError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ProxyError::Method(_) => StatusCode::METHOD_NOT_ALLOWED,
        }
    }

    /// Same `{ "detail": ... }` shape the backend uses, so the frontend shows
    /// the message.
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({ "detail": self.to_string() }))
    }
}
