use actix_web::{error::InternalError, HttpRequest, HttpResponse, ResponseError};
use chrono::Utc;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[\w\.-]+@[a-zA-Z0-9\.-]+\.[a-zA-Z]{2,}$").expect("email regex is valid")
});

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// JSON body of every error response.
#[derive(Serialize)]
pub struct ErrorResponse {
    pub message: String,
    pub timestamp: String,
}

impl ErrorResponse {
    pub fn new(error: &impl std::fmt::Display) -> Self {
        Self {
            message: error.to_string(),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

/// Error handler for actix's JSON, form, query and path extractors. Keeps the
/// extractor's status and renders the message as an [`ErrorResponse`].
pub fn extractor_error<E>(error: E, req: &HttpRequest) -> actix_web::Error
where
    E: ResponseError + 'static,
{
    tracing::debug!(error = %error, path = req.path(), "Rejected malformed request");
    let response = HttpResponse::build(error.status_code()).json(ErrorResponse::new(&error));
    InternalError::from_response(error, response).into()
}
