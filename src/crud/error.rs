use actix_web::{http::StatusCode, HttpResponse, ResponseError};

use crate::repository::RepositoryError;
use crate::utils::ErrorResponse;

#[derive(thiserror::Error, Debug)]
pub enum CrudError {
    #[error("Email already registered")]
    Conflict,

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    Validation(String),

    #[error("Something went wrong")]
    UnexpectedError(#[from] anyhow::Error),
}

impl From<RepositoryError> for CrudError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::UniqueViolation => Self::Conflict,
            RepositoryError::ForeignKeyViolation => Self::NotFound("Owner"),
            RepositoryError::UnexpectedError(e) => Self::UnexpectedError(e),
        }
    }
}

impl ResponseError for CrudError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Conflict => StatusCode::CONFLICT,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let Self::UnexpectedError(e) = self {
            tracing::error!(error = ?e, "Request failed");
        }
        HttpResponse::build(self.status_code()).json(ErrorResponse::new(self))
    }
}
