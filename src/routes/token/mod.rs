mod post;
mod refresh;

pub use post::*;
pub use refresh::*;

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};

use super::UserResponse;
use crate::authentication::AuthError;
use crate::utils::ErrorResponse;

#[derive(Serialize, Deserialize, Debug)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub user: UserResponse,
}

#[derive(thiserror::Error, Debug)]
pub enum LoginError {
    #[error("Invalid email format")]
    InvalidEmailFormatError,

    #[error(transparent)]
    AuthError(#[from] AuthError),

    #[error("Something went wrong")]
    UnexpectedError(#[from] anyhow::Error),
}

impl ResponseError for LoginError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidEmailFormatError => StatusCode::BAD_REQUEST,
            Self::AuthError(e) => e.status_code(),
            Self::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            Self::AuthError(e) => e.error_response(),
            Self::UnexpectedError(e) => {
                tracing::error!(error = ?e, "Token issuance failed");
                HttpResponse::InternalServerError().json(ErrorResponse::new(self))
            }
            Self::InvalidEmailFormatError => {
                HttpResponse::BadRequest().json(ErrorResponse::new(self))
            }
        }
    }
}
