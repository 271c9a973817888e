use actix_web::{
    http::{header, StatusCode},
    HttpResponse, ResponseError,
};

use crate::utils::ErrorResponse;

#[derive(thiserror::Error, Debug)]
pub enum AuthError {
    #[error("Invalid credentials.")]
    InvalidCredentials(#[source] anyhow::Error),

    #[error("Unauthorized: Missing bearer token")]
    MissingToken,

    #[error("Unauthorized: Token has expired")]
    ExpiredToken,

    #[error("Unauthorized: Invalid token")]
    InvalidToken(#[source] anyhow::Error),

    #[error("Inactive user")]
    Inactive,

    #[error("Forbidden: Token does not belong to this user")]
    Forbidden,

    #[error("Something went wrong")]
    UnexpectedError(#[from] anyhow::Error),
}

impl ResponseError for AuthError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidCredentials(_)
            | Self::MissingToken
            | Self::ExpiredToken
            | Self::InvalidToken(_) => StatusCode::UNAUTHORIZED,
            Self::Inactive => StatusCode::BAD_REQUEST,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = ?self, "Authentication failed unexpectedly");
        }
        let mut builder = HttpResponse::build(status);
        if status == StatusCode::UNAUTHORIZED {
            builder.insert_header((header::WWW_AUTHENTICATE, "Bearer"));
        }
        builder.json(ErrorResponse::new(self))
    }
}
