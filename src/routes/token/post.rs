use actix_web::{web, HttpResponse};
use anyhow::Context;

use super::{LoginError, TokenResponse};
use crate::authentication::{validate_credentials, Credentials, JwtService};
use crate::crud::CrudService;
use crate::repository::Repository;
use crate::routes::with_own_items;
use crate::utils::is_valid_email;

/// OAuth2 password-grant form: the email travels as `username`.
#[derive(serde::Deserialize)]
pub struct LoginData {
    username: String,
    password: String,
}

#[tracing::instrument(name = "Login", skip(login_data, repository, crud, jwt), fields(email = %login_data.username))]
pub async fn login(
    login_data: web::Form<LoginData>,
    repository: web::Data<dyn Repository>,
    crud: web::Data<CrudService>,
    jwt: web::Data<JwtService>,
) -> Result<HttpResponse, LoginError> {
    if !is_valid_email(&login_data.username) {
        return Err(LoginError::InvalidEmailFormatError);
    }

    let LoginData { username, password } = login_data.into_inner();
    let credentials = Credentials {
        email: username,
        password,
    };

    let user = validate_credentials(credentials, repository.get_ref()).await?;
    let tokens = jwt.issue_tokens(&user)?;
    let user = with_own_items(&crud, user)
        .await
        .context("Failed to load the user's items.")?;

    Ok(HttpResponse::Ok().json(TokenResponse {
        access_token: tokens.access_token,
        refresh_token: tokens.refresh_token,
        token_type: "bearer".to_string(),
        user,
    }))
}
