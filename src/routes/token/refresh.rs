use actix_web::{web, HttpResponse};
use anyhow::{anyhow, Context};

use super::{LoginError, TokenResponse};
use crate::authentication::{AuthError, JwtService};
use crate::crud::CrudService;
use crate::repository::Repository;
use crate::routes::with_own_items;

#[derive(serde::Deserialize)]
pub struct RefreshData {
    refresh_token: String,
}

/// Trades a refresh token for a fresh access/refresh pair.
#[tracing::instrument(name = "Refresh token", skip(data, repository, crud, jwt))]
pub async fn refresh_token(
    data: web::Json<RefreshData>,
    repository: web::Data<dyn Repository>,
    crud: web::Data<CrudService>,
    jwt: web::Data<JwtService>,
) -> Result<HttpResponse, LoginError> {
    let claims = jwt.validate_refresh_token(&data.refresh_token)?;
    let user_id: i64 = claims
        .sub
        .parse()
        .map_err(|e| AuthError::InvalidToken(anyhow!("Malformed subject: {e}")))?;

    let user = repository
        .find_user(user_id)
        .await
        .context("Failed to load the token subject.")?
        .filter(|user| !user.lifecycle.is_discarded())
        .ok_or_else(|| AuthError::InvalidToken(anyhow!("Token subject no longer exists.")))?;
    if !user.is_active {
        return Err(AuthError::Inactive.into());
    }

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
