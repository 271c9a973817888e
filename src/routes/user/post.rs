use actix_web::{http::header::LOCATION, web, HttpResponse};

use super::UserResponse;
use crate::crud::{CrudError, CrudService};
use crate::startup::ApplicationBaseUrl;

#[derive(serde::Deserialize)]
pub struct UserCreate {
    email: String,
    password: String,
}

pub async fn create_user(
    user_create: web::Json<UserCreate>,
    crud: web::Data<CrudService>,
    base_url: web::Data<ApplicationBaseUrl>,
) -> Result<HttpResponse, CrudError> {
    let UserCreate { email, password } = user_create.into_inner();
    let user = crud.create_user(email, password).await?;

    Ok(HttpResponse::Created()
        .insert_header((LOCATION, format!("{}/users/{}", base_url.0, user.id)))
        .json(UserResponse::new(user, Vec::new())))
}
