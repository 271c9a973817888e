use actix_web::{http::header::LOCATION, web, HttpResponse};

use super::ItemResponse;
use crate::authentication::CurrentUser;
use crate::crud::CrudService;
use crate::startup::ApplicationBaseUrl;

#[derive(serde::Deserialize)]
pub struct ItemCreate {
    title: String,
    description: Option<String>,
}

/// Creates an item owned by the authenticated caller, never by a client-supplied id.
#[tracing::instrument(
    name = "Create item for user",
    skip(item_create, current_user, crud, base_url),
    fields(caller = current_user.0.id)
)]
pub async fn create_item_for_user(
    user_id: web::Path<i64>,
    item_create: web::Json<ItemCreate>,
    current_user: CurrentUser,
    crud: web::Data<CrudService>,
    base_url: web::Data<ApplicationBaseUrl>,
) -> Result<HttpResponse, actix_web::Error> {
    let owner = current_user.ensure_is(user_id.into_inner())?;
    let ItemCreate { title, description } = item_create.into_inner();

    let item = crud.create_item(title, description, owner.id).await?;

    Ok(HttpResponse::Created()
        .insert_header((LOCATION, format!("{}/items/{}", base_url.0, item.id)))
        .json(ItemResponse::from(item)))
}
