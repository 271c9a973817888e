use actix_web::{web, HttpResponse};

use super::ItemResponse;
use crate::crud::{CrudError, CrudService};
use crate::domain::ItemChanges;

#[derive(serde::Deserialize)]
pub struct ItemUpdate {
    title: String,
    description: Option<String>,
    owner_id: i64,
}

pub async fn update_item(
    item_id: web::Path<i64>,
    item_update: web::Json<ItemUpdate>,
    crud: web::Data<CrudService>,
) -> Result<HttpResponse, CrudError> {
    let ItemUpdate {
        title,
        description,
        owner_id,
    } = item_update.into_inner();
    let changes = ItemChanges {
        title,
        description,
        owner_id,
    };

    let item = crud.update_item(item_id.into_inner(), changes).await?;
    Ok(HttpResponse::Ok().json(ItemResponse::from(item)))
}
