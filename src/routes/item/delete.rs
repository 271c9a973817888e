use actix_web::{web, HttpResponse};

use super::ItemResponse;
use crate::crud::{CrudError, CrudService};

pub async fn delete_item(
    item_id: web::Path<i64>,
    crud: web::Data<CrudService>,
) -> Result<HttpResponse, CrudError> {
    let item = crud.soft_delete_item(item_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ItemResponse::from(item)))
}
