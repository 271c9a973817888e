use actix_web::{web, HttpResponse};

use super::{to_responses, ItemResponse};
use crate::authentication::CurrentUser;
use crate::crud::{CrudError, CrudService};
use crate::routes::Pagination;

/// Discarded items are still returned here; only listings hide them.
pub async fn get_item(
    item_id: web::Path<i64>,
    crud: web::Data<CrudService>,
) -> Result<HttpResponse, CrudError> {
    let item = crud.get_item(item_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ItemResponse::from(item)))
}

pub async fn list_items(
    pagination: web::Query<Pagination>,
    crud: web::Data<CrudService>,
) -> Result<HttpResponse, CrudError> {
    let items = crud.list_items(pagination.into_inner().into()).await?;
    Ok(HttpResponse::Ok().json(to_responses(items)))
}

/// Lists the caller's own items. The path id must name the caller.
pub async fn list_items_for_user(
    user_id: web::Path<i64>,
    pagination: web::Query<Pagination>,
    current_user: CurrentUser,
    crud: web::Data<CrudService>,
) -> Result<HttpResponse, actix_web::Error> {
    let owner = current_user.ensure_is(user_id.into_inner())?;
    let items = crud
        .list_items_by_owner(owner.id, pagination.into_inner().into())
        .await?;
    Ok(HttpResponse::Ok().json(to_responses(items)))
}
