use actix_web::{web, HttpResponse};

use super::{with_items, with_own_items};
use crate::crud::{CrudError, CrudService};
use crate::routes::Pagination;

pub async fn get_user(
    user_id: web::Path<i64>,
    crud: web::Data<CrudService>,
) -> Result<HttpResponse, CrudError> {
    let user = crud.get_user(user_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(with_own_items(&crud, user).await?))
}

pub async fn list_users(
    pagination: web::Query<Pagination>,
    crud: web::Data<CrudService>,
) -> Result<HttpResponse, CrudError> {
    let users = crud.list_users(pagination.into_inner().into()).await?;
    Ok(HttpResponse::Ok().json(with_items(&crud, users).await?))
}
