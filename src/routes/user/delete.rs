use actix_web::{web, HttpResponse};

use super::with_own_items;
use crate::crud::{CrudError, CrudService};

pub async fn delete_user(
    user_id: web::Path<i64>,
    crud: web::Data<CrudService>,
) -> Result<HttpResponse, CrudError> {
    let user = crud.soft_delete_user(user_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(with_own_items(&crud, user).await?))
}
