use actix_web::{web, HttpResponse};

use super::with_own_items;
use crate::crud::{CrudError, CrudService, UserUpdate};

/// Every field is optional; omitted fields keep their stored value.
#[derive(serde::Deserialize)]
pub struct UserUpdateData {
    email: Option<String>,
    password: Option<String>,
    is_active: Option<bool>,
}

pub async fn update_user(
    user_id: web::Path<i64>,
    data: web::Json<UserUpdateData>,
    crud: web::Data<CrudService>,
) -> Result<HttpResponse, CrudError> {
    let UserUpdateData {
        email,
        password,
        is_active,
    } = data.into_inner();
    let update = UserUpdate {
        email,
        password,
        is_active,
    };

    let user = crud.update_user(user_id.into_inner(), update).await?;
    Ok(HttpResponse::Ok().json(with_own_items(&crud, user).await?))
}
