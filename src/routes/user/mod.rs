mod delete;
mod get;
mod post;
mod put;

pub use delete::*;
pub use get::*;
pub use post::*;
pub use put::*;

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ItemResponse;
use crate::crud::{CrudError, CrudService};
use crate::domain::{Item, User};

/// A user as returned by the API. The password hash never leaves the server.
#[derive(Serialize, Deserialize, Debug)]
pub struct UserResponse {
    pub id: i64,
    pub email: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub discarded_at: Option<DateTime<Utc>>,
    pub items: Vec<ItemResponse>,
}

impl UserResponse {
    pub fn new(user: User, items: Vec<Item>) -> Self {
        Self {
            id: user.id,
            email: user.email,
            is_active: user.is_active,
            created_at: user.created_at,
            updated_at: user.updated_at,
            discarded_at: user.lifecycle.discarded_at(),
            items: items.into_iter().map(ItemResponse::from).collect(),
        }
    }
}

/// Pairs each user with its active items using a single lookup.
pub(crate) async fn with_items(
    crud: &CrudService,
    users: Vec<User>,
) -> Result<Vec<UserResponse>, CrudError> {
    let ids: Vec<i64> = users.iter().map(|u| u.id).collect();
    let mut by_owner: HashMap<i64, Vec<Item>> = HashMap::new();
    for item in crud.items_owned_by(&ids).await? {
        by_owner.entry(item.owner_id).or_default().push(item);
    }

    Ok(users
        .into_iter()
        .map(|user| {
            let items = by_owner.remove(&user.id).unwrap_or_default();
            UserResponse::new(user, items)
        })
        .collect())
}

pub(crate) async fn with_own_items(
    crud: &CrudService,
    user: User,
) -> Result<UserResponse, CrudError> {
    let items = crud.items_owned_by(&[user.id]).await?;
    Ok(UserResponse::new(user, items))
}
