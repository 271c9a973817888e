mod delete;
mod get;
mod post;
mod put;

pub use delete::*;
pub use get::*;
pub use post::*;
pub use put::*;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::Item;

#[derive(Serialize, Deserialize, Debug)]
pub struct ItemResponse {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub owner_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub discarded_at: Option<DateTime<Utc>>,
}

impl From<Item> for ItemResponse {
    fn from(item: Item) -> Self {
        Self {
            id: item.id,
            title: item.title,
            description: item.description,
            owner_id: item.owner_id,
            created_at: item.created_at,
            updated_at: item.updated_at,
            discarded_at: item.lifecycle.discarded_at(),
        }
    }
}

fn to_responses(items: Vec<Item>) -> Vec<ItemResponse> {
    items.into_iter().map(ItemResponse::from).collect()
}
