use chrono::{DateTime, Utc};

use super::Lifecycle;

#[derive(Debug, Clone)]
pub struct Item {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub owner_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub lifecycle: Lifecycle,
}

#[derive(Debug, Clone)]
pub struct NewItem {
    pub title: String,
    pub description: Option<String>,
    pub owner_id: i64,
    pub created_at: DateTime<Utc>,
}

/// Full overwrite of an item's editable fields.
#[derive(Debug, Clone)]
pub struct ItemChanges {
    pub title: String,
    pub description: Option<String>,
    pub owner_id: i64,
}
