use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use super::{Repository, RepositoryError};
use crate::domain::{Item, ItemChanges, Lifecycle, NewItem, NewUser, Page, User, UserChanges};

/// Process-local store with the same constraints as the Postgres schema.
/// Ids start at 1 and listings come back in id order.
#[derive(Default)]
pub struct InMemoryRepository {
    state: RwLock<State>,
}

#[derive(Default)]
struct State {
    users: BTreeMap<i64, User>,
    items: BTreeMap<i64, Item>,
    last_user_id: i64,
    last_item_id: i64,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn window<T>(rows: impl Iterator<Item = T>, page: Page) -> Vec<T> {
    rows.skip(page.skip as usize).take(page.limit as usize).collect()
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn insert_user(&self, new_user: NewUser) -> Result<User, RepositoryError> {
        let mut state = self.state.write().await;
        if state.users.values().any(|u| u.email == new_user.email) {
            return Err(RepositoryError::UniqueViolation);
        }
        state.last_user_id += 1;
        let user = User {
            id: state.last_user_id,
            email: new_user.email,
            password_hash: new_user.password_hash,
            is_active: true,
            created_at: new_user.created_at,
            updated_at: None,
            lifecycle: Lifecycle::Active,
        };
        state.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_user(&self, id: i64) -> Result<Option<User>, RepositoryError> {
        Ok(self.state.read().await.users.get(&id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        let state = self.state.read().await;
        Ok(state.users.values().find(|u| u.email == email).cloned())
    }

    async fn list_users(&self, page: Page) -> Result<Vec<User>, RepositoryError> {
        let state = self.state.read().await;
        let active = state
            .users
            .values()
            .filter(|u| !u.lifecycle.is_discarded())
            .cloned();
        Ok(window(active, page))
    }

    async fn update_user(
        &self,
        id: i64,
        changes: UserChanges,
        at: DateTime<Utc>,
    ) -> Result<Option<User>, RepositoryError> {
        let mut state = self.state.write().await;
        if let Some(email) = &changes.email {
            if state.users.values().any(|u| u.id != id && &u.email == email) {
                return Err(RepositoryError::UniqueViolation);
            }
        }
        let Some(user) = state.users.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(email) = changes.email {
            user.email = email;
        }
        if let Some(password_hash) = changes.password_hash {
            user.password_hash = password_hash;
        }
        if let Some(is_active) = changes.is_active {
            user.is_active = is_active;
        }
        user.updated_at = Some(at);
        Ok(Some(user.clone()))
    }

    async fn discard_user(
        &self,
        id: i64,
        at: DateTime<Utc>,
    ) -> Result<Option<User>, RepositoryError> {
        let mut state = self.state.write().await;
        Ok(state.users.get_mut(&id).map(|user| {
            user.lifecycle = user.lifecycle.discard(at);
            user.clone()
        }))
    }

    async fn insert_item(&self, new_item: NewItem) -> Result<Item, RepositoryError> {
        let mut state = self.state.write().await;
        if !state.users.contains_key(&new_item.owner_id) {
            return Err(RepositoryError::ForeignKeyViolation);
        }
        state.last_item_id += 1;
        let item = Item {
            id: state.last_item_id,
            title: new_item.title,
            description: new_item.description,
            owner_id: new_item.owner_id,
            created_at: new_item.created_at,
            updated_at: None,
            lifecycle: Lifecycle::Active,
        };
        state.items.insert(item.id, item.clone());
        Ok(item)
    }

    async fn find_item(&self, id: i64) -> Result<Option<Item>, RepositoryError> {
        Ok(self.state.read().await.items.get(&id).cloned())
    }

    async fn list_items(&self, page: Page) -> Result<Vec<Item>, RepositoryError> {
        let state = self.state.read().await;
        let active = state
            .items
            .values()
            .filter(|i| !i.lifecycle.is_discarded())
            .cloned();
        Ok(window(active, page))
    }

    async fn list_items_by_owner(
        &self,
        owner_id: i64,
        page: Page,
    ) -> Result<Vec<Item>, RepositoryError> {
        let state = self.state.read().await;
        let owned = state
            .items
            .values()
            .filter(|i| i.owner_id == owner_id && !i.lifecycle.is_discarded())
            .cloned();
        Ok(window(owned, page))
    }

    async fn list_items_for_owners(&self, owner_ids: &[i64]) -> Result<Vec<Item>, RepositoryError> {
        let state = self.state.read().await;
        Ok(state
            .items
            .values()
            .filter(|i| owner_ids.contains(&i.owner_id) && !i.lifecycle.is_discarded())
            .cloned()
            .collect())
    }

    async fn update_item(
        &self,
        id: i64,
        changes: ItemChanges,
        at: DateTime<Utc>,
    ) -> Result<Option<Item>, RepositoryError> {
        let mut state = self.state.write().await;
        if !state.items.contains_key(&id) {
            return Ok(None);
        }
        if !state.users.contains_key(&changes.owner_id) {
            return Err(RepositoryError::ForeignKeyViolation);
        }
        Ok(state.items.get_mut(&id).map(|item| {
            item.title = changes.title;
            item.description = changes.description;
            item.owner_id = changes.owner_id;
            item.updated_at = Some(at);
            item.clone()
        }))
    }

    async fn discard_item(
        &self,
        id: i64,
        at: DateTime<Utc>,
    ) -> Result<Option<Item>, RepositoryError> {
        let mut state = self.state.write().await;
        Ok(state.items.get_mut(&id).map(|item| {
            item.lifecycle = item.lifecycle.discard(at);
            item.clone()
        }))
    }
}
