//! Create/read/update/soft-delete over users and items.
//!
//! Single-record lookups return discarded records too; listings never do.

mod error;

pub use error::CrudError;

use std::sync::Arc;

use anyhow::Context;
use chrono::Utc;

use crate::authentication::compute_password_hash;
use crate::domain::{Item, ItemChanges, NewItem, NewUser, Page, User, UserChanges};
use crate::repository::Repository;
use crate::telemetry::spawn_blocking_with_tracing;
use crate::utils::is_valid_email;

/// Requested changes to a user; the password is still in plain text here.
#[derive(Debug, Default)]
pub struct UserUpdate {
    pub email: Option<String>,
    pub password: Option<String>,
    pub is_active: Option<bool>,
}

pub struct CrudService {
    repository: Arc<dyn Repository>,
}

impl CrudService {
    pub fn new(repository: Arc<dyn Repository>) -> Self {
        Self { repository }
    }

    #[tracing::instrument(name = "Create user", skip(self, password))]
    pub async fn create_user(&self, email: String, password: String) -> Result<User, CrudError> {
        validate_email(&email)?;
        let password_hash = hash_password(password).await?;

        let user = self
            .repository
            .insert_user(NewUser {
                email,
                password_hash,
                created_at: Utc::now(),
            })
            .await?;
        tracing::info!(user_id = user.id, "User created");
        Ok(user)
    }

    pub async fn get_user(&self, id: i64) -> Result<User, CrudError> {
        self.repository
            .find_user(id)
            .await?
            .ok_or(CrudError::NotFound("User"))
    }

    pub async fn list_users(&self, page: Page) -> Result<Vec<User>, CrudError> {
        Ok(self.repository.list_users(page).await?)
    }

    #[tracing::instrument(name = "Update user", skip(self, update))]
    pub async fn update_user(&self, id: i64, update: UserUpdate) -> Result<User, CrudError> {
        if let Some(email) = &update.email {
            validate_email(email)?;
        }
        let password_hash = match update.password {
            Some(password) => Some(hash_password(password).await?),
            None => None,
        };
        let changes = UserChanges {
            email: update.email,
            password_hash,
            is_active: update.is_active,
        };

        self.repository
            .update_user(id, changes, Utc::now())
            .await?
            .ok_or(CrudError::NotFound("User"))
    }

    /// Marks the user discarded. Repeating the call keeps the first timestamp.
    #[tracing::instrument(name = "Soft-delete user", skip(self))]
    pub async fn soft_delete_user(&self, id: i64) -> Result<User, CrudError> {
        self.repository
            .discard_user(id, Utc::now())
            .await?
            .ok_or(CrudError::NotFound("User"))
    }

    /// Active items owned by any of `owner_ids`.
    pub async fn items_owned_by(&self, owner_ids: &[i64]) -> Result<Vec<Item>, CrudError> {
        Ok(self.repository.list_items_for_owners(owner_ids).await?)
    }

    #[tracing::instrument(name = "Create item", skip(self, description))]
    pub async fn create_item(
        &self,
        title: String,
        description: Option<String>,
        owner_id: i64,
    ) -> Result<Item, CrudError> {
        validate_title(&title)?;
        let item = self
            .repository
            .insert_item(NewItem {
                title,
                description,
                owner_id,
                created_at: Utc::now(),
            })
            .await?;
        tracing::info!(item_id = item.id, "Item created");
        Ok(item)
    }

    pub async fn get_item(&self, id: i64) -> Result<Item, CrudError> {
        self.repository
            .find_item(id)
            .await?
            .ok_or(CrudError::NotFound("Item"))
    }

    pub async fn list_items(&self, page: Page) -> Result<Vec<Item>, CrudError> {
        Ok(self.repository.list_items(page).await?)
    }

    pub async fn list_items_by_owner(
        &self,
        owner_id: i64,
        page: Page,
    ) -> Result<Vec<Item>, CrudError> {
        Ok(self.repository.list_items_by_owner(owner_id, page).await?)
    }

    /// Overwrites title, description and owner. Unknown item or owner is `NotFound`.
    #[tracing::instrument(name = "Update item", skip(self, changes), fields(owner_id = changes.owner_id))]
    pub async fn update_item(&self, id: i64, changes: ItemChanges) -> Result<Item, CrudError> {
        validate_title(&changes.title)?;
        self.repository
            .update_item(id, changes, Utc::now())
            .await?
            .ok_or(CrudError::NotFound("Item"))
    }

    #[tracing::instrument(name = "Soft-delete item", skip(self))]
    pub async fn soft_delete_item(&self, id: i64) -> Result<Item, CrudError> {
        self.repository
            .discard_item(id, Utc::now())
            .await?
            .ok_or(CrudError::NotFound("Item"))
    }
}

fn validate_email(email: &str) -> Result<(), CrudError> {
    if is_valid_email(email) {
        Ok(())
    } else {
        Err(CrudError::Validation("Invalid email format".into()))
    }
}

fn validate_title(title: &str) -> Result<(), CrudError> {
    if title.trim().is_empty() {
        return Err(CrudError::Validation("Title must not be empty".into()));
    }
    Ok(())
}

async fn hash_password(password: String) -> Result<String, CrudError> {
    if password.is_empty() {
        return Err(CrudError::Validation("Password must not be empty".into()));
    }
    let hash = spawn_blocking_with_tracing(move || compute_password_hash(password))
        .await
        .context("Failed to spawn blocking task.")?
        .context("Failed to hash password.")?;
    Ok(hash)
}
