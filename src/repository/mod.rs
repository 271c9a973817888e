//! Storage seam for users and items.
//!
//! Implementations never filter by lifecycle on single-record lookups; only
//! the `list_*` methods hide discarded rows. Every method is one unit of work
//! against the store.

mod memory;
mod postgres;

pub use memory::InMemoryRepository;
pub use postgres::PgRepository;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Item, ItemChanges, NewItem, NewUser, Page, User, UserChanges};

#[derive(thiserror::Error, Debug)]
pub enum RepositoryError {
    #[error("A record with the same unique key already exists")]
    UniqueViolation,

    #[error("The referenced record does not exist")]
    ForeignKeyViolation,

    #[error("Something went wrong")]
    UnexpectedError(#[from] anyhow::Error),
}

#[async_trait]
pub trait Repository: Send + Sync {
    /// Fails with `UniqueViolation` when the email is already taken, discarded users included.
    async fn insert_user(&self, new_user: NewUser) -> Result<User, RepositoryError>;

    async fn find_user(&self, id: i64) -> Result<Option<User>, RepositoryError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError>;

    async fn list_users(&self, page: Page) -> Result<Vec<User>, RepositoryError>;

    /// Applies `changes` and stamps `updated_at`. `Ok(None)` when no such user.
    async fn update_user(
        &self,
        id: i64,
        changes: UserChanges,
        at: DateTime<Utc>,
    ) -> Result<Option<User>, RepositoryError>;

    /// Sets `discarded_at` unless already set.
    async fn discard_user(
        &self,
        id: i64,
        at: DateTime<Utc>,
    ) -> Result<Option<User>, RepositoryError>;

    /// Fails with `ForeignKeyViolation` when the owner does not exist.
    async fn insert_item(&self, new_item: NewItem) -> Result<Item, RepositoryError>;

    async fn find_item(&self, id: i64) -> Result<Option<Item>, RepositoryError>;

    async fn list_items(&self, page: Page) -> Result<Vec<Item>, RepositoryError>;

    async fn list_items_by_owner(
        &self,
        owner_id: i64,
        page: Page,
    ) -> Result<Vec<Item>, RepositoryError>;

    /// Every active item owned by any of `owner_ids`, unpaginated.
    async fn list_items_for_owners(&self, owner_ids: &[i64]) -> Result<Vec<Item>, RepositoryError>;

    async fn update_item(
        &self,
        id: i64,
        changes: ItemChanges,
        at: DateTime<Utc>,
    ) -> Result<Option<Item>, RepositoryError>;

    async fn discard_item(
        &self,
        id: i64,
        at: DateTime<Utc>,
    ) -> Result<Option<Item>, RepositoryError>;
}
