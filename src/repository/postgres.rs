use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use super::{Repository, RepositoryError};
use crate::domain::{Item, ItemChanges, Lifecycle, NewItem, NewUser, Page, User, UserChanges};

const USER_COLUMNS: &str =
    "id, email, hashed_password, is_active, created_at, updated_at, discarded_at";
const ITEM_COLUMNS: &str = "id, title, description, owner_id, created_at, updated_at, discarded_at";

#[derive(FromRow)]
struct UserRow {
    id: i64,
    email: String,
    hashed_password: String,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
    discarded_at: Option<DateTime<Utc>>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            email: row.email,
            password_hash: row.hashed_password,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
            lifecycle: Lifecycle::from_discarded_at(row.discarded_at),
        }
    }
}

#[derive(FromRow)]
struct ItemRow {
    id: i64,
    title: String,
    description: Option<String>,
    owner_id: i64,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
    discarded_at: Option<DateTime<Utc>>,
}

impl From<ItemRow> for Item {
    fn from(row: ItemRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            owner_id: row.owner_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
            lifecycle: Lifecycle::from_discarded_at(row.discarded_at),
        }
    }
}

/// Postgres-backed store. Each call borrows a pooled connection that is
/// returned to the pool when the call finishes, whatever the outcome.
#[derive(Clone)]
pub struct PgRepository {
    pool: PgPool,
}

impl PgRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn classify(error: sqlx::Error, context: &'static str) -> RepositoryError {
    if let Some(db_error) = error.as_database_error() {
        if db_error.is_unique_violation() {
            return RepositoryError::UniqueViolation;
        }
        if db_error.is_foreign_key_violation() {
            return RepositoryError::ForeignKeyViolation;
        }
    }
    RepositoryError::UnexpectedError(anyhow::Error::new(error).context(context))
}

#[async_trait]
impl Repository for PgRepository {
    #[tracing::instrument(name = "Insert user", skip(self, new_user), fields(email = %new_user.email))]
    async fn insert_user(&self, new_user: NewUser) -> Result<User, RepositoryError> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .context("Failed to acquire a Postgres connection from the pool.")?;

        let taken: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
            .bind(&new_user.email)
            .fetch_one(&mut *conn)
            .await
            .map_err(|e| classify(e, "Failed to check email availability."))?;
        if taken {
            return Err(RepositoryError::UniqueViolation);
        }

        let row = sqlx::query_as::<_, UserRow>(&format!(
            "INSERT INTO users (email, hashed_password, is_active, created_at) \
             VALUES ($1, $2, TRUE, $3) RETURNING {USER_COLUMNS}"
        ))
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .bind(new_user.created_at)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| classify(e, "Failed to insert a new user."))?;

        Ok(row.into())
    }

    async fn find_user(&self, id: i64) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| classify(e, "Failed to fetch user by id."))?;
        Ok(row.map(Into::into))
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| classify(e, "Failed to fetch user by email."))?;
        Ok(row.map(Into::into))
    }

    async fn list_users(&self, page: Page) -> Result<Vec<User>, RepositoryError> {
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE discarded_at IS NULL \
             ORDER BY id OFFSET $1 LIMIT $2"
        ))
        .bind(page.skip)
        .bind(page.limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| classify(e, "Failed to list users."))?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn update_user(
        &self,
        id: i64,
        changes: UserChanges,
        at: DateTime<Utc>,
    ) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "UPDATE users SET \
                email = COALESCE($2, email), \
                hashed_password = COALESCE($3, hashed_password), \
                is_active = COALESCE($4, is_active), \
                updated_at = $5 \
             WHERE id = $1 RETURNING {USER_COLUMNS}"
        ))
        .bind(id)
        .bind(changes.email)
        .bind(changes.password_hash)
        .bind(changes.is_active)
        .bind(at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| classify(e, "Failed to update user."))?;
        Ok(row.map(Into::into))
    }

    async fn discard_user(
        &self,
        id: i64,
        at: DateTime<Utc>,
    ) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "UPDATE users SET discarded_at = COALESCE(discarded_at, $2) \
             WHERE id = $1 RETURNING {USER_COLUMNS}"
        ))
        .bind(id)
        .bind(at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| classify(e, "Failed to discard user."))?;
        Ok(row.map(Into::into))
    }

    #[tracing::instrument(name = "Insert item", skip(self, new_item), fields(owner_id = new_item.owner_id))]
    async fn insert_item(&self, new_item: NewItem) -> Result<Item, RepositoryError> {
        let row = sqlx::query_as::<_, ItemRow>(&format!(
            "INSERT INTO items (title, description, owner_id, created_at) \
             VALUES ($1, $2, $3, $4) RETURNING {ITEM_COLUMNS}"
        ))
        .bind(&new_item.title)
        .bind(&new_item.description)
        .bind(new_item.owner_id)
        .bind(new_item.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| classify(e, "Failed to insert a new item."))?;
        Ok(row.into())
    }

    async fn find_item(&self, id: i64) -> Result<Option<Item>, RepositoryError> {
        let row = sqlx::query_as::<_, ItemRow>(&format!(
            "SELECT {ITEM_COLUMNS} FROM items WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| classify(e, "Failed to fetch item by id."))?;
        Ok(row.map(Into::into))
    }

    async fn list_items(&self, page: Page) -> Result<Vec<Item>, RepositoryError> {
        let rows = sqlx::query_as::<_, ItemRow>(&format!(
            "SELECT {ITEM_COLUMNS} FROM items WHERE discarded_at IS NULL \
             ORDER BY id OFFSET $1 LIMIT $2"
        ))
        .bind(page.skip)
        .bind(page.limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| classify(e, "Failed to list items."))?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn list_items_by_owner(
        &self,
        owner_id: i64,
        page: Page,
    ) -> Result<Vec<Item>, RepositoryError> {
        let rows = sqlx::query_as::<_, ItemRow>(&format!(
            "SELECT {ITEM_COLUMNS} FROM items WHERE owner_id = $1 AND discarded_at IS NULL \
             ORDER BY id OFFSET $2 LIMIT $3"
        ))
        .bind(owner_id)
        .bind(page.skip)
        .bind(page.limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| classify(e, "Failed to list items by owner."))?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn list_items_for_owners(&self, owner_ids: &[i64]) -> Result<Vec<Item>, RepositoryError> {
        if owner_ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows = sqlx::query_as::<_, ItemRow>(&format!(
            "SELECT {ITEM_COLUMNS} FROM items WHERE owner_id = ANY($1) AND discarded_at IS NULL \
             ORDER BY id"
        ))
        .bind(owner_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| classify(e, "Failed to list items for owners."))?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn update_item(
        &self,
        id: i64,
        changes: ItemChanges,
        at: DateTime<Utc>,
    ) -> Result<Option<Item>, RepositoryError> {
        let row = sqlx::query_as::<_, ItemRow>(&format!(
            "UPDATE items SET title = $2, description = $3, owner_id = $4, updated_at = $5 \
             WHERE id = $1 RETURNING {ITEM_COLUMNS}"
        ))
        .bind(id)
        .bind(changes.title)
        .bind(changes.description)
        .bind(changes.owner_id)
        .bind(at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| classify(e, "Failed to update item."))?;
        Ok(row.map(Into::into))
    }

    async fn discard_item(
        &self,
        id: i64,
        at: DateTime<Utc>,
    ) -> Result<Option<Item>, RepositoryError> {
        let row = sqlx::query_as::<_, ItemRow>(&format!(
            "UPDATE items SET discarded_at = COALESCE(discarded_at, $2) \
             WHERE id = $1 RETURNING {ITEM_COLUMNS}"
        ))
        .bind(id)
        .bind(at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| classify(e, "Failed to discard item."))?;
        Ok(row.map(Into::into))
    }
}
