use chrono::Utc;
use sea_orm::*;
use tracing::{info, instrument};

use super::validate::{MAX_LABEL_LEN, optional_text};
use super::{Keyed, StoreError, StoreResult, classify_write};
use crate::content;
use crate::entity::user;

pub const MAX_USERNAME_LEN: usize = 32;

impl Keyed for user::Entity {
    const LABEL: &'static str = "user";

    fn id_column() -> user::Column {
        user::Column::Id
    }

    fn id(row: &user::Model) -> i32 {
        row.id
    }
}

/// Usernames are 1-32 characters of ASCII letters, digits and underscores.
pub fn validate_username(username: &str) -> StoreResult<()> {
    if username.is_empty()
        || username.len() > MAX_USERNAME_LEN
        || !username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return Err(StoreError::validation(
            "username",
            "Username must be 1-32 characters of letters, digits and underscores",
        ));
    }
    Ok(())
}

pub struct UserStore<'c, C> {
    conn: &'c C,
}

impl<'c, C: ConnectionTrait + TransactionTrait> UserStore<'c, C> {
    pub fn new(conn: &'c C) -> Self {
        Self { conn }
    }

    #[instrument(skip(self, email))]
    pub async fn create(&self, username: &str, email: Option<String>) -> StoreResult<user::Model> {
        let username = username.trim();
        validate_username(username)?;
        let email = email
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty());
        optional_text("email", email.as_deref(), MAX_LABEL_LEN)?;
        if let Some(ref email) = email
            && !email.contains('@')
        {
            return Err(StoreError::validation("email", "Email must contain '@'"));
        }

        let now = Utc::now();
        let model = user::ActiveModel {
            username: Set(username.to_string()),
            email: Set(email),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let user = model.insert(self.conn).await.map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                StoreError::Conflict(format!("Username '{username}' is already taken"))
            }
            _ => StoreError::Database(e),
        })?;
        info!(id = user.id, "Created user");
        Ok(user)
    }

    pub async fn get(&self, id: i32) -> StoreResult<user::Model> {
        user::Entity::find_by_id(id)
            .one(self.conn)
            .await?
            .ok_or_else(|| StoreError::not_found("user", id))
    }

    pub async fn list(&self) -> StoreResult<Vec<user::Model>> {
        Ok(user::Entity::find()
            .order_by_asc(user::Column::Id)
            .all(self.conn)
            .await?)
    }

    /// Delete a user and everything they own in one transaction.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> StoreResult<()> {
        let txn = self.conn.begin().await?;
        UserStore::new(&txn).get(id).await?;

        let removed = content::purge_owner(&txn, id).await?;
        user::Entity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| classify_write(e, || StoreError::not_found("user", id)))?;

        txn.commit().await?;
        info!(removed, "Deleted user and owned content");
        Ok(())
    }
}
