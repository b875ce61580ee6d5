//! Contact vault accessors.
//!
//! A contact is a display name plus a peer's public identity key. The key
//! is unique at the schema level; re-adding a known key fails with
//! `DuplicateContact` and leaves the stored row untouched. Renaming a
//! peer is an explicit caller operation, never a side effect of a
//! second insert.

use tracing::debug;

use crate::{db::Store, error::StoreError, models::ContactRow};

impl Store {
    /// Insert a contact; returns the new row id.
    pub async fn put_contact(&self, name: &str, public_key: &str) -> Result<i64, StoreError> {
        let pool = self.ready_pool().await?;
        let res = sqlx::query("INSERT INTO contacts_vault (name, public_key) VALUES (?, ?)")
            .bind(name)
            .bind(public_key)
            .execute(&pool)
            .await;
        match res {
            Ok(done) => {
                debug!(name, "contact stored");
                Ok(done.last_insert_rowid())
            }
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                Err(StoreError::DuplicateContact(public_key.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// All contacts in insertion order.
    pub async fn list_contacts(&self) -> Result<Vec<ContactRow>, StoreError> {
        let pool = self.ready_pool().await?;
        let rows = sqlx::query_as::<_, ContactRow>(
            "SELECT id, name, public_key FROM contacts_vault ORDER BY id",
        )
        .fetch_all(&pool)
        .await?;
        Ok(rows)
    }

    /// Look a contact up by public key.
    pub async fn find_contact(&self, public_key: &str) -> Result<Option<ContactRow>, StoreError> {
        let pool = self.ready_pool().await?;
        let row = sqlx::query_as::<_, ContactRow>(
            "SELECT id, name, public_key FROM contacts_vault WHERE public_key = ?",
        )
        .bind(public_key)
        .fetch_optional(&pool)
        .await?;
        Ok(row)
    }
}
