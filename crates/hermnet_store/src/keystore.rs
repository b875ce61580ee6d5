//! Key store accessors.
//!
//! Rows hold opaque sealed blobs under a unique alias. A duplicate alias
//! is rejected at the schema level and surfaces as `DuplicateAlias`; the
//! stored value is never silently overwritten.

use tracing::debug;
use zeroize::Zeroizing;

use crate::{db::Store, error::StoreError, models::KeyStoreRow};

/// Alias under which the device identity's private key is sealed.
pub const IDENTITY_ALIAS: &str = "identity";

impl Store {
    /// Insert an already-sealed blob under `alias`.
    pub async fn put_key(&self, alias: &str, sealed_key: &str) -> Result<(), StoreError> {
        let pool = self.ready_pool().await?;
        let res = sqlx::query("INSERT INTO key_store (key_alias, encrypted_key) VALUES (?, ?)")
            .bind(alias)
            .bind(sealed_key)
            .execute(&pool)
            .await;
        match res {
            Ok(_) => {
                debug!(alias, "key stored");
                Ok(())
            }
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                Err(StoreError::DuplicateAlias(alias.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// The sealed blob for `alias`, or `None`.
    pub async fn get_key(&self, alias: &str) -> Result<Option<String>, StoreError> {
        let pool = self.ready_pool().await?;
        let sealed: Option<String> =
            sqlx::query_scalar("SELECT encrypted_key FROM key_store WHERE key_alias = ?")
                .bind(alias)
                .fetch_optional(&pool)
                .await?;
        Ok(sealed)
    }

    /// All stored key rows in insertion order. Blobs stay sealed.
    pub async fn list_keys(&self) -> Result<Vec<KeyStoreRow>, StoreError> {
        let pool = self.ready_pool().await?;
        let rows = sqlx::query_as::<_, KeyStoreRow>(
            "SELECT id, key_alias, encrypted_key FROM key_store ORDER BY id",
        )
        .fetch_all(&pool)
        .await?;
        Ok(rows)
    }

    /// Seal `plaintext` with the vault key and store it under `alias`.
    pub async fn put_sealed_key(&self, alias: &str, plaintext: &[u8]) -> Result<(), StoreError> {
        let sealed = self.seal_value(plaintext).await?;
        self.put_key(alias, &sealed).await
    }

    /// Fetch and open the blob stored under `alias`.
    pub async fn open_sealed_key(
        &self,
        alias: &str,
    ) -> Result<Option<Zeroizing<Vec<u8>>>, StoreError> {
        match self.get_key(alias).await? {
            Some(sealed) => Ok(Some(self.open_value(&sealed).await?)),
            None => Ok(None),
        }
    }
}
