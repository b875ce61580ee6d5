//! Schema DDL.
//!
//! The table shapes are part of the observable interface (external
//! inspection tools read the same file), so the statements below are the
//! contract, not an implementation detail.
//!
//! Every statement is `IF NOT EXISTS` and is re-executed on every open.
//! There is no migration bookkeeping: a crash that leaves one table
//! missing is healed by the next `init()` rather than erroring on
//! "already exists".

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::StoreError;

pub const CREATE_KEY_STORE: &str = "\
CREATE TABLE IF NOT EXISTS key_store (
  id INTEGER PRIMARY KEY NOT NULL,
  key_alias TEXT UNIQUE,
  encrypted_key TEXT
)";

pub const CREATE_CONTACTS_VAULT: &str = "\
CREATE TABLE IF NOT EXISTS contacts_vault (
  id INTEGER PRIMARY KEY NOT NULL,
  name TEXT,
  public_key TEXT UNIQUE
)";

/// Ensure both tables exist. Idempotent.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), StoreError> {
    for ddl in [CREATE_KEY_STORE, CREATE_CONTACTS_VAULT] {
        sqlx::query(ddl)
            .execute(pool)
            .await
            .map_err(|e| StoreError::Schema(e.to_string()))?;
    }
    debug!("schema ensured");
    Ok(())
}
