//! Database row models - these map to/from SQL rows.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct KeyStoreRow {
    pub id: i64,
    /// Logical name for the stored key ("identity", "session-N", ...).
    pub key_alias: String,
    /// Opaque sealed blob, hex-encoded. The store never decrypts this;
    /// all opens go through the vault.
    pub encrypted_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ContactRow {
    pub id: i64,
    /// Display name, not unique.
    pub name: String,
    /// Hex Ed25519 identity public key. Unique: the same peer cannot be
    /// stored twice under different names.
    pub public_key: String,
}
