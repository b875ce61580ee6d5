//! Database abstraction over SQLite via sqlx.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool};
use tokio::sync::RwLock;
use tracing::{debug, info};
use zeroize::Zeroizing;

use crate::{error::StoreError, schema, vault::Vault};

/// AAD domain for blobs sealed into `key_store`.
const SEAL_DOMAIN: &[u8] = b"hermnet-seal-v1";

/// Central store handle. Cheap to clone (Arc internally).
///
/// Lifecycle: `new` constructs an unopened store; `init` opens or creates
/// the backing file and ensures the schema; accessors fail with
/// `Uninitialized` until `init` has completed. The store never opens the
/// file implicitly.
#[derive(Clone)]
pub struct Store {
    path: PathBuf,
    state: Arc<RwLock<Option<SqlitePool>>>,
    vault: Vault,
}

impl Store {
    pub fn new(db_path: impl AsRef<Path>, vault: Vault) -> Self {
        Self {
            path: db_path.as_ref().to_path_buf(),
            state: Arc::new(RwLock::new(None)),
            vault,
        }
    }

    /// Open (or create) the SQLite database and ensure the schema.
    /// Idempotent: a second call is a no-op on the live handle.
    ///
    /// WAL journal mode and foreign-key enforcement are configured at
    /// connection time here, NOT in the schema pass, because SQLite
    /// forbids changing `journal_mode` inside a transaction.
    ///
    /// On schema failure the pool is closed and the store stays
    /// uninitialised; the DDL is all `IF NOT EXISTS`, so a retry heals a
    /// partially created schema instead of erroring on it.
    pub async fn init(&self) -> Result<(), StoreError> {
        let mut guard = self.state.write().await;
        if guard.is_some() {
            debug!("store already initialised, init is a no-op");
            return Ok(());
        }

        let opts = SqliteConnectOptions::new()
            .filename(&self.path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .foreign_keys(true);

        let pool = SqlitePool::connect_with(opts).await?;

        if let Err(e) = schema::ensure_schema(&pool).await {
            pool.close().await;
            return Err(e);
        }

        info!(path = %self.path.display(), "hermnet store opened");
        *guard = Some(pool);
        Ok(())
    }

    /// The live pool, or `None` before a successful `init`.
    /// Never initialises implicitly.
    pub async fn pool(&self) -> Option<SqlitePool> {
        self.state.read().await.clone()
    }

    /// Close the store: drops the pool and locks the vault.
    pub async fn close(&self) {
        let mut guard = self.state.write().await;
        if let Some(pool) = guard.take() {
            pool.close().await;
            info!(path = %self.path.display(), "hermnet store closed");
        }
        drop(guard);
        self.vault.lock().await;
    }

    pub fn vault(&self) -> &Vault {
        &self.vault
    }

    pub(crate) async fn ready_pool(&self) -> Result<SqlitePool, StoreError> {
        self.state.read().await.clone().ok_or(StoreError::Uninitialized)
    }

    // ── Sealing helpers ─────────────────────────────────────────────────

    /// Seal a plaintext value with the vault key; hex-encoded for storage.
    pub async fn seal_value(&self, plaintext: &[u8]) -> Result<String, StoreError> {
        self.vault
            .with_key(|key| {
                let ct = hermnet_crypto::aead::seal(key, plaintext, SEAL_DOMAIN)
                    .map_err(StoreError::Crypto)?;
                Ok(hex::encode(ct))
            })
            .await
    }

    /// Open a vault-sealed value.
    pub async fn open_value(&self, sealed_hex: &str) -> Result<Zeroizing<Vec<u8>>, StoreError> {
        let ct = hex::decode(sealed_hex)
            .map_err(|e| StoreError::Crypto(hermnet_crypto::CryptoError::HexDecode(e)))?;
        self.vault
            .with_key(|key| {
                hermnet_crypto::aead::open(key, &ct, SEAL_DOMAIN).map_err(StoreError::Crypto)
            })
            .await
    }
}
