//! Vault: in-memory sealing key unlocked by user password.
//!
//! The vault holds the 32-byte key that seals `key_store` blobs. Locking
//! zeroizes the key; every seal/open goes through `with_key` and fails
//! with `VaultLocked` once the key is gone. The store itself never sees
//! plaintext key material outside a `with_key` closure.

use std::sync::Arc;
use tokio::sync::RwLock;
use zeroize::ZeroizeOnDrop;

use hermnet_crypto::kdf::{generate_salt, vault_key_from_password};

use crate::error::StoreError;

#[derive(ZeroizeOnDrop)]
struct VaultInner {
    key: [u8; 32],
}

/// Thread-safe vault handle. Clone to share across tasks.
#[derive(Clone)]
pub struct Vault {
    inner: Arc<RwLock<Option<VaultInner>>>,
}

impl Vault {
    pub fn new() -> Self {
        Self { inner: Arc::new(RwLock::new(None)) }
    }

    /// Unlock the vault with the given password and salt.
    /// Call before any sealed read/write.
    pub async fn unlock(&self, password: &[u8], salt: &[u8; 16]) -> Result<(), StoreError> {
        let vault_key = vault_key_from_password(password, salt)?;
        let mut guard = self.inner.write().await;
        *guard = Some(VaultInner { key: vault_key.0 });
        Ok(())
    }

    /// Unlock with an existing key (e.g. from an OS keyring).
    pub async fn unlock_with_key(&self, key: [u8; 32]) -> Result<(), StoreError> {
        let mut guard = self.inner.write().await;
        *guard = Some(VaultInner { key });
        Ok(())
    }

    /// Lock the vault - zeroizes the key.
    pub async fn lock(&self) {
        let mut guard = self.inner.write().await;
        *guard = None;
    }

    pub async fn is_locked(&self) -> bool {
        self.inner.read().await.is_none()
    }

    /// Access the raw key for one seal/open operation.
    /// Returns Err if the vault is locked.
    pub async fn with_key<F, R>(&self, f: F) -> Result<R, StoreError>
    where
        F: FnOnce(&[u8; 32]) -> Result<R, StoreError>,
    {
        let guard = self.inner.read().await;
        match guard.as_ref() {
            Some(inner) => f(&inner.key),
            None => Err(StoreError::VaultLocked),
        }
    }
}

impl Default for Vault {
    fn default() -> Self {
        Self::new()
    }
}

/// Generate a fresh salt for a new account. Store it next to the sealed
/// material (it is not secret).
pub fn new_vault_salt() -> [u8; 16] {
    generate_salt()
}
