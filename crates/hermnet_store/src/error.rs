use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Store not initialised: await init() before any accessor")]
    Uninitialized,

    #[error("Schema creation failed: {0}")]
    Schema(String),

    #[error("Key alias already stored: {0}")]
    DuplicateAlias(String),

    #[error("Contact public key already stored: {0}")]
    DuplicateContact(String),

    #[error("Vault is locked; unlock before sealing or opening key material")]
    VaultLocked,

    #[error("Crypto error: {0}")]
    Crypto(#[from] hermnet_crypto::CryptoError),
}
