//! hermnet_store - local persistence for Hermnet identities and contacts
//!
//! # Encryption strategy
//! SQLite does NOT natively encrypt. We use application-level sealing:
//! - Key material is stored in `key_store` as XChaCha20-Poly1305
//!   ciphertext, hex-encoded; the store reads and writes blobs only and
//!   never decrypts on its own.
//! - The vault key is derived from the user password via Argon2id and
//!   held in memory only while the app is unlocked.
//! - Contact metadata (names, public keys) is plaintext to allow
//!   efficient queries; none of it is secret.
//!
//! # Lifecycle
//! `Store::new` constructs; `Store::init` opens the file, switches it to
//! WAL journaling and ensures the schema with idempotent DDL. Accessors
//! called before `init` fail fast with `StoreError::Uninitialized`.

pub mod contacts;
pub mod db;
pub mod error;
pub mod keystore;
pub mod models;
pub mod schema;
pub mod vault;

pub use db::Store;
pub use error::StoreError;
pub use models::{ContactRow, KeyStoreRow};
pub use vault::Vault;
