//! hermnet_crypto - identity and sealing primitives for Hermnet
//!
//! # Design principles
//! - NO custom crypto; all primitives come from audited Rust crates.
//! - Zeroize all secret material on drop.
//! - Services are plain constructible values, wired by the composition
//!   root; no module-level singletons.
//!
//! # Module layout
//! - `identity` - Ed25519 identity generation + `HNET-` handle derivation
//! - `aead`     - XChaCha20-Poly1305 seal/open for stored key material
//! - `kdf`      - Argon2id vault-key derivation
//! - `hash`     - SHA-256 / BLAKE3 utilities
//! - `error`    - unified error type

pub mod aead;
pub mod error;
pub mod hash;
pub mod identity;
pub mod kdf;

pub use error::CryptoError;
pub use identity::{Identity, IdentityService};
