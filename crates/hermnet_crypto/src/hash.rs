//! Hash utilities.
//!
//! `sha256_hex` is the general-purpose hashing boundary exposed to the
//! application layer; `digest` (BLAKE3) backs identity fingerprints.

use sha2::{Digest, Sha256};

/// SHA-256 of `data`, hex-encoded.
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

/// 32-byte BLAKE3 digest.
pub fn digest(data: &[u8]) -> [u8; 32] {
    blake3::hash(data).into()
}
