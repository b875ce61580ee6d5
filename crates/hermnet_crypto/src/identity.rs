//! Identity generation.
//!
//! Each user mints one long-term Ed25519 keypair. The shareable handle is
//! derived from the public key: `HNET-` followed by the first 16 hex
//! characters of the encoded key, uppercased. Always 21 characters,
//! matching `^HNET-[0-9A-F]{16}$`.
//!
//! The handle commits to only 8 bytes of the key, so it is a convenience
//! label, not a collision-resistant digest: birthday collisions become
//! plausible around 2^32 issued identities. Widening it would change the
//! identifier contract for every consumer, so the truncation stays until
//! product decides otherwise. Authentication always compares full public
//! keys, never handles.

use std::fmt;

use ed25519_dalek::{Signature, Signer, SigningKey, Verifier as _, VerifyingKey};
use rand::{rngs::OsRng, RngCore};
use serde::{Deserialize, Serialize};
use zeroize::{Zeroizing, ZeroizeOnDrop};

use crate::error::CryptoError;
use crate::hash;

/// Handle prefix shared with every UI / network consumer.
pub const HANDLE_PREFIX: &str = "HNET-";

/// Total handle length: 5-char prefix + 16 hex chars.
pub const HANDLE_LEN: usize = 21;

const HANDLE_KEY_CHARS: usize = 16;

/// A generated keypair plus its derived handle. Both key halves are
/// lowercase hex; the secret half is zeroized when the value drops.
#[derive(Clone, Serialize, Deserialize, ZeroizeOnDrop)]
pub struct Identity {
    #[zeroize(skip)]
    pub id: String,
    #[zeroize(skip)]
    pub public_key: String,
    pub private_key: String,
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Identity")
            .field("id", &self.id)
            .field("public_key", &self.public_key)
            .field("private_key", &"<redacted>")
            .finish()
    }
}

impl Identity {
    /// Rebuild an identity from stored key material, re-deriving the
    /// handle. Fails if the halves do not belong to the same keypair.
    pub fn from_keys(public_key: String, private_key: String) -> Result<Self, CryptoError> {
        let signing_key = signing_key_from_hex(&private_key)?;
        let derived_public = hex::encode(signing_key.verifying_key().to_bytes());
        if derived_public != public_key {
            return Err(CryptoError::InvalidKey(
                "public key does not match the private scalar".into(),
            ));
        }
        let id = derive_handle(&public_key)?;
        Ok(Self { id, public_key, private_key })
    }

    /// Sign arbitrary bytes; returns the hex-encoded 64-byte signature.
    pub fn sign(&self, msg: &[u8]) -> Result<String, CryptoError> {
        let signing_key = signing_key_from_hex(&self.private_key)?;
        Ok(hex::encode(signing_key.sign(msg).to_bytes()))
    }

    /// Display fingerprint of this identity's public key.
    pub fn fingerprint(&self) -> Result<String, CryptoError> {
        fingerprint(&self.public_key)
    }
}

/// Stateless identity generator. Construct one wherever the composition
/// root wires it; every call draws fresh entropy from the OS, so sharing
/// an instance across concurrent callers is safe.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityService;

impl IdentityService {
    pub fn new() -> Self {
        Self
    }

    /// Mint a fresh identity.
    ///
    /// An entropy failure surfaces as `KeyGeneration` and must reach the
    /// caller; this path never falls back to a fixed or weaker seed.
    pub fn generate_identity(&self) -> Result<Identity, CryptoError> {
        let mut seed = Zeroizing::new([0u8; 32]);
        OsRng
            .try_fill_bytes(&mut seed[..])
            .map_err(|e| CryptoError::KeyGeneration(e.to_string()))?;

        let signing_key = SigningKey::from_bytes(&seed);
        let public_key = hex::encode(signing_key.verifying_key().to_bytes());
        let private_key = hex::encode(signing_key.to_bytes());

        // 32-byte keys encode to 64 hex chars; anything else means the
        // signing engine broke its contract.
        if public_key.len() != 64 {
            return Err(CryptoError::Encoding(format!(
                "public key encoded to {} chars, expected 64",
                public_key.len()
            )));
        }

        let id = derive_handle(&public_key)?;
        Ok(Identity { id, public_key, private_key })
    }
}

/// Derive the `HNET-` handle from a hex-encoded public key.
///
/// Deterministic: the same key always yields the same handle.
pub fn derive_handle(public_key_hex: &str) -> Result<String, CryptoError> {
    let head = public_key_hex.get(..HANDLE_KEY_CHARS).ok_or_else(|| {
        CryptoError::Encoding(format!(
            "public key too short for handle derivation ({} chars)",
            public_key_hex.len()
        ))
    })?;
    if !head.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(CryptoError::Encoding("public key is not hex".into()));
    }
    Ok(format!("{}{}", HANDLE_PREFIX, head.to_ascii_uppercase()))
}

/// Verify a hex-encoded Ed25519 signature made by `public_key_hex`.
pub fn verify(public_key_hex: &str, msg: &[u8], signature_hex: &str) -> Result<(), CryptoError> {
    let pk_bytes = hex::decode(public_key_hex)?;
    let vk = VerifyingKey::from_bytes(
        pk_bytes
            .as_slice()
            .try_into()
            .map_err(|_| CryptoError::InvalidKey("public key must be 32 bytes".into()))?,
    )
    .map_err(|e| CryptoError::InvalidKey(e.to_string()))?;

    let sig_bytes = hex::decode(signature_hex)?;
    let sig = Signature::from_bytes(
        sig_bytes
            .as_slice()
            .try_into()
            .map_err(|_| CryptoError::InvalidKey("signature must be 64 bytes".into()))?,
    );
    vk.verify(msg, &sig)
        .map_err(|_| CryptoError::SignatureVerification)
}

/// Human-readable fingerprint: BLAKE3 of the raw public key, truncated to
/// 20 bytes, hex-encoded in groups of 4 for side-by-side comparison.
pub fn fingerprint(public_key_hex: &str) -> Result<String, CryptoError> {
    let bytes = hex::decode(public_key_hex)?;
    if bytes.len() != 32 {
        return Err(CryptoError::InvalidKey(format!(
            "public key must be 32 bytes, got {}",
            bytes.len()
        )));
    }
    let digest = hash::digest(&bytes);
    let hex = hex::encode(&digest[..20]);
    Ok(hex
        .chars()
        .collect::<Vec<_>>()
        .chunks(4)
        .map(|c| c.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(" "))
}

fn signing_key_from_hex(private_key_hex: &str) -> Result<SigningKey, CryptoError> {
    let bytes = Zeroizing::new(hex::decode(private_key_hex)?);
    let arr: &[u8; 32] = bytes
        .as_slice()
        .try_into()
        .map_err(|_| CryptoError::InvalidKey("private key must be 32 bytes".into()))?;
    Ok(SigningKey::from_bytes(arr))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generate() -> Identity {
        IdentityService::new().generate_identity().expect("generate identity")
    }

    #[test]
    fn handle_has_fixed_shape() {
        let identity = generate();
        assert!(identity.id.starts_with(HANDLE_PREFIX));
        assert_eq!(identity.id.len(), HANDLE_LEN);
        assert!(identity.id[HANDLE_PREFIX.len()..]
            .chars()
            .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_lowercase()));
    }

    #[test]
    fn handle_suffix_is_uppercased_key_head() {
        let identity = generate();
        let expected = identity.public_key[..16].to_ascii_uppercase();
        assert_eq!(identity.id, format!("{}{}", HANDLE_PREFIX, expected));
    }

    #[test]
    fn derivation_is_deterministic() {
        let identity = generate();
        let again = derive_handle(&identity.public_key).expect("re-derive");
        assert_eq!(identity.id, again);
    }

    #[test]
    fn key_material_is_well_formed() {
        let identity = generate();
        assert_eq!(identity.public_key.len(), 64);
        assert_eq!(identity.private_key.len(), 64);
        assert!(identity.public_key.bytes().all(|b| b.is_ascii_hexdigit()));
        assert!(identity.private_key.bytes().all(|b| b.is_ascii_hexdigit()));
    }

    #[test]
    fn successive_identities_differ() {
        let a = generate();
        let b = generate();
        assert_ne!(a.public_key, b.public_key);
        assert_ne!(a.private_key, b.private_key);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn derive_handle_rejects_non_hex() {
        let err = derive_handle("zz12cd34ef56ab12ff").unwrap_err();
        assert!(matches!(err, CryptoError::Encoding(_)));
    }

    #[test]
    fn derive_handle_rejects_short_input() {
        let err = derive_handle("ab12").unwrap_err();
        assert!(matches!(err, CryptoError::Encoding(_)));
    }

    #[test]
    fn from_keys_round_trips_and_checks_pairing() {
        let identity = generate();
        let rebuilt =
            Identity::from_keys(identity.public_key.clone(), identity.private_key.clone())
                .expect("rebuild");
        assert_eq!(rebuilt.id, identity.id);

        let other = generate();
        let err = Identity::from_keys(other.public_key.clone(), identity.private_key.clone())
            .unwrap_err();
        assert!(matches!(err, CryptoError::InvalidKey(_)));
    }

    #[test]
    fn sign_verify_round_trip() {
        let identity = generate();
        let sig = identity.sign(b"challenge").expect("sign");
        verify(&identity.public_key, b"challenge", &sig).expect("verify");

        assert!(matches!(
            verify(&identity.public_key, b"tampered", &sig),
            Err(CryptoError::SignatureVerification)
        ));

        let other = generate();
        assert!(matches!(
            verify(&other.public_key, b"challenge", &sig),
            Err(CryptoError::SignatureVerification)
        ));
    }

    #[test]
    fn fingerprint_groups_hex() {
        let identity = generate();
        let fp = identity.fingerprint().expect("fingerprint");
        let groups: Vec<&str> = fp.split(' ').collect();
        assert_eq!(groups.len(), 10);
        assert!(groups
            .iter()
            .all(|g| g.len() == 4 && g.bytes().all(|b| b.is_ascii_hexdigit())));
    }
}
