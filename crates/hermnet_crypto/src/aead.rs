//! Authenticated encryption for sealed key material.
//!
//! XChaCha20-Poly1305. Key size: 32 bytes. Nonce: 24 bytes (random).
//! Tag: 16 bytes.
//!
//! Wire format:
//!   [ nonce (24 bytes) | ciphertext + tag ]

use chacha20poly1305::{
    aead::{Aead, AeadCore, KeyInit, OsRng as AeadOsRng},
    XChaCha20Poly1305,
};
use zeroize::Zeroizing;

use crate::error::CryptoError;

/// Seal `plaintext` with a 32-byte key, prepending a random 24-byte nonce.
/// `aad` is authenticated but not encrypted; callers pass a domain string
/// so a blob sealed for one purpose cannot be opened under another.
pub fn seal(key: &[u8; 32], plaintext: &[u8], aad: &[u8]) -> Result<Vec<u8>, CryptoError> {
    let cipher = XChaCha20Poly1305::new_from_slice(key).map_err(|_| CryptoError::AeadEncrypt)?;

    let nonce = XChaCha20Poly1305::generate_nonce(&mut AeadOsRng);

    let ciphertext = cipher
        .encrypt(&nonce, chacha20poly1305::aead::Payload { msg: plaintext, aad })
        .map_err(|_| CryptoError::AeadEncrypt)?;

    let mut out = Vec::with_capacity(24 + ciphertext.len());
    out.extend_from_slice(&nonce);
    out.extend_from_slice(&ciphertext);
    Ok(out)
}

/// Open wire-format bytes (nonce || ciphertext+tag).
pub fn open(key: &[u8; 32], data: &[u8], aad: &[u8]) -> Result<Zeroizing<Vec<u8>>, CryptoError> {
    if data.len() < 24 {
        return Err(CryptoError::AeadDecrypt);
    }
    let (nonce_bytes, ct) = data.split_at(24);
    let nonce = chacha20poly1305::XNonce::from_slice(nonce_bytes);

    let cipher = XChaCha20Poly1305::new_from_slice(key).map_err(|_| CryptoError::AeadDecrypt)?;

    let plaintext = cipher
        .decrypt(nonce, chacha20poly1305::aead::Payload { msg: ct, aad })
        .map_err(|_| CryptoError::AeadDecrypt)?;

    Ok(Zeroizing::new(plaintext))
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: [u8; 32] = [7u8; 32];

    #[test]
    fn seal_open_round_trip() {
        let sealed = seal(&KEY, b"private scalar", b"test-domain").expect("seal");
        let opened = open(&KEY, &sealed, b"test-domain").expect("open");
        assert_eq!(&opened[..], b"private scalar");
    }

    #[test]
    fn tampered_ciphertext_is_rejected() {
        let mut sealed = seal(&KEY, b"private scalar", b"test-domain").expect("seal");
        let last = sealed.len() - 1;
        sealed[last] ^= 0x01;
        assert!(matches!(
            open(&KEY, &sealed, b"test-domain"),
            Err(CryptoError::AeadDecrypt)
        ));
    }

    #[test]
    fn wrong_domain_is_rejected() {
        let sealed = seal(&KEY, b"private scalar", b"test-domain").expect("seal");
        assert!(matches!(
            open(&KEY, &sealed, b"other-domain"),
            Err(CryptoError::AeadDecrypt)
        ));
    }

    #[test]
    fn truncated_input_is_rejected() {
        assert!(matches!(
            open(&KEY, &[0u8; 10], b"test-domain"),
            Err(CryptoError::AeadDecrypt)
        ));
    }
}
