//! Encode-only transforms used when answering queries.
//!
//! Two operations are provided: standard base64 encoding of arbitrary bytes, and
//! AES-128-CBC encryption of a short text, which is itself returned as base64.
use aes::Aes128;
use base64::prelude::*;
use cbc::cipher::{BlockEncryptMut, KeyIvInit, block_padding::Pkcs7};
use thiserror::Error;

/// Key length required by AES-128.
pub const KEY_LENGTH: usize = 16;

type Aes128CbcEnc = cbc::Encryptor<Aes128>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("cipher key must be {expected} bytes, received {actual}")]
    InvalidKeyLength { expected: usize, actual: usize },
}

/// Encodes `bytes` with the standard, padded base64 alphabet.
pub fn encode_base64(bytes: impl AsRef<[u8]>) -> String {
    BASE64_STANDARD.encode(bytes)
}

/// Validates `key` and encrypts `plaintext` with it.
///
/// See [`CipherKey::encrypt_to_text`].
pub fn encrypt_to_text(plaintext: &str, key: &[u8]) -> Result<String, CodecError> {
    Ok(CipherKey::new(key)?.encrypt_to_text(plaintext))
}

/// A length-checked AES-128 key.
///
/// Construction is the only place a key can be rejected, so a backend holding a
/// `CipherKey` can never fail to encrypt.
#[derive(Clone, PartialEq, Eq)]
pub struct CipherKey([u8; KEY_LENGTH]);

impl CipherKey {
    pub fn new(key: &[u8]) -> Result<Self, CodecError> {
        let key: [u8; KEY_LENGTH] = key.try_into().map_err(|_| CodecError::InvalidKeyLength {
            expected: KEY_LENGTH,
            actual: key.len(),
        })?;
        Ok(Self(key))
    }

    /// Encrypts `plaintext` with AES-128-CBC (zero IV, PKCS#7 padding) and returns
    /// the ciphertext as base64.
    pub fn encrypt_to_text(&self, plaintext: &str) -> String {
        let iv = [0_u8; 16];
        let cipher = Aes128CbcEnc::new(&self.0.into(), &iv.into());
        let ciphertext = cipher.encrypt_padded_vec_mut::<Pkcs7>(plaintext.as_bytes());

        encode_base64(ciphertext)
    }
}

impl std::fmt::Debug for CipherKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("CipherKey(..)")
    }
}

impl From<[u8; KEY_LENGTH]> for CipherKey {
    fn from(value: [u8; KEY_LENGTH]) -> Self {
        Self(value)
    }
}

impl TryFrom<&str> for CipherKey {
    type Error = CodecError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value.as_bytes())
    }
}
