//! Runtime settings for the backend.
use crate::codec::{CipherKey, CodecError, KEY_LENGTH};

/// Name announced in the handshake banner.
pub const DEFAULT_BANNER_NAME: &str = "Rust";

/// Built-in AES-128 key, padded with `*` to the required 16 bytes.
pub const DEFAULT_KEY: &[u8; KEY_LENGTH] = b"SECRET_PASS*****";

#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub banner_name: String,
    pub key: CipherKey,
}

impl BackendConfig {
    /// Builds a configuration, rejecting keys of the wrong length.
    pub fn new(banner_name: impl Into<String>, key: &str) -> Result<Self, CodecError> {
        Ok(Self {
            banner_name: banner_name.into(),
            key: CipherKey::try_from(key)?,
        })
    }

    /// Text following `OK\t` in a successful handshake.
    pub fn banner(&self) -> String {
        format!("{} backend starting", self.banner_name)
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            banner_name: DEFAULT_BANNER_NAME.to_string(),
            key: CipherKey::from(*DEFAULT_KEY),
        }
    }
}
