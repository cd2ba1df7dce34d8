//! Key derivation using PBKDF2-HMAC-SHA256.
//!
//! The derivation is deliberately slow (480 000 rounds by default) to raise
//! the cost of offline guessing. It is fully deterministic: the same password,
//! salt and round count always produce the same key, and that is the only way
//! a diary is ever unlocked. No key is stored anywhere.

use base64::engine::general_purpose::URL_SAFE;
use base64::Engine;
use hmac::Hmac;
use pbkdf2::pbkdf2;
use sha2::Sha256;
use zeroize::{ZeroizeOnDrop, Zeroizing};

use crate::config::KdfParams;
use crate::error::{DiaryError, Result};

/// Length of derived key in bytes.
pub const KEY_LENGTH: usize = 32;

/// Length of each key half (signing, encryption).
const HALF_LENGTH: usize = KEY_LENGTH / 2;

/// A cryptographic key derived from a password.
///
/// The first half authenticates tokens, the second half encrypts them.
/// Key material is zeroized from memory when dropped.
#[derive(Clone, PartialEq, Eq, ZeroizeOnDrop)]
pub struct DerivedKey {
    key: [u8; KEY_LENGTH],
}

impl DerivedKey {
    /// Wrap raw key bytes.
    ///
    /// # Security
    ///
    /// The caller is responsible for ensuring the bytes come from a secure source.
    pub fn from_bytes(bytes: [u8; KEY_LENGTH]) -> Self {
        Self { key: bytes }
    }

    /// Decode a key from its URL-safe base64 text form.
    ///
    /// This is the textual key format used by earlier releases, so a key
    /// exported from one can be used directly.
    pub fn from_base64(encoded: &str) -> Result<Self> {
        let decoded = Zeroizing::new(
            URL_SAFE
                .decode(encoded.trim())
                .map_err(|e| DiaryError::InvalidInput(format!("Invalid key encoding: {}", e)))?,
        );
        let bytes: [u8; KEY_LENGTH] = decoded.as_slice().try_into().map_err(|_| {
            DiaryError::InvalidInput(format!(
                "Key must be {} bytes (got {})",
                KEY_LENGTH,
                decoded.len()
            ))
        })?;
        Ok(Self::from_bytes(bytes))
    }

    /// Encode the key as URL-safe base64 (with padding).
    pub fn to_base64(&self) -> Zeroizing<String> {
        Zeroizing::new(URL_SAFE.encode(self.key))
    }

    /// Get a reference to the raw key bytes.
    ///
    /// # Security
    ///
    /// Avoid storing or logging this value. Use only for immediate encryption operations.
    pub fn as_bytes(&self) -> &[u8; KEY_LENGTH] {
        &self.key
    }

    pub(crate) fn signing_key(&self) -> &[u8] {
        &self.key[..HALF_LENGTH]
    }

    pub(crate) fn encryption_key(&self) -> &[u8] {
        &self.key[HALF_LENGTH..]
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKey")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

/// Derive an encryption key from a password.
///
/// # Arguments
///
/// * `password` - The password to derive from; empty passwords are accepted,
///   quality checks are the caller's business
/// * `params` - Salt and round count
///
/// # Errors
///
/// Returns `DiaryError::InvalidInput` if `params.iterations` is zero.
///
/// # Examples
///
/// ```
/// use diary_core::{derive_key, KdfParams};
///
/// let params = KdfParams::new(b"per-diary-salt".to_vec(), 1_000);
/// let key = derive_key("my-password", &params).unwrap();
/// assert_eq!(key.as_bytes(), derive_key("my-password", &params).unwrap().as_bytes());
/// ```
pub fn derive_key(password: &str, params: &KdfParams) -> Result<DerivedKey> {
    if params.iterations == 0 {
        return Err(DiaryError::InvalidInput(
            "KDF iterations must be greater than zero".to_string(),
        ));
    }

    let mut key_bytes = Zeroizing::new([0u8; KEY_LENGTH]);
    pbkdf2::<Hmac<Sha256>>(
        password.as_bytes(),
        &params.salt,
        params.iterations,
        &mut key_bytes[..],
    )
    .map_err(|e| DiaryError::Crypto(format!("Key derivation failed: {}", e)))?;

    Ok(DerivedKey::from_bytes(*key_bytes))
}
