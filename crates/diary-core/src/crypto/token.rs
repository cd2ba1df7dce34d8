//! Authenticated entry tokens.
//!
//! A token is the URL-safe base64 encoding (with padding) of:
//!
//! ```text
//! version (1) | timestamp (8, big-endian seconds) | IV (16) | ciphertext (16n) | HMAC (32)
//! ```
//!
//! The ciphertext is AES-128-CBC with PKCS#7 padding under the encryption half
//! of the key; the HMAC-SHA256 covers every byte before it and uses the signing
//! half. The layout is byte-compatible with tokens written by earlier releases.
//!
//! Every decoding failure returns [`DiaryError::Integrity`], whether the key is
//! wrong, the bytes were corrupted or the structure is malformed.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use aes::Aes128;
use base64::engine::general_purpose::URL_SAFE;
use base64::Engine;
use cbc::cipher::block_padding::Pkcs7;
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use super::key::DerivedKey;
use crate::error::{DiaryError, Result};

type Aes128CbcEnc = cbc::Encryptor<Aes128>;
type Aes128CbcDec = cbc::Decryptor<Aes128>;
type HmacSha256 = Hmac<Sha256>;

/// Version tag of the only supported token layout.
pub const TOKEN_VERSION: u8 = 0x80;

const TIMESTAMP_LEN: usize = 8;
const IV_LEN: usize = 16;
const BLOCK_LEN: usize = 16;
const MAC_LEN: usize = 32;
const HEADER_LEN: usize = 1 + TIMESTAMP_LEN + IV_LEN;

/// Tokens stamped further than this into the future fail freshness checks.
const MAX_CLOCK_SKEW_SECS: u64 = 60;

/// Encrypt and authenticate `plaintext`.
///
/// A fresh random IV is drawn for every call, so sealing the same plaintext
/// twice under the same key yields two different tokens.
///
/// # Examples
///
/// ```
/// use diary_core::crypto::{open, seal, DerivedKey};
///
/// let key = DerivedKey::from_bytes([42u8; 32]);
/// let token = seal(&key, b"dear diary").unwrap();
/// assert_eq!(open(&key, &token).unwrap(), b"dear diary");
/// ```
pub fn seal(key: &DerivedKey, plaintext: &[u8]) -> Result<Vec<u8>> {
    let mut iv = [0u8; IV_LEN];
    getrandom::getrandom(&mut iv)
        .map_err(|e| DiaryError::Crypto(format!("Failed to generate IV: {}", e)))?;
    seal_with(key, plaintext, unix_now()?, &iv)
}

pub(crate) fn seal_with(
    key: &DerivedKey,
    plaintext: &[u8],
    timestamp: u64,
    iv: &[u8; IV_LEN],
) -> Result<Vec<u8>> {
    let ciphertext = Aes128CbcEnc::new_from_slices(key.encryption_key(), iv)
        .map_err(|e| DiaryError::Crypto(format!("Failed to create cipher: {}", e)))?
        .encrypt_padded_vec_mut::<Pkcs7>(plaintext);

    let mut raw = Vec::with_capacity(HEADER_LEN + ciphertext.len() + MAC_LEN);
    raw.push(TOKEN_VERSION);
    raw.extend_from_slice(&timestamp.to_be_bytes());
    raw.extend_from_slice(iv);
    raw.extend_from_slice(&ciphertext);

    let mut mac = new_mac(key)?;
    mac.update(&raw);
    raw.extend_from_slice(&mac.finalize().into_bytes());

    Ok(URL_SAFE.encode(raw).into_bytes())
}

/// Verify and decrypt a token.
///
/// # Errors
///
/// Returns `DiaryError::Integrity` for any malformed, tampered or
/// wrong-key token.
pub fn open(key: &DerivedKey, token: &[u8]) -> Result<Vec<u8>> {
    let raw = decode(token)?;
    verify_and_decrypt(key, &raw)
}

/// Verify and decrypt a token that must be younger than `ttl`.
///
/// Tokens older than `ttl`, or stamped more than a minute in the future,
/// fail with `DiaryError::Integrity`.
pub fn open_with_ttl(key: &DerivedKey, token: &[u8], ttl: Duration) -> Result<Vec<u8>> {
    let raw = decode(token)?;
    check_freshness(read_timestamp(&raw), ttl, unix_now()?)?;
    verify_and_decrypt(key, &raw)
}

/// Read the creation time embedded in a token.
///
/// The timestamp is not authenticated until the token is opened; use it for
/// display only.
pub fn token_timestamp(token: &[u8]) -> Result<DateTime<Utc>> {
    let raw = decode(token)?;
    let secs = i64::try_from(read_timestamp(&raw)).map_err(|_| DiaryError::Integrity)?;
    DateTime::from_timestamp(secs, 0).ok_or(DiaryError::Integrity)
}

fn decode(token: &[u8]) -> Result<Vec<u8>> {
    let raw = URL_SAFE
        .decode(token.trim_ascii())
        .map_err(|_| DiaryError::Integrity)?;

    let body_len = raw
        .len()
        .checked_sub(HEADER_LEN + MAC_LEN)
        .ok_or(DiaryError::Integrity)?;
    if body_len == 0 || body_len % BLOCK_LEN != 0 || raw[0] != TOKEN_VERSION {
        return Err(DiaryError::Integrity);
    }
    Ok(raw)
}

fn read_timestamp(raw: &[u8]) -> u64 {
    let mut bytes = [0u8; TIMESTAMP_LEN];
    bytes.copy_from_slice(&raw[1..1 + TIMESTAMP_LEN]);
    u64::from_be_bytes(bytes)
}

fn check_freshness(timestamp: u64, ttl: Duration, now: u64) -> Result<()> {
    if timestamp.saturating_add(ttl.as_secs()) < now {
        return Err(DiaryError::Integrity);
    }
    if now.saturating_add(MAX_CLOCK_SKEW_SECS) < timestamp {
        return Err(DiaryError::Integrity);
    }
    Ok(())
}

fn verify_and_decrypt(key: &DerivedKey, raw: &[u8]) -> Result<Vec<u8>> {
    let (signed, tag) = raw.split_at(raw.len() - MAC_LEN);

    let mut mac = new_mac(key)?;
    mac.update(signed);
    mac.verify_slice(tag).map_err(|_| DiaryError::Integrity)?;

    let iv = &signed[1 + TIMESTAMP_LEN..HEADER_LEN];
    let ciphertext = &signed[HEADER_LEN..];
    Aes128CbcDec::new_from_slices(key.encryption_key(), iv)
        .map_err(|e| DiaryError::Crypto(format!("Failed to create cipher: {}", e)))?
        .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
        .map_err(|_| DiaryError::Integrity)
}

fn new_mac(key: &DerivedKey) -> Result<HmacSha256> {
    <HmacSha256 as Mac>::new_from_slice(key.signing_key())
        .map_err(|e| DiaryError::Crypto(format!("Failed to create MAC: {}", e)))
}

fn unix_now() -> Result<u64> {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .map_err(|e| DiaryError::Crypto(format!("System time error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sequential_key() -> DerivedKey {
        let mut bytes = [0u8; 32];
        for (i, b) in bytes.iter_mut().enumerate() {
            *b = i as u8;
        }
        DerivedKey::from_bytes(bytes)
    }

    fn sequential_iv() -> [u8; IV_LEN] {
        let mut iv = [0u8; IV_LEN];
        for (i, b) in iv.iter_mut().enumerate() {
            *b = i as u8;
        }
        iv
    }

    fn reencode(raw: &[u8]) -> Vec<u8> {
        URL_SAFE.encode(raw).into_bytes()
    }

    // Tokens from an independent implementation of the same format, key bytes 0..32,
    // IV bytes 0..16 and timestamp 1_700_000_000.
    const KNOWN_TOKEN: &str = "gAAAAABlU_EAAAECAwQFBgcICQoLDA0OD7hNhH3zv5_IRK9fzdtMXIRybXwWrOTg2jGVLSp3AHJKmzmuGaILgDFlVcXXiz1LWQ==";
    const KNOWN_EMPTY_TOKEN: &str = "gAAAAABlU_EAAAECAwQFBgcICQoLDA0OD7eteCFsVWnW2hqrh_bbxWG2kgARxHn5BD1_8db41B-9AjTeFsfNLWkqNE3aSOKVfQ==";

    #[test]
    fn test_seal_matches_known_token() {
        let token = seal_with(&sequential_key(), b"dear diary", 1_700_000_000, &sequential_iv())
            .unwrap();
        assert_eq!(token, KNOWN_TOKEN.as_bytes());

        let empty = seal_with(&sequential_key(), b"", 1_700_000_000, &sequential_iv()).unwrap();
        assert_eq!(empty, KNOWN_EMPTY_TOKEN.as_bytes());
    }

    #[test]
    fn test_open_known_token() {
        let key = sequential_key();
        assert_eq!(open(&key, KNOWN_TOKEN.as_bytes()).unwrap(), b"dear diary");
        assert_eq!(open(&key, KNOWN_EMPTY_TOKEN.as_bytes()).unwrap(), b"");
    }

    #[test]
    fn test_round_trip() {
        let key = sequential_key();
        let plaintext = b"Hello, World! This is secret data.";

        let token = seal(&key, plaintext).unwrap();
        assert_eq!(open(&key, &token).unwrap(), plaintext);
    }

    #[test]
    fn test_large_plaintext_round_trip() {
        let key = sequential_key();
        let plaintext = vec![0x42u8; 1024 * 1024];

        let token = seal(&key, &plaintext).unwrap();
        assert_eq!(open(&key, &token).unwrap(), plaintext);
    }

    #[test]
    fn test_seal_is_randomized() {
        let key = sequential_key();
        let first = seal(&key, b"same plaintext").unwrap();
        let second = seal(&key, b"same plaintext").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_token_layout() {
        let key = sequential_key();
        let token = seal(&key, b"0123456789abcdef").unwrap();
        let raw = URL_SAFE.decode(&token).unwrap();

        assert_eq!(raw[0], TOKEN_VERSION);
        // A full block of plaintext gains a full block of padding
        assert_eq!(raw.len(), HEADER_LEN + 32 + MAC_LEN);

        let stamped = read_timestamp(&raw);
        let now = unix_now().unwrap();
        assert!(stamped <= now && now - stamped < 60);
    }

    #[test]
    fn test_mac_covers_prefix() {
        let key = sequential_key();
        let token = seal(&key, b"authenticated").unwrap();
        let raw = URL_SAFE.decode(&token).unwrap();
        let (signed, tag) = raw.split_at(raw.len() - MAC_LEN);

        let mut mac = HmacSha256::new_from_slice(&key.as_bytes()[..16]).unwrap();
        mac.update(signed);
        assert!(mac.verify_slice(tag).is_ok());
    }

    #[test]
    fn test_wrong_key_fails_with_integrity() {
        let token = seal(&sequential_key(), b"secret").unwrap();
        let other = DerivedKey::from_bytes([9u8; 32]);
        assert!(matches!(open(&other, &token), Err(DiaryError::Integrity)));
    }

    #[test]
    fn test_tampering_any_region_fails() {
        let key = sequential_key();
        let token = seal(&key, b"do not touch").unwrap();
        let raw = URL_SAFE.decode(&token).unwrap();

        // version, timestamp, IV, ciphertext, MAC
        for index in [0, 3, 1 + TIMESTAMP_LEN + 2, HEADER_LEN + 1, raw.len() - 1] {
            let mut tampered = raw.clone();
            tampered[index] ^= 0x01;
            let result = open(&key, &reencode(&tampered));
            assert!(
                matches!(result, Err(DiaryError::Integrity)),
                "byte {} was not protected",
                index
            );
        }
    }

    #[test]
    fn test_malformed_tokens_fail_with_integrity() {
        let key = sequential_key();
        let token = seal(&key, b"structure").unwrap();
        let raw = URL_SAFE.decode(&token).unwrap();

        let truncated = reencode(&raw[..raw.len() - 1]);
        let header_only = reencode(&raw[..HEADER_LEN + MAC_LEN]);
        let cases: [&[u8]; 5] = [
            b"",
            b"not base64 at all!",
            b"gAAAAA==",
            &truncated,
            &header_only,
        ];
        for case in cases {
            assert!(matches!(open(&key, case), Err(DiaryError::Integrity)));
        }
    }

    #[test]
    fn test_surrounding_whitespace_ignored() {
        let key = sequential_key();
        let mut token = seal(&key, b"trailing newline").unwrap();
        token.push(b'\n');
        assert_eq!(open(&key, &token).unwrap(), b"trailing newline");
    }

    #[test]
    fn test_ttl_expiry() {
        let key = sequential_key();
        let old = seal_with(&key, b"stale", 1_000, &sequential_iv()).unwrap();

        assert!(open(&key, &old).is_ok());
        assert!(matches!(
            open_with_ttl(&key, &old, Duration::from_secs(3600)),
            Err(DiaryError::Integrity)
        ));

        let fresh = seal(&key, b"fresh").unwrap();
        assert_eq!(
            open_with_ttl(&key, &fresh, Duration::from_secs(3600)).unwrap(),
            b"fresh"
        );
    }

    #[test]
    fn test_future_timestamp_rejected_with_ttl() {
        let key = sequential_key();
        let future = unix_now().unwrap() + 3600;
        let token = seal_with(&key, b"from the future", future, &sequential_iv()).unwrap();

        assert!(matches!(
            open_with_ttl(&key, &token, Duration::from_secs(7200)),
            Err(DiaryError::Integrity)
        ));
    }

    #[test]
    fn test_token_timestamp() {
        let stamp = token_timestamp(KNOWN_TOKEN.as_bytes()).unwrap();
        assert_eq!(stamp.timestamp(), 1_700_000_000);
    }
}
