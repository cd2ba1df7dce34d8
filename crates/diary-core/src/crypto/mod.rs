//! Cryptographic operations for Diary.
//!
//! - **key**: PBKDF2-HMAC-SHA256 password-based key derivation
//! - **token**: AES-CBC + HMAC-SHA256 authenticated entry tokens
//!
//! ## Threat Model
//!
//! We defend against:
//! - Theft of the diary directory
//! - Tampering with or corruption of entry files
//! - Offline brute-force attacks on the password (slow KDF)
//!
//! We do NOT defend against:
//! - Compromised OS / keylogger
//! - An attacker who already has the password or a decrypted entry on screen

pub mod key;
pub mod token;

pub use key::{derive_key, DerivedKey, KEY_LENGTH};
pub use token::{open, open_with_ttl, seal, token_timestamp, TOKEN_VERSION};
