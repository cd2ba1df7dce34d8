//! Explicit configuration for key derivation and the entry store.
//!
//! Nothing in the core reads the environment; callers build a [`DiaryConfig`]
//! and hand it to [`crate::EntryStore`] and [`crate::derive_key`].

use std::path::{Path, PathBuf};

/// PBKDF2 rounds used when nothing else is configured.
pub const DEFAULT_KDF_ITERATIONS: u32 = 480_000;

/// Default salt, as UTF-8 text.
///
/// Stores created by earlier releases used the UTF-8 encoding of this string
/// as their salt, so the bytes must never change.
pub const DEFAULT_SALT: &str = "\u{f0}7\u{c1}:\u{ee}:P^\u{84}\u{d5}\u{f5}\u{a2}c}~\u{f1}";

/// Key derivation parameters.
///
/// The salt must stay stable for the lifetime of a diary directory: changing
/// it makes every existing entry undecryptable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KdfParams {
    pub salt: Vec<u8>,
    pub iterations: u32,
}

impl KdfParams {
    pub fn new(salt: impl Into<Vec<u8>>, iterations: u32) -> Self {
        Self {
            salt: salt.into(),
            iterations,
        }
    }
}

impl Default for KdfParams {
    fn default() -> Self {
        Self::new(DEFAULT_SALT.as_bytes(), DEFAULT_KDF_ITERATIONS)
    }
}

/// Configuration consumed by the core.
#[derive(Debug, Clone)]
pub struct DiaryConfig {
    /// Root directory holding one file per entry
    pub diary_dir: PathBuf,
    /// Key derivation parameters
    pub kdf: KdfParams,
    /// Let reads resolve identifiers as paths outside the diary directory
    pub allow_external_paths: bool,
}

impl DiaryConfig {
    /// Create a config for `diary_dir` with default KDF parameters.
    pub fn new(diary_dir: impl Into<PathBuf>) -> Self {
        Self {
            diary_dir: diary_dir.into(),
            kdf: KdfParams::default(),
            allow_external_paths: true,
        }
    }

    pub fn with_salt(mut self, salt: impl Into<Vec<u8>>) -> Self {
        self.kdf.salt = salt.into();
        self
    }

    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.kdf.iterations = iterations;
        self
    }

    pub fn with_external_paths(mut self, allow: bool) -> Self {
        self.allow_external_paths = allow;
        self
    }

    pub fn diary_dir(&self) -> &Path {
        &self.diary_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_salt_bytes_are_utf8_encoded() {
        let salt = KdfParams::default().salt;
        // 16 characters, 8 of them above U+007F and therefore two bytes each
        assert_eq!(DEFAULT_SALT.chars().count(), 16);
        assert_eq!(salt.len(), 24);
        assert_eq!(&salt[..3], &[0xc3, 0xb0, b'7']);
    }

    #[test]
    fn test_builder_overrides() {
        let config = DiaryConfig::new("/tmp/diary")
            .with_salt(b"test salt".to_vec())
            .with_iterations(10)
            .with_external_paths(false);

        assert_eq!(config.kdf, KdfParams::new(b"test salt".to_vec(), 10));
        assert!(!config.allow_external_paths);
        assert_eq!(config.diary_dir(), Path::new("/tmp/diary"));
    }

    #[test]
    fn test_defaults() {
        let config = DiaryConfig::new("d");
        assert_eq!(config.kdf.iterations, DEFAULT_KDF_ITERATIONS);
        assert!(config.allow_external_paths);
    }
}
