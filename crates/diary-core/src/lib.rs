//! # Diary Core
//!
//! Core library for Diary - an encrypted, file-per-entry personal journal.
//!
//! This crate owns everything that touches key material or the on-disk store,
//! independent of the CLI that drives it.
//!
//! ## Architecture
//!
//! - **crypto**: password-based key derivation and the authenticated token cipher
//! - **store**: identifier parsing, directory enumeration, entry read/write
//! - **config**: the explicit configuration every store is built from
//! - **fs**: create-if-absent file writes
//!
//! The core performs no logging and no terminal I/O; callers own messaging.

pub mod config;
pub mod crypto;
pub mod error;
pub mod fs;
pub mod store;

pub use config::{DiaryConfig, KdfParams};
pub use crypto::{derive_key, DerivedKey};
pub use error::{DiaryError, Result};
pub use store::{EntryIndex, EntryStore, Identifier, Listing};

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
