//! The encrypted entry store.
//!
//! One file per entry, one token per file, directly under the diary
//! directory. Every operation re-enumerates the directory so Day Zero always
//! reflects what is on disk.

pub mod identifier;
pub mod index;

use std::io;
use std::path::{Component, Path, PathBuf};

use chrono::{Local, NaiveDate};
use serde::Serialize;

use crate::config::DiaryConfig;
use crate::crypto::{open, seal, DerivedKey};
use crate::error::{DiaryError, Result};
use crate::fs::write_new_file;

pub use identifier::{dated_filename, Identifier};
pub use index::{parse_dated_filename, DatedEntry, EntryIndex};

/// A dated entry labelled with its offset from Day Zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListedEntry {
    pub offset: i64,
    pub date: NaiveDate,
    pub filename: String,
}

/// Entries prepared for display.
///
/// Dated offsets are exactly the integers a forward identifier accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Listing {
    pub diary_dir: PathBuf,
    pub day_zero: NaiveDate,
    pub dated: Vec<ListedEntry>,
    pub named: Vec<String>,
}

impl Listing {
    fn from_index(diary_dir: &Path, index: EntryIndex) -> Self {
        let dated = index
            .dated
            .iter()
            .map(|entry| ListedEntry {
                offset: index.offset_of(entry.date),
                date: entry.date,
                filename: entry.filename.clone(),
            })
            .collect();
        Self {
            diary_dir: diary_dir.to_path_buf(),
            day_zero: index.day_zero,
            dated,
            named: index.named,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.dated.is_empty() && self.named.is_empty()
    }
}

/// File-per-entry store rooted at the configured diary directory.
#[derive(Debug, Clone)]
pub struct EntryStore {
    config: DiaryConfig,
    today: Option<NaiveDate>,
}

impl EntryStore {
    pub fn new(config: DiaryConfig) -> Self {
        Self {
            config,
            today: None,
        }
    }

    /// Pin "today" instead of reading the local clock.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn config(&self) -> &DiaryConfig {
        &self.config
    }

    pub fn diary_dir(&self) -> &Path {
        self.config.diary_dir()
    }

    /// Today's date in local time, unless pinned.
    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }

    /// Scan the diary directory.
    pub fn enumerate(&self) -> Result<EntryIndex> {
        EntryIndex::scan(self.diary_dir(), self.today())
    }

    /// Resolve an identifier to a bare filename against the live directory.
    pub fn resolve(&self, identifier: &Identifier) -> Result<String> {
        let index = self.enumerate()?;
        identifier.resolve(index.day_zero, self.today())
    }

    /// Path a write of `identifier` would create.
    ///
    /// # Errors
    ///
    /// Returns `DiaryError::InvalidIdentifier` if the resolved name is not a
    /// plain file name, and `DiaryError::AlreadyExists` if the entry exists.
    pub fn new_entry_path(&self, identifier: &Identifier) -> Result<PathBuf> {
        let filename = self.resolve(identifier)?;
        ensure_plain_filename(&filename)?;

        let path = self.diary_dir().join(filename);
        if path.exists() {
            return Err(DiaryError::AlreadyExists(path));
        }
        Ok(path)
    }

    /// Seal `plaintext` and store it as a new entry.
    ///
    /// Creates the diary directory if needed. Entries are immutable: an
    /// existing entry is never replaced, even by a concurrent writer.
    ///
    /// # Errors
    ///
    /// Returns `DiaryError::AlreadyExists` if the entry exists.
    pub fn write(
        &self,
        identifier: &Identifier,
        plaintext: &[u8],
        key: &DerivedKey,
    ) -> Result<PathBuf> {
        let path = self.new_entry_path(identifier)?;
        std::fs::create_dir_all(self.diary_dir())?;

        let token = seal(key, plaintext)?;
        write_new_file(&path, &token).map_err(|err| {
            if err.kind() == io::ErrorKind::AlreadyExists {
                DiaryError::AlreadyExists(path.clone())
            } else {
                DiaryError::from(err)
            }
        })?;
        Ok(path)
    }

    /// Find the file an identifier refers to.
    ///
    /// The resolved name is first tried as a path on its own (when
    /// `allow_external_paths` is set), then under the diary directory.
    ///
    /// # Errors
    ///
    /// Returns `DiaryError::NotFound` if neither location holds a file, and
    /// `DiaryError::InvalidIdentifier` if external paths are disabled and the
    /// resolved name is not a plain file name.
    pub fn locate(&self, identifier: &Identifier) -> Result<PathBuf> {
        let filename = self.resolve(identifier)?;

        if self.config.allow_external_paths {
            let direct = PathBuf::from(&filename);
            if direct.is_file() {
                return Ok(direct);
            }
        } else {
            ensure_plain_filename(&filename)?;
        }

        let in_diary = self.diary_dir().join(&filename);
        if in_diary.is_file() {
            return Ok(in_diary);
        }
        Err(DiaryError::NotFound(in_diary))
    }

    /// Locate, load and decrypt an entry.
    ///
    /// # Errors
    ///
    /// Returns `DiaryError::NotFound` if the entry is missing and
    /// `DiaryError::Integrity` if it cannot be opened with `key`.
    pub fn read(&self, identifier: &Identifier, key: &DerivedKey) -> Result<Vec<u8>> {
        let path = self.locate(identifier)?;
        read_entry_file(&path, key)
    }

    /// Enumerate and label entries for display.
    pub fn list(&self) -> Result<Listing> {
        let index = self.enumerate()?;
        Ok(Listing::from_index(self.diary_dir(), index))
    }
}

/// Load and decrypt a single entry file.
pub fn read_entry_file(path: &Path, key: &DerivedKey) -> Result<Vec<u8>> {
    let token = std::fs::read(path)?;
    open(key, &token)
}

fn ensure_plain_filename(filename: &str) -> Result<()> {
    let mut components = Path::new(filename).components();
    let plain = matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    ) && !filename.contains(['/', '\\']);

    if plain {
        Ok(())
    } else {
        Err(DiaryError::InvalidIdentifier(format!(
            "Entry name must be a plain file name: {}",
            filename
        )))
    }
}
