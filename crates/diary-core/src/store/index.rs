//! Directory enumeration.
//!
//! The directory listing itself is the index: there is no manifest file to
//! keep consistent. Each scan reflects the live directory and is never cached.

use std::path::Path;

use chrono::NaiveDate;
use serde::Serialize;

use super::identifier::{DATE_FORMAT, ENTRY_EXTENSION};
use crate::error::Result;

/// An entry whose filename is a calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatedEntry {
    pub date: NaiveDate,
    pub filename: String,
}

/// Snapshot of a diary directory, partitioned by filename class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryIndex {
    /// Dated entries, ascending by date
    pub dated: Vec<DatedEntry>,
    /// Named entries, sorted by filename
    pub named: Vec<String>,
    /// Earliest dated entry, or today when there are none
    pub day_zero: NaiveDate,
}

impl EntryIndex {
    /// Scan the immediate files of `dir`.
    ///
    /// A missing directory yields an empty index. Subdirectories, files not
    /// ending in `.txt` and names that are not valid UTF-8 are skipped.
    pub fn scan(dir: &Path, today: NaiveDate) -> Result<Self> {
        let mut dated = Vec::new();
        let mut named = Vec::new();

        if dir.is_dir() {
            for entry in std::fs::read_dir(dir)? {
                let entry = entry?;
                if !entry.path().is_file() {
                    continue;
                }
                let Ok(filename) = entry.file_name().into_string() else {
                    continue;
                };
                if !filename.ends_with(ENTRY_EXTENSION) {
                    continue;
                }
                match parse_dated_filename(&filename) {
                    Some(date) => dated.push(DatedEntry { date, filename }),
                    None => named.push(filename),
                }
            }
        }

        Ok(Self::from_parts(dated, named, today))
    }

    fn from_parts(mut dated: Vec<DatedEntry>, mut named: Vec<String>, today: NaiveDate) -> Self {
        dated.sort_by_key(|entry| entry.date);
        named.sort();
        let day_zero = dated.first().map(|entry| entry.date).unwrap_or(today);
        Self {
            dated,
            named,
            day_zero,
        }
    }

    /// Offset of `date` from Day Zero, as accepted by forward identifiers.
    pub fn offset_of(&self, date: NaiveDate) -> i64 {
        (date - self.day_zero).num_days()
    }

    pub fn is_empty(&self) -> bool {
        self.dated.is_empty() && self.named.is_empty()
    }
}

/// Parse a strict `YYYY-MM-DD.txt` filename.
///
/// Only the exact 4-2-2 digit layout of a real calendar date matches; names
/// like `2024-1-3.txt` or `2024-02-30.txt` are named entries.
pub fn parse_dated_filename(filename: &str) -> Option<NaiveDate> {
    let stem = filename.strip_suffix(ENTRY_EXTENSION)?;
    let bytes = stem.as_bytes();
    if bytes.len() != 10 {
        return None;
    }
    let layout_ok = bytes.iter().enumerate().all(|(i, b)| match i {
        4 | 7 => *b == b'-',
        _ => b.is_ascii_digit(),
    });
    if !layout_ok {
        return None;
    }
    NaiveDate::parse_from_str(stem, DATE_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_dated_filename() {
        assert_eq!(parse_dated_filename("2024-01-03.txt"), Some(date(2024, 1, 3)));
        assert_eq!(parse_dated_filename("2024-1-3.txt"), None);
        assert_eq!(parse_dated_filename("2024-02-30.txt"), None);
        assert_eq!(parse_dated_filename("2024-01-03"), None);
        assert_eq!(parse_dated_filename("2024-01-03.md"), None);
        assert_eq!(parse_dated_filename("x2024-01-03.txt"), None);
        assert_eq!(parse_dated_filename("+024-01-03.txt"), None);
        assert_eq!(parse_dated_filename("notes.txt"), None);
    }

    #[test]
    fn test_scan_partitions_and_sorts() {
        let dir = tempdir().unwrap();
        for name in ["2024-01-03.txt", "notes.txt", "2024-01-01.txt", "alpha.txt"] {
            fs::write(dir.path().join(name), b"token").unwrap();
        }

        let index = EntryIndex::scan(dir.path(), date(2024, 6, 10)).unwrap();

        let dated: Vec<&str> = index.dated.iter().map(|e| e.filename.as_str()).collect();
        assert_eq!(dated, vec!["2024-01-01.txt", "2024-01-03.txt"]);
        assert_eq!(index.named, vec!["alpha.txt", "notes.txt"]);
        assert_eq!(index.day_zero, date(2024, 1, 1));
        assert_eq!(index.offset_of(date(2024, 1, 3)), 2);
    }

    #[test]
    fn test_scan_skips_non_entries() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("readme.md"), b"x").unwrap();
        fs::write(dir.path().join(".2024-01-01.txt.1_2.tmp"), b"x").unwrap();
        fs::create_dir(dir.path().join("2024-01-02.txt")).unwrap();

        let index = EntryIndex::scan(dir.path(), date(2024, 6, 10)).unwrap();

        assert!(index.is_empty());
    }

    #[test]
    fn test_missing_dir_is_empty_with_today_as_day_zero() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("absent");

        let index = EntryIndex::scan(&missing, date(2024, 6, 10)).unwrap();

        assert!(index.is_empty());
        assert_eq!(index.day_zero, date(2024, 6, 10));
    }

    #[test]
    fn test_scan_does_not_mutate() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("absent");

        EntryIndex::scan(&missing, date(2024, 6, 10)).unwrap();

        assert!(!missing.exists());
    }
}
