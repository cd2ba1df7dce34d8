//! User-facing entry identifiers.
//!
//! An identifier is parsed once, up front, into one of three shapes and then
//! resolved against the current Day Zero and today's date:
//!
//! | input        | shape        | resolves to                          |
//! |--------------|--------------|--------------------------------------|
//! | absent/blank | `Today`      | `<today>.txt`                        |
//! | `n >= 0`     | `Offset(n)`  | `<day zero + n days>.txt`            |
//! | `n < 0`      | `Offset(n)`  | `<today + (n + 1) days>.txt`         |
//! | anything else| `Literal(s)` | `s`, with `.txt` appended if missing |
//!
//! Non-negative offsets count forward from the oldest dated entry, so they
//! match the labels printed by `list`. Negative offsets count back from today:
//! `-1` is today, `-2` yesterday.

use std::fmt;
use std::str::FromStr;

use chrono::{Days, NaiveDate};

use crate::error::{DiaryError, Result};

/// Extension carried by every entry file.
pub const ENTRY_EXTENSION: &str = ".txt";

/// Date format used in dated entry filenames.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identifier {
    /// No identifier given: today's entry
    Today,
    /// Relative day offset
    Offset(i64),
    /// Explicit name or path
    Literal(String),
}

impl Identifier {
    /// Parse an optional raw identifier.
    ///
    /// Never fails: anything that is not blank and not an integer is a
    /// literal name.
    pub fn parse(input: Option<&str>) -> Self {
        let Some(raw) = input else {
            return Identifier::Today;
        };
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Identifier::Today;
        }
        match trimmed.parse::<i64>() {
            Ok(offset) => Identifier::Offset(offset),
            Err(_) => Identifier::Literal(raw.to_string()),
        }
    }

    /// Resolve to a bare filename.
    ///
    /// The result is not checked against the directory.
    ///
    /// # Errors
    ///
    /// Returns `DiaryError::InvalidIdentifier` if an offset lands outside the
    /// representable calendar.
    pub fn resolve(&self, day_zero: NaiveDate, today: NaiveDate) -> Result<String> {
        match self {
            Identifier::Today => Ok(dated_filename(today)),
            Identifier::Offset(offset) => {
                let date = offset_date(*offset, day_zero, today).ok_or_else(|| {
                    DiaryError::InvalidIdentifier(format!("Offset {} is out of range", offset))
                })?;
                Ok(dated_filename(date))
            }
            Identifier::Literal(name) => {
                if name.ends_with(ENTRY_EXTENSION) {
                    Ok(name.clone())
                } else {
                    Ok(format!("{}{}", name, ENTRY_EXTENSION))
                }
            }
        }
    }
}

impl FromStr for Identifier {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Identifier::parse(Some(s)))
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Today => write!(f, "today"),
            Identifier::Offset(offset) => write!(f, "{}", offset),
            Identifier::Literal(name) => write!(f, "{}", name),
        }
    }
}

/// Filename of the dated entry for `date`.
pub fn dated_filename(date: NaiveDate) -> String {
    format!("{}{}", date.format(DATE_FORMAT), ENTRY_EXTENSION)
}

fn offset_date(offset: i64, day_zero: NaiveDate, today: NaiveDate) -> Option<NaiveDate> {
    if offset >= 0 {
        day_zero.checked_add_days(Days::new(offset.unsigned_abs()))
    } else {
        // -1 is today; (offset + 1) cannot overflow for negative offsets
        today.checked_sub_days(Days::new((offset + 1).unsigned_abs()))
    }
}
