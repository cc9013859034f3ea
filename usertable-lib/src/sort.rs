//! Stable record sorting by key and direction.

use std::cmp::Ordering;

use crate::error::Error;
use crate::model::{FieldValue, Record};

/// Sort direction, encoded on the wire of the sort state machine as 1 or 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortMethod {
    Ascending,
    Descending,
}

impl SortMethod {
    pub const fn code(self) -> u8 {
        match self {
            Self::Ascending => 1,
            Self::Descending => 2,
        }
    }
}

impl TryFrom<u8> for SortMethod {
    type Error = Error;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Self::Ascending),
            2 => Ok(Self::Descending),
            other => Err(Error::UnsupportedSortMethod(other)),
        }
    }
}

/// Compare two strings the way a reader expects: case-insensitively first,
/// with the exact spelling only breaking ties.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    let folded = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));
    folded.then_with(|| a.cmp(b))
}

fn number_cmp(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// Sort `records` in place by `key`, with `method` 1 (ascending) or 2 (descending).
///
/// The comparison is chosen from the type of `key` on the first record: text
/// compares with [`locale_cmp`], numbers numerically. Keys that are missing or
/// of any other type leave the order untouched. The sort is stable.
pub fn sort_records(records: &mut [Record], key: &str, method: u8) -> Result<(), Error> {
    let method = SortMethod::try_from(method)?;

    let Some(first) = records.first() else {
        return Ok(());
    };
    match first.field(key) {
        Some(FieldValue::Text(_)) => sort_with(records, method, |a, b| {
            match (a.field(key), b.field(key)) {
                (Some(FieldValue::Text(a)), Some(FieldValue::Text(b))) => locale_cmp(a, b),
                _ => Ordering::Equal,
            }
        }),
        Some(FieldValue::Number(_)) => sort_with(records, method, |a, b| {
            match (a.field(key), b.field(key)) {
                (Some(FieldValue::Number(a)), Some(FieldValue::Number(b))) => number_cmp(a, b),
                _ => Ordering::Equal,
            }
        }),
        Some(other) => {
            log::debug!("not sorting by {}: {} values have no ordering", key, other.type_name());
        }
        None => {
            log::debug!("not sorting by unknown key {}", key);
        }
    }
    Ok(())
}

fn sort_with<F>(records: &mut [Record], method: SortMethod, compare: F)
where
    F: Fn(&Record, &Record) -> Ordering,
{
    match method {
        SortMethod::Ascending => records.sort_by(|a, b| compare(a, b)),
        SortMethod::Descending => records.sort_by(|a, b| compare(b, a)),
    }
}
