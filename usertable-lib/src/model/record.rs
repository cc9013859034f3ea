//! User records as loaded and as held by the table.

use std::fmt;

use serde::Deserialize;

/// Load-time identifier of a record.
///
/// Assigned once from the record's position in the loaded payload and never
/// reassigned, so ascending id order is the "identity" order of the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordId(pub usize);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A user record exactly as it arrives from the data source.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawRecord {
    pub name: String,
    pub rating: f64,
    pub stories: f64,
    pub comments: f64,
    /// Registration timestamp, ISO-ish.
    pub date: String,
    #[serde(default)]
    pub avatar: String,
}

/// A user record owned by the table.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    id: RecordId,
    pub name: String,
    pub rating: f64,
    pub stories: f64,
    pub comments: f64,
    pub date: String,
    pub avatar: String,
    /// Set by the filter; hidden records are not rendered.
    pub hidden: bool,
}

impl Record {
    /// Wrap a raw record, giving it its load-time id.
    pub fn from_raw(id: RecordId, raw: RawRecord) -> Self {
        Self {
            id,
            name: raw.name,
            rating: raw.rating,
            stories: raw.stories,
            comments: raw.comments,
            date: raw.date,
            avatar: raw.avatar,
            hidden: false,
        }
    }

    pub fn id(&self) -> RecordId {
        self.id
    }

    /// Look up a field by its key, as used by the sorter.
    ///
    /// Returns `None` for keys the record does not have.
    pub fn field(&self, key: &str) -> Option<FieldValue<'_>> {
        let value = match key {
            "id" => FieldValue::Number(self.id.0 as f64),
            "name" => FieldValue::Text(&self.name),
            "rating" => FieldValue::Number(self.rating),
            "stories" => FieldValue::Number(self.stories),
            "comments" => FieldValue::Number(self.comments),
            "date" => FieldValue::Text(&self.date),
            "avatar" => FieldValue::Text(&self.avatar),
            "hidden" => FieldValue::Flag(self.hidden),
            _ => return None,
        };
        Some(value)
    }
}

/// Runtime-typed view of a single record field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Number(f64),
    Flag(bool),
}

impl FieldValue<'_> {
    /// Name of the value's type, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Text(_) => "string",
            Self::Number(_) => "number",
            Self::Flag(_) => "boolean",
        }
    }
}

/// Turn a loaded payload into records with sequential, 0-based ids.
pub fn assign_ids(raw: Vec<RawRecord>) -> Vec<Record> {
    raw.into_iter()
        .enumerate()
        .map(|(i, r)| Record::from_raw(RecordId(i), r))
        .collect()
}
