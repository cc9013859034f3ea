//! The table's column catalogue.

use super::Record;

/// Declared value type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    Number,
}

/// The columns of the users table, left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    User,
    Rating,
    Stories,
    Comments,
    Registered,
}

impl Column {
    /// All columns in display order.
    pub const ALL: [Column; 5] = [
        Column::User,
        Column::Rating,
        Column::Stories,
        Column::Comments,
        Column::Registered,
    ];

    /// Record key this column displays and sorts by.
    pub fn key(self) -> &'static str {
        match self {
            Self::User => "name",
            Self::Rating => "rating",
            Self::Stories => "stories",
            Self::Comments => "comments",
            Self::Registered => "date",
        }
    }

    pub fn header(self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Rating => "Rating",
            Self::Stories => "Stories",
            Self::Comments => "Comments",
            Self::Registered => "Registered",
        }
    }

    pub fn kind(self) -> ColumnKind {
        match self {
            Self::User | Self::Registered => ColumnKind::Text,
            _ => ColumnKind::Number,
        }
    }

    /// Position of the column from the left.
    pub fn index(self) -> usize {
        Self::ALL.iter().position(|c| *c == self).unwrap_or(0)
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.key() == key)
    }

    /// Display text of this column's cell for `record`.
    ///
    /// `format_date` renders the registration timestamp.
    pub fn cell(self, record: &Record, format_date: impl Fn(&str) -> String) -> String {
        match self {
            Self::User => record.name.clone(),
            Self::Rating => format_number(record.rating),
            Self::Stories => format_number(record.stories),
            Self::Comments => format_number(record.comments),
            Self::Registered => format_date(&record.date),
        }
    }
}

/// Integers print without a fractional part.
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}
