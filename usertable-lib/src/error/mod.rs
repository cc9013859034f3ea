//! Error types

mod load;

pub use load::*;

use crate::model::RecordId;

/// Errors raised by the table core.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The inbound record load failed. Fatal for the session.
    #[error("Load failure: {0}")]
    Load(#[from] LoadError),

    /// The sorter was asked for a direction other than 1 (ascending) or 2 (descending).
    #[error("Unsupported sort method: {0}")]
    UnsupportedSortMethod(u8),

    /// A reorder commit named a collection the controller does not own.
    #[error("Unknown collection: {0}")]
    UnknownCollection(String),

    /// A reorder commit is not a permutation of the visible records.
    #[error("Reorder does not match visible rows (expected {expected:?}, got {actual:?})")]
    OrderMismatch {
        /// Visible record ids in collection order.
        expected: Vec<RecordId>,
        /// Ids supplied by the commit.
        actual: Vec<RecordId>,
    },

    /// The compiled filter pattern was rejected by the regex engine.
    #[error("Invalid filter query: {0}")]
    Query(#[from] regex::Error),
}

impl Error {
    /// Returns true for errors that mean the data could not be loaded at all.
    pub fn is_load_failure(&self) -> bool {
        matches!(self, Self::Load(_))
    }
}
