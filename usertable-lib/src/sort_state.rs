//! Per-column sort cycling.
//!
//! Clicking a column header cycles it through ascending, descending and back
//! to the load order. Only one column is ever active.

use std::collections::HashMap;

use crate::sort::SortMethod;

/// Key that restores identity (load) order.
pub const IDENTITY_KEY: &str = "id";

/// Cycle position that means ascending.
const ASCENDING: u8 = SortMethod::Ascending.code();
/// Last cycle position before the column drops back to unsorted.
const LAST_POSITION: u8 = SortMethod::Descending.code();

/// A re-sort requested by the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortRequest {
    pub key: String,
    /// 1 for ascending, 2 for descending.
    pub method: u8,
}

impl SortRequest {
    fn identity() -> Self {
        Self {
            key: IDENTITY_KEY.to_string(),
            method: ASCENDING,
        }
    }

    pub fn is_identity(&self) -> bool {
        self.key == IDENTITY_KEY
    }
}

/// Sort state: column key to cycle position (1 or 2).
///
/// At most one entry exists at any time.
#[derive(Debug, Clone, Default)]
pub struct SortState {
    positions: HashMap<String, u8>,
}

impl SortState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all column state.
    pub fn reset(&mut self) {
        self.positions.clear();
    }

    /// Handle a click on the header for `key` and return the sort to apply.
    pub fn click(&mut self, key: &str) -> SortRequest {
        match self.positions.get_mut(key) {
            Some(position) => {
                *position += 1;
                if *position > LAST_POSITION {
                    self.positions.remove(key);
                }
            }
            None => {
                self.positions.clear();
                self.positions.insert(key.to_string(), ASCENDING);
            }
        }

        let request = match self.positions.get(key) {
            Some(&method) => SortRequest {
                key: key.to_string(),
                method,
            },
            None => SortRequest::identity(),
        };
        log::debug!("sort click on {}: {:?}", key, request);
        request
    }

    /// Cycle position of `key`, if it is the active column.
    pub fn position(&self, key: &str) -> Option<u8> {
        self.positions.get(key).copied()
    }

    /// The active column and its direction.
    pub fn active(&self) -> Option<(&str, SortMethod)> {
        self.positions
            .iter()
            .next()
            .and_then(|(key, &pos)| SortMethod::try_from(pos).ok().map(|m| (key.as_str(), m)))
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
