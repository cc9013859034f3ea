//! Association between records and their rendered rows.

use std::collections::HashMap;

use crate::model::{Record, RecordId};
use crate::view::RowHandle;

/// Record id to row handle mapping for the current render pass.
///
/// Rebuilt from scratch after every full render and never carried across
/// renders: a handle from an earlier pass does not resolve.
#[derive(Debug, Default)]
pub struct RowBinding {
    generation: Option<u64>,
    rows_by_record: HashMap<RecordId, RowHandle>,
    records_by_row: HashMap<RowHandle, RecordId>,
}

impl RowBinding {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `handles[i]` to `records[i]`.
    ///
    /// Both sides must be the same filtered, ordered projection. If the
    /// lengths differ only the common prefix is bound.
    pub fn rebuild(&mut self, records: &[&Record], handles: &[RowHandle]) {
        self.invalidate();
        if records.len() != handles.len() {
            log::warn!(
                "binding {} records to {} rendered rows",
                records.len(),
                handles.len()
            );
        }
        for (record, handle) in records.iter().zip(handles) {
            self.rows_by_record.insert(record.id(), *handle);
            self.records_by_row.insert(*handle, record.id());
        }
        self.generation = handles.first().map(RowHandle::generation);
    }

    /// Drop every association.
    pub fn invalidate(&mut self) {
        self.generation = None;
        self.rows_by_record.clear();
        self.records_by_row.clear();
    }

    /// Record rendered by `row`, if the handle belongs to the current pass.
    pub fn record_for(&self, row: RowHandle) -> Option<RecordId> {
        self.records_by_row.get(&row).copied()
    }

    /// Row rendering record `id`, if it is visible.
    pub fn row_for(&self, id: RecordId) -> Option<RowHandle> {
        self.rows_by_record.get(&id).copied()
    }

    pub fn generation(&self) -> Option<u64> {
        self.generation
    }

    pub fn len(&self) -> usize {
        self.records_by_row.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records_by_row.is_empty()
    }
}
