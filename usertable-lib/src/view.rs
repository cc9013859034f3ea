//! Minimal view abstraction the table core renders into.
//!
//! A front end owns a [`RowSet`] (the rendered rows, top to bottom) and draws
//! it however it likes. The core only rebuilds the row set on a full render,
//! and moves rows within it while a drag is in progress.

use crate::model::{Column, Record, RecordId};
use crate::sort::SortMethod;

/// Opaque reference to a rendered row.
///
/// Handles carry the render generation they were issued in, so a handle from
/// an earlier render never resolves against a later one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RowHandle {
    generation: u64,
    slot: usize,
}

impl RowHandle {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Where to put a moved row relative to its anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Before,
    After,
}

/// Modifier keys held during a gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Default::default()
        }
    }

    /// The "alternate click" qualifier: ctrl or cmd/meta.
    pub fn is_alternate(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// One rendered row.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedRow {
    pub handle: RowHandle,
    /// Id of the record this row was rendered from.
    pub id: RecordId,
    /// Cell text, one per [`Column::ALL`] entry.
    pub cells: Vec<String>,
    /// Set while the row is being dragged.
    pub draggable: bool,
}

/// The rendered rows of one render pass, in on-screen order.
#[derive(Debug, Clone, Default)]
pub struct RowSet {
    generation: u64,
    rows: Vec<RenderedRow>,
    /// Page-level "grabbing" cursor state.
    grabbing: bool,
    /// Column currently highlighted from a header hover.
    highlighted: Option<Column>,
}

impl RowSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard the current rows and render `records` in order.
    ///
    /// Returns the new handles in the same order as `records`.
    pub fn rebuild<'a>(
        &mut self,
        records: impl IntoIterator<Item = &'a Record>,
        format_date: impl Fn(&str) -> String,
    ) -> Vec<RowHandle> {
        self.generation += 1;
        self.grabbing = false;
        let generation = self.generation;
        self.rows = records
            .into_iter()
            .enumerate()
            .map(|(slot, record)| RenderedRow {
                handle: RowHandle { generation, slot },
                id: record.id(),
                cells: Column::ALL
                    .iter()
                    .map(|c| c.cell(record, &format_date))
                    .collect(),
                draggable: false,
            })
            .collect();
        self.handles()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[RenderedRow] {
        &self.rows
    }

    /// Handles in on-screen order.
    pub fn handles(&self) -> Vec<RowHandle> {
        self.rows.iter().map(|r| r.handle).collect()
    }

    /// Record ids in on-screen order.
    pub fn ids(&self) -> Vec<RecordId> {
        self.rows.iter().map(|r| r.id).collect()
    }

    pub fn get(&self, handle: RowHandle) -> Option<&RenderedRow> {
        self.position(handle).map(|i| &self.rows[i])
    }

    /// Current on-screen position of `handle`.
    pub fn position(&self, handle: RowHandle) -> Option<usize> {
        if handle.generation != self.generation {
            return None;
        }
        self.rows.iter().position(|r| r.handle == handle)
    }

    pub fn handle_at(&self, position: usize) -> Option<RowHandle> {
        self.rows.get(position).map(|r| r.handle)
    }

    /// Move `row` to sit immediately before or after `anchor`.
    ///
    /// Returns false if either handle is stale or they are the same row.
    pub fn move_row(&mut self, row: RowHandle, anchor: RowHandle, placement: Placement) -> bool {
        if row == anchor {
            return false;
        }
        let (Some(from), Some(_)) = (self.position(row), self.position(anchor)) else {
            return false;
        };
        let moved = self.rows.remove(from);
        let Some(target) = self.position(anchor) else {
            self.rows.insert(from, moved);
            return false;
        };
        let at = match placement {
            Placement::Before => target,
            Placement::After => target + 1,
        };
        self.rows.insert(at, moved);
        true
    }

    pub fn set_draggable(&mut self, handle: RowHandle, draggable: bool) {
        if let Some(i) = self.position(handle) {
            self.rows[i].draggable = draggable;
        }
    }

    pub fn grabbing(&self) -> bool {
        self.grabbing
    }

    pub fn set_grabbing(&mut self, grabbing: bool) {
        self.grabbing = grabbing;
    }

    pub fn highlighted(&self) -> Option<Column> {
        self.highlighted
    }

    /// Toggle the hover highlight of `column`.
    pub fn toggle_highlight(&mut self, column: Column) {
        self.highlighted = if self.highlighted == Some(column) {
            None
        } else {
            Some(column)
        };
    }
}

/// Produce markup, and attach or release interaction handlers.
///
/// `T` is whatever the front end draws into.
pub trait Renderable<T: ?Sized> {
    /// Draw the component into `target`.
    fn render(&self, target: &mut T);

    /// Start routing gestures to this component.
    fn bind(&mut self) {}

    /// Stop routing gestures to this component.
    fn unbind(&mut self) {}
}

/// What the table controller needs from the rendered table.
pub trait TableView {
    fn rows(&self) -> &RowSet;

    fn rows_mut(&mut self) -> &mut RowSet;

    /// Render `records` (already filtered and ordered) as the new rows.
    fn update(&mut self, records: &[&Record]) -> Vec<RowHandle> {
        self.rows_mut()
            .rebuild(records.iter().copied(), crate::format::format_date)
    }

    /// Show which column the table is sorted by.
    fn set_sort_indicator(&mut self, _sort: Option<(Column, SortMethod)>) {}

    fn bind(&mut self) {}

    fn unbind(&mut self) {}
}
