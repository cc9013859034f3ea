//! The table controller: owns the record collection and applies gestures.

use std::collections::{HashMap, HashSet};

use crate::binding::RowBinding;
use crate::drag::DragController;
use crate::error::Error;
use crate::model::{Column, RawRecord, Record, RecordId, assign_ids};
use crate::query;
use crate::sort::sort_records;
use crate::sort_state::SortState;
use crate::view::{Modifiers, RowHandle, TableView};

/// Name of the users collection, the only one the controller owns.
pub const USERS: &str = "users";

/// Something that happened to the table, for observers.
#[derive(Debug, Clone, PartialEq)]
pub enum TableEvent {
    /// The collection was re-sorted. `key` is `"id"` for load order.
    Sorted { key: String, method: u8 },
    /// Hidden flags were recomputed from `query`.
    Filtered { query: String, visible: usize },
    /// A record was removed.
    Deleted(RecordId),
    /// A drag committed a new visible order.
    Reordered(Vec<RecordId>),
}

/// Owns the authoritative, ordered record collection and keeps the rendered
/// rows in step with it.
///
/// Every mutating operation ends with the view showing the non-hidden records
/// in collection order, and the row binding rebuilt for that render.
#[derive(Debug)]
pub struct TableController<V: TableView> {
    records: Vec<Record>,
    view: V,
    binding: RowBinding,
    sort: SortState,
    drag: DragController,
    events: Vec<TableEvent>,
    initialized: bool,
}

impl<V: TableView> TableController<V> {
    pub fn new(view: V) -> Self {
        Self {
            records: Vec::new(),
            view,
            binding: RowBinding::new(),
            sort: SortState::new(),
            drag: DragController::new(),
            events: Vec::new(),
            initialized: false,
        }
    }

    /// Take ownership of a freshly loaded payload and render it.
    ///
    /// Ids are assigned from payload position. Sort state is reset, and a
    /// previously bound view is unbound before being bound again.
    pub fn initialize(&mut self, raw: Vec<RawRecord>) {
        if self.initialized {
            self.view.unbind();
        }
        self.records = assign_ids(raw);
        self.sort.reset();
        self.drag.abort(self.view.rows_mut());
        self.view.bind();
        self.initialized = true;
        self.reload();
        log::info!("table initialized with {} records", self.records.len());
    }

    /// Re-render the current collection with the current hidden flags.
    pub fn reload(&mut self) {
        if self.drag.is_dragging() {
            self.drag.abort(self.view.rows_mut());
        }
        let visible: Vec<&Record> = self.records.iter().filter(|r| !r.hidden).collect();
        let handles = self.view.update(&visible);
        self.binding.rebuild(&visible, &handles);

        let indicator = self
            .sort
            .active()
            .and_then(|(key, method)| Column::from_key(key).map(|c| (c, method)));
        self.view.set_sort_indicator(indicator);
        log::debug!("rendered {} of {} records", visible.len(), self.records.len());
    }

    /// Hide every record whose name does not match `query`, then reload.
    ///
    /// Returns the number of visible records.
    pub fn filter(&mut self, query: &str) -> Result<usize, Error> {
        let predicate = query::compile(query)?;
        let mut visible = 0;
        for record in &mut self.records {
            record.hidden = !predicate.matches(record);
            if !record.hidden {
                visible += 1;
            }
        }
        self.reload();
        self.events.push(TableEvent::Filtered {
            query: query.to_string(),
            visible,
        });
        Ok(visible)
    }

    /// Remove the record with `id` and reload.
    pub fn delete_record(&mut self, id: RecordId) -> Option<Record> {
        let index = self.records.iter().position(|r| r.id() == id)?;
        let removed = self.records.remove(index);
        log::info!("deleted record {} ({})", id, removed.name);
        self.reload();
        self.events.push(TableEvent::Deleted(id));
        Some(removed)
    }

    /// Replace the order of the visible records in `collection` with `ids`.
    ///
    /// `ids` must be a permutation of the visible record ids. Hidden records
    /// keep their positions in the collection.
    pub fn reorder(&mut self, collection: &str, ids: &[RecordId]) -> Result<(), Error> {
        if collection != USERS {
            return Err(Error::UnknownCollection(collection.to_string()));
        }

        let expected: Vec<RecordId> = self.visible_ids();
        let unique: HashSet<RecordId> = ids.iter().copied().collect();
        if ids.len() != expected.len()
            || unique.len() != ids.len()
            || !expected.iter().all(|id| unique.contains(id))
        {
            return Err(Error::OrderMismatch {
                expected,
                actual: ids.to_vec(),
            });
        }

        let mut moving: HashMap<RecordId, Record> = HashMap::with_capacity(ids.len());
        let mut slots: Vec<Option<Record>> = Vec::with_capacity(self.records.len());
        for record in self.records.drain(..) {
            if record.hidden {
                slots.push(Some(record));
            } else {
                moving.insert(record.id(), record);
                slots.push(None);
            }
        }
        let mut incoming = ids.iter();
        self.records = slots
            .into_iter()
            .filter_map(|slot| slot.or_else(|| incoming.next().and_then(|id| moving.remove(id))))
            .collect();

        if self.view.rows().ids() == ids {
            log::debug!("reorder already on screen, keeping current rows");
        } else {
            self.reload();
        }
        self.events.push(TableEvent::Reordered(ids.to_vec()));
        Ok(())
    }

    /// Header click: advance the sort cycle of `column` and re-sort.
    pub fn on_header_click(&mut self, column: Column) -> Result<(), Error> {
        self.sort_by(column.key())
    }

    /// Advance the sort cycle of `key` and re-sort.
    pub fn sort_by(&mut self, key: &str) -> Result<(), Error> {
        let request = self.sort.click(key);
        sort_records(&mut self.records, &request.key, request.method)?;
        self.reload();
        self.events.push(TableEvent::Sorted {
            key: request.key,
            method: request.method,
        });
        Ok(())
    }

    /// Pointer entered or left the header of `column`.
    pub fn on_header_hover(&mut self, column: Column) {
        self.view.rows_mut().toggle_highlight(column);
    }

    /// Row click: with the alternate modifier, delete the row's record.
    pub fn on_row_click(&mut self, row: RowHandle, modifiers: Modifiers) -> Option<Record> {
        if !modifiers.is_alternate() {
            return None;
        }
        let Some(id) = self.binding.record_for(row) else {
            log::warn!("click on a row from an earlier render");
            return None;
        };
        self.delete_record(id)
    }

    /// Pointer-down on the drag handle of `row`.
    pub fn on_drag_start(&mut self, row: RowHandle) -> bool {
        self.drag.start(self.view.rows_mut(), &self.binding, row)
    }

    /// Pointer moved over `row` during a drag.
    pub fn on_drag_move(&mut self, row: RowHandle) -> bool {
        self.drag.hover(self.view.rows_mut(), row)
    }

    /// Pointer released: commit the on-screen order if a drag was active.
    ///
    /// Returns true if an order was committed.
    pub fn on_drag_end(&mut self) -> Result<bool, Error> {
        match self.drag.finish(self.view.rows_mut(), &self.binding) {
            Some(order) => {
                self.reorder(USERS, &order)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// The authoritative collection, in order, hidden records included.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn record(&self, id: RecordId) -> Option<&Record> {
        self.records.iter().find(|r| r.id() == id)
    }

    /// Ids of non-hidden records in collection order.
    pub fn visible_ids(&self) -> Vec<RecordId> {
        self.records
            .iter()
            .filter(|r| !r.hidden)
            .map(Record::id)
            .collect()
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn binding(&self) -> &RowBinding {
        &self.binding
    }

    pub fn sort_state(&self) -> &SortState {
        &self.sort
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    /// Take the events recorded since the last call.
    pub fn drain_events(&mut self) -> Vec<TableEvent> {
        std::mem::take(&mut self.events)
    }
}
