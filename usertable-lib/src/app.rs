//! Application context: the loaded data, the search box and the table.

use crate::controller::TableController;
use crate::error::Error;
use crate::model::{RawRecord, RecordId};
use crate::search::{SearchChange, SearchField};
use crate::source::RecordSource;
use crate::view::TableView;

/// Created once after a successful load and passed to whatever drives the UI.
#[derive(Debug)]
pub struct Application<V: TableView> {
    search: SearchField,
    table: TableController<V>,
}

impl<V: TableView> Application<V> {
    /// Load the records from `source` and set up the search box and table.
    ///
    /// A load failure is logged and returned; nothing is initialized in that
    /// case.
    pub async fn init(source: &dyn RecordSource, view: V) -> Result<Self, Error> {
        log::info!("loading users from {}", source.describe());
        let raw = match source.load().await {
            Ok(raw) => raw,
            Err(e) => {
                log::error!("failed to load users from {}: {}", source.describe(), e);
                return Err(e.into());
            }
        };
        Ok(Self::with_records(raw, view))
    }

    /// Set up the search box and table from an already loaded payload.
    pub fn with_records(raw: Vec<RawRecord>, view: V) -> Self {
        let mut table = TableController::new(view);
        table.initialize(raw);
        Self {
            search: SearchField::new(),
            table,
        }
    }

    pub fn search(&self) -> &SearchField {
        &self.search
    }

    pub fn table(&self) -> &TableController<V> {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut TableController<V> {
        &mut self.table
    }

    /// Apply an edit to the search box and filter the table if the query changed.
    pub fn edit_search(
        &mut self,
        edit: impl FnOnce(&mut SearchField) -> SearchChange,
    ) -> Result<(), Error> {
        if let SearchChange::Changed(query) = edit(&mut self.search) {
            self.filter_users(&query)?;
        }
        Ok(())
    }

    /// Filter the users table by `query`.
    pub fn filter_users(&mut self, query: &str) -> Result<usize, Error> {
        self.table.filter(query)
    }

    /// Take a new visible order for the named collection.
    pub fn reload_elements(&mut self, collection: &str, ids: &[RecordId]) -> Result<(), Error> {
        self.table.reorder(collection, ids)
    }
}
