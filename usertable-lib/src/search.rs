//! Search box model.

/// Outcome of a search box edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchChange {
    /// The query text changed; the table should be filtered by it.
    Changed(String),
    Unchanged,
}

/// The text of the search box.
#[derive(Debug, Clone, Default)]
pub struct SearchField {
    query: String,
}

impl SearchField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn is_empty(&self) -> bool {
        self.query.is_empty()
    }

    /// Append a typed character.
    pub fn push(&mut self, c: char) -> SearchChange {
        if c.is_control() {
            return SearchChange::Unchanged;
        }
        self.query.push(c);
        self.changed()
    }

    /// Remove the last character.
    pub fn pop(&mut self) -> SearchChange {
        match self.query.pop() {
            Some(_) => self.changed(),
            None => SearchChange::Unchanged,
        }
    }

    /// Replace the whole query.
    pub fn set(&mut self, query: impl Into<String>) -> SearchChange {
        let query = query.into();
        if query == self.query {
            return SearchChange::Unchanged;
        }
        self.query = query;
        self.changed()
    }

    /// The clear button: empty the query and re-run the filter.
    ///
    /// Always reports a change so the table is shown unfiltered even if the
    /// box was already empty.
    pub fn clear(&mut self) -> SearchChange {
        self.query.clear();
        self.changed()
    }

    fn changed(&self) -> SearchChange {
        SearchChange::Changed(self.query.clone())
    }
}
