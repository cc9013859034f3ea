#![allow(dead_code)]

use usertable_lib::model::{Column, RawRecord};
use usertable_lib::sort::SortMethod;
use usertable_lib::view::{Renderable, RowSet, TableView};

/// In-memory table view that records what the controller asked of it.
#[derive(Debug, Default)]
pub struct MemoryView {
    pub rows: RowSet,
    pub sort: Option<(Column, SortMethod)>,
    pub bound: bool,
    pub bind_calls: usize,
    pub unbind_calls: usize,
    pub renders: usize,
}

impl TableView for MemoryView {
    fn rows(&self) -> &RowSet {
        &self.rows
    }

    fn rows_mut(&mut self) -> &mut RowSet {
        &mut self.rows
    }

    fn update(&mut self, records: &[&usertable_lib::Record]) -> Vec<usertable_lib::RowHandle> {
        self.renders += 1;
        self.rows.rebuild(records.iter().copied(), |d| d.to_string())
    }

    fn set_sort_indicator(&mut self, sort: Option<(Column, SortMethod)>) {
        self.sort = sort;
    }

    fn bind(&mut self) {
        self.bound = true;
        self.bind_calls += 1;
    }

    fn unbind(&mut self) {
        self.bound = false;
        self.unbind_calls += 1;
    }
}

impl Renderable<String> for MemoryView {
    fn render(&self, target: &mut String) {
        for row in self.rows.rows() {
            target.push_str(&row.cells.join(" | "));
            target.push('\n');
        }
    }
}

pub fn user(name: &str, rating: f64) -> RawRecord {
    RawRecord {
        name: name.to_string(),
        rating,
        stories: rating * 2.0,
        comments: 10.0 - rating,
        date: format!("2014-04-{:02}T12:30:00Z", (rating as u32 % 28) + 1),
        avatar: format!("https://example.com/{}.png", name.to_lowercase()),
    }
}

/// Four users whose ratings are not in load order.
pub fn users() -> Vec<RawRecord> {
    vec![
        user("Anna", 3.0),
        user("Joe", 1.0),
        user("Bob", 4.0),
        user("Joanna", 2.0),
    ]
}

pub fn names(rows: &RowSet) -> Vec<String> {
    rows.rows().iter().map(|r| r.cells[0].clone()).collect()
}
