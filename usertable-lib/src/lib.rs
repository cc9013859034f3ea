//! Interactive users table core.
//!
//! Holds the loaded user records and everything the table does with them:
//! filtering by a search query, three-state column sorting, deleting rows and
//! reordering rows by dragging. Rendering goes through the small [`view`]
//! abstraction so any front end can mount the table.

pub mod app;
pub mod binding;
pub mod controller;
pub mod drag;
pub mod error;
pub mod format;
pub mod model;
pub mod query;
pub mod search;
pub mod sort;
pub mod sort_state;
pub mod source;
pub mod view;

pub use app::Application;
pub use controller::{TableController, TableEvent, USERS};
pub use error::{Error, LoadError};
pub use model::{Column, RawRecord, Record, RecordId};
pub use view::{Modifiers, Renderable, RowHandle, RowSet, TableView};
