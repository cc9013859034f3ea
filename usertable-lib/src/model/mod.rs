//! Record and column types.

mod column;
mod record;

pub use column::*;
pub use record::*;
