//! Domain model (pure data).
//!
//! Query snapshots, decoded catalog items, and the error taxonomy.

pub mod error;
pub mod item;
pub mod query;

pub use error::{AppError, ControllerError, FetchError, FetchErrorKind};
pub use item::{page_count, split_tags, Item, PageResult};
pub use query::{
    Columns, Filter, PerPage, QueryPatch, QueryState, ViewMode, FILTER_ALL, MIN_COLUMNS,
    PER_PAGE_CHOICES,
};
