//! Query, ordering, and pagination over the catalog snapshot.
//!
//! Everything in this module is a pure derivation from (catalog, query
//! state) to an ordered, windowed row list; nothing depends on rendering.

mod debounce;
mod page;
mod query;
mod sort;
mod state;

pub use debounce::{SEARCH_DEBOUNCE, SearchDebounce};
pub use page::{PAGE_SIZE, PageWindow};
pub use sort::{SortDirection, SortKey};
pub use state::{Browser, Columns};
