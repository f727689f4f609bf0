//! In-memory owners of the category and task collections.
//!
//! Each store is the single source of truth for its collection and mirrors
//! it to the key-value store after every mutation.

pub mod categories;
pub mod tasks;

pub use categories::CategoryStore;
pub use tasks::{TaskStore, DEFAULT_FILTER_DEBOUNCE};
