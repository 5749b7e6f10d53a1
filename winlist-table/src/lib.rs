//! Table layer for the `winlist` crate.
//!
//! `winlist` renders a window of a uniform-extent collection. This crate layers row/column
//! semantics on top without re-deriving any range logic:
//!
//! - A column model with per-column cell functions, widths, alignment and sortability
//! - Header-click sort toggling (`Asc` ⇄ `Desc`; a new key starts at `Asc`)
//! - A caller-owned [`SelectionSet`] with a derived tri-state [`SelectAllState`]
//! - Loading and empty states that never touch the list
//!
//! Sort and selection values are owned by the caller. The table reads them on every render and
//! returns proposed new values from gestures; it never mutates them in place.
//!
//! ```
//! use winlist::ListOptions;
//! use winlist_table::{Column, SelectionSet, SortState, Table, TableView};
//!
//! struct Person {
//!     name: &'static str,
//!     age: u32,
//! }
//!
//! let rows = vec![
//!     Person { name: "ada", age: 36 },
//!     Person { name: "grace", age: 45 },
//!     Person { name: "linus", age: 28 },
//! ];
//! let columns = vec![
//!     Column::new("name", "Name", |p: &Person, _| p.name.to_string()),
//!     Column::new("age", "Age", |p: &Person, _| p.age.to_string()).with_sort_key(|p| p.age),
//! ];
//! let mut table = Table::new(ListOptions::new(20, 200), columns)
//!     .unwrap()
//!     .with_selection(true);
//! table.set_len(rows.len());
//! table.set_loading(false);
//!
//! let sort = table.click_header("age", &SortState::unsorted());
//! let selection = table.toggle_select_all(&SelectionSet::new(), rows.len());
//! assert_eq!(selection.len(), 3);
//!
//! match table.render(&rows, &sort, &selection) {
//!     TableView::Populated { body, .. } => assert_eq!(body.rows.len(), 3),
//!     _ => panic!("expected a populated table"),
//! }
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod column;
mod selection;
mod sort;
mod table;

#[cfg(test)]
mod tests;

pub use column::{CellAlign, CellFn, Column, CompareFn};
pub use selection::{SelectAllState, SelectionSet};
pub use sort::{SortDirection, SortState, click_header};
pub use table::{
    ColumnHeader, HeaderCell, RowClassFn, RowContent, Table, TableBody, TablePhase, TableRow,
    TableView,
};
