//! A headless windowed renderer for large, uniform-extent collections.
//!
//! Only the items intersecting the viewport (plus an overscan buffer on each side) are
//! materialized, while the full scrollable extent is still reported so scrollbars stay correct.
//!
//! The crate is UI-agnostic. A TUI/GUI layer is expected to provide:
//! - the item collection (as a slice) and its length
//! - scroll events with a host clock timestamp (`now_ms`)
//! - a periodic `tick(now_ms)` so fast-scrolling can settle
//!
//! ```
//! use winlist::{ListOptions, WindowedList};
//!
//! let rows: Vec<u32> = (0..10_000).collect();
//! let mut list = WindowedList::with_len(ListOptions::new(50, 500), rows.len()).unwrap();
//! list.set_scroll_offset(1_000);
//!
//! let window = list.render(&rows);
//! assert_eq!(window.items.first().map(|it| it.index), Some(15));
//! assert_eq!(window.items.last().map(|it| it.index), Some(35));
//! assert_eq!(window.metrics.total_extent, 500_000);
//! ```
//!
//! For the table layer (columns, sorting, selection), see the `winlist-table` crate.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod error;
mod list;
mod options;
mod range;
mod settle;
mod state;


pub use error::{ConfigIssue, Error, Result};
pub use list::{ScrollTarget, Window, WindowItem, WindowedList};
pub use options::{
    DEFAULT_OVERSCAN, DEFAULT_SAMPLE_RATE, DEFAULT_SETTLE_DELAY_MS, GetItemKey, InitialOffset,
    ListConfig, ListOptions, OnChangeCallback, OnScrollToIndexCallback, SamplingPolicy,
};
pub use range::{VisibleRange, WindowMetrics, compute_visible_range};
pub use settle::SettleTimer;
pub use state::ViewportState;
