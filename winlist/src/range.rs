use core::ops::RangeInclusive;

use crate::error::{Result, check_extents};

/// A contiguous window of item indexes, including overscan.
///
/// Both ends are inclusive and always satisfy `start_index <= end_index < length` for the
/// collection length the range was computed for. An empty collection has no range at all, which
/// is why the calculators return `Option<VisibleRange>`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisibleRange {
    pub start_index: usize,
    pub end_index: usize, // inclusive
}

impl VisibleRange {
    /// Number of indexes covered by the range (never zero).
    ///
    /// A hand-built inverted range counts as a single index.
    pub fn count(&self) -> usize {
        self.end_index.saturating_sub(self.start_index) + 1
    }

    pub fn contains(&self, index: usize) -> bool {
        self.start_index <= index && index <= self.end_index
    }

    pub fn indices(&self) -> RangeInclusive<usize> {
        self.start_index..=self.end_index
    }
}

/// Positioning metadata for a rendered window.
///
/// `total_extent` sizes the host's scroll container and is reported even when nothing is
/// materialized; `offset` is where the first rendered item sits inside it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindowMetrics {
    pub total_extent: u64,
    /// `None` when the window is empty.
    pub offset: Option<u64>,
}

impl WindowMetrics {
    pub fn new(range: Option<VisibleRange>, item_extent: u32, length: usize) -> Self {
        let item_extent = item_extent as u64;
        Self {
            total_extent: (length as u64).saturating_mul(item_extent),
            offset: range.map(|r| (r.start_index as u64).saturating_mul(item_extent)),
        }
    }
}

/// Maps a scroll position onto the window of items to render.
///
/// ```text
/// start = max(0, floor(scroll_offset / item_extent) - overscan)
/// end   = min(length - 1, floor((scroll_offset + viewport_extent) / item_extent) + overscan)
/// ```
///
/// Offsets scrolled past the end of the collection pin `start` to `end`, so the returned range
/// is valid for every input. Returns `Ok(None)` for an empty collection, and
/// [`crate::Error::InvalidConfiguration`] when either extent is zero.
pub fn compute_visible_range(
    scroll_offset: u64,
    viewport_extent: u32,
    item_extent: u32,
    overscan: usize,
    length: usize,
) -> Result<Option<VisibleRange>> {
    check_extents(item_extent, viewport_extent)?;
    Ok(window_bounds(
        scroll_offset,
        viewport_extent,
        item_extent,
        overscan,
        length,
    ))
}

/// Same as [`compute_visible_range`] for extents that were already validated.
pub(crate) fn window_bounds(
    scroll_offset: u64,
    viewport_extent: u32,
    item_extent: u32,
    overscan: usize,
    length: usize,
) -> Option<VisibleRange> {
    debug_assert!(item_extent > 0, "window_bounds: zero item extent");
    if length == 0 || item_extent == 0 {
        return None;
    }

    let item_extent = item_extent as u64;
    let first_visible = saturating_index(scroll_offset / item_extent);
    let last_visible =
        saturating_index(scroll_offset.saturating_add(viewport_extent as u64) / item_extent);

    let end_index = last_visible.saturating_add(overscan).min(length - 1);
    let start_index = first_visible.saturating_sub(overscan).min(end_index);

    Some(VisibleRange {
        start_index,
        end_index,
    })
}

fn saturating_index(value: u64) -> usize {
    usize::try_from(value).unwrap_or(usize::MAX)
}
