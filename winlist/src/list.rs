use alloc::sync::Arc;
use alloc::vec::Vec;
use core::cell::Cell;

use crate::error::{Result, check_extents};
use crate::range::{VisibleRange, WindowMetrics, window_bounds};
use crate::settle::SettleTimer;
use crate::{ListOptions, ViewportState};

/// One materialized entry of a rendered window.
#[derive(Debug, PartialEq, Eq)]
pub struct WindowItem<'a, T, K> {
    pub key: K,
    /// Absolute index into the full collection.
    pub index: usize,
    pub item: &'a T,
    /// Absolute start offset in the scroll axis.
    pub start: u64,
    /// `false` while fast-scrolling for items the sampling policy defers; the host should draw a
    /// placeholder for those.
    pub eager: bool,
}

/// The output of [`WindowedList::render`].
#[derive(Debug, PartialEq, Eq)]
pub struct Window<'a, T, K> {
    pub range: Option<VisibleRange>,
    pub metrics: WindowMetrics,
    pub is_fast_scrolling: bool,
    pub items: Vec<WindowItem<'a, T, K>>,
}

impl<T, K> Window<'_, T, K> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// The result of an imperative scroll.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScrollTarget {
    /// The index the caller asked for.
    pub requested: isize,
    /// The index actually scrolled to, clamped into `[0, len - 1]`.
    pub index: usize,
    /// The new scroll offset (`index * item_extent`).
    pub offset: u64,
}

impl ScrollTarget {
    /// `true` when the request referenced an index outside the collection.
    pub fn was_clamped(&self) -> bool {
        usize::try_from(self.requested).ok() != Some(self.index)
    }
}

/// A windowed renderer over a uniform-extent collection.
///
/// The list owns its [`ViewportState`] and a single settle timer. Your adapter drives it:
/// - `set_len` whenever the collection changes size
/// - `notify_scroll(offset, now_ms)` for user scroll events
/// - `tick(now_ms)` from a frame/timer loop so fast-scrolling can settle
///
/// Rendering (`render`, `for_each_window_item`, `render_with`) borrows the collection and never
/// mutates state. The list itself is the scroll handle: `scroll_to_index`, `scroll_to_top` and
/// `scroll_to_bottom`. Dropping it cancels any pending settle timer.
pub struct WindowedList<T, K = usize> {
    options: ListOptions<T, K>,
    len: usize,
    viewport: ViewportState,
    settle: SettleTimer,

    notify_depth: Cell<usize>,
    notify_pending: Cell<bool>,
}

impl<T, K> WindowedList<T, K> {
    /// Creates a list from options.
    ///
    /// Fails with [`crate::Error::InvalidConfiguration`] when an extent is zero or the sampling
    /// rate is zero.
    pub fn new(options: ListOptions<T, K>) -> Result<Self> {
        options.validate()?;
        let scroll_offset = options.initial_offset.resolve();
        vdebug!(
            item_extent = options.item_extent,
            viewport_extent = options.viewport_extent,
            overscan = options.overscan,
            scroll_offset,
            "WindowedList::new"
        );
        Ok(Self {
            len: 0,
            viewport: ViewportState {
                scroll_offset,
                is_fast_scrolling: false,
            },
            settle: SettleTimer::new(options.fast_scroll_settle_delay_ms),
            options,
            notify_depth: Cell::new(0),
            notify_pending: Cell::new(false),
        })
    }

    /// Same as `new`, with the collection length set up front.
    pub fn with_len(options: ListOptions<T, K>, len: usize) -> Result<Self> {
        let mut list = Self::new(options)?;
        list.len = len;
        Ok(list)
    }

    pub fn options(&self) -> &ListOptions<T, K> {
        &self.options
    }

    /// Replaces the options after validating them. On error the current options stay in place.
    pub fn set_options(&mut self, options: ListOptions<T, K>) -> Result<()> {
        options.validate()?;
        vtrace!(
            item_extent = options.item_extent,
            viewport_extent = options.viewport_extent,
            overscan = options.overscan,
            "WindowedList::set_options"
        );
        self.settle.set_delay_ms(options.fast_scroll_settle_delay_ms);
        self.options = options;
        self.notify();
        Ok(())
    }

    /// Clones the current options, applies `f`, then delegates to `set_options`.
    pub fn update_options(&mut self, f: impl FnOnce(&mut ListOptions<T, K>)) -> Result<()> {
        let mut next = self.options.clone();
        f(&mut next);
        self.set_options(next)
    }

    pub fn set_on_change(
        &mut self,
        on_change: Option<impl Fn(&WindowedList<T, K>, bool) + Send + Sync + 'static>,
    ) {
        self.options.on_change = on_change.map(|f| Arc::new(f) as _);
    }

    fn notify_now(&self) {
        if let Some(cb) = &self.options.on_change {
            cb(self, self.viewport.is_fast_scrolling);
        }
    }

    fn notify(&self) {
        if self.notify_depth.get() > 0 {
            self.notify_pending.set(true);
            return;
        }
        self.notify_now();
    }

    /// Batches multiple updates into a single `on_change` notification.
    pub fn batch_update(&mut self, f: impl FnOnce(&mut Self)) {
        let depth = self.notify_depth.get();
        self.notify_depth.set(depth.saturating_add(1));

        f(self);

        let depth = self.notify_depth.get();
        debug_assert!(depth > 0, "notify_depth underflow");
        let next = depth.saturating_sub(1);
        self.notify_depth.set(next);

        if next == 0 && self.notify_pending.replace(false) {
            self.notify_now();
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Tells the list how many items the collection currently holds.
    ///
    /// The scroll offset is left alone when the collection shrinks; ranges clamp on their own.
    pub fn set_len(&mut self, len: usize) {
        if self.len == len {
            return;
        }
        vtrace!(prev = self.len, len, "set_len");
        self.len = len;
        self.notify();
    }

    pub fn item_extent(&self) -> u32 {
        self.options.item_extent
    }

    pub fn set_item_extent(&mut self, item_extent: u32) -> Result<()> {
        check_extents(item_extent, self.options.viewport_extent)?;
        if self.options.item_extent != item_extent {
            self.options.item_extent = item_extent;
            self.notify();
        }
        Ok(())
    }

    pub fn viewport_extent(&self) -> u32 {
        self.options.viewport_extent
    }

    pub fn set_viewport_extent(&mut self, viewport_extent: u32) -> Result<()> {
        check_extents(self.options.item_extent, viewport_extent)?;
        if self.options.viewport_extent != viewport_extent {
            self.options.viewport_extent = viewport_extent;
            self.notify();
        }
        Ok(())
    }

    pub fn overscan(&self) -> usize {
        self.options.overscan
    }

    pub fn set_overscan(&mut self, overscan: usize) {
        if self.options.overscan == overscan {
            return;
        }
        self.options.overscan = overscan;
        self.notify();
    }

    pub fn viewport_state(&self) -> ViewportState {
        self.viewport
    }

    pub fn scroll_offset(&self) -> u64 {
        self.viewport.scroll_offset
    }

    pub fn is_fast_scrolling(&self) -> bool {
        self.viewport.is_fast_scrolling
    }

    /// `true` while a settle deadline is pending.
    pub fn has_pending_settle(&self) -> bool {
        self.settle.is_pending()
    }

    /// Sets the scroll offset without marking the list as fast-scrolling.
    pub fn set_scroll_offset(&mut self, offset: u64) {
        if self.viewport.scroll_offset == offset {
            return;
        }
        self.viewport.scroll_offset = offset;
        self.notify();
    }

    /// The largest offset at which the viewport is still fully covered by items.
    pub fn max_scroll_offset(&self) -> u64 {
        self.total_extent().saturating_sub(self.options.viewport_extent as u64)
    }

    pub fn set_scroll_offset_clamped(&mut self, offset: u64) {
        let clamped = offset.min(self.max_scroll_offset());
        self.set_scroll_offset(clamped);
    }

    /// Applies a scroll event from the UI layer.
    ///
    /// Marks the list as fast-scrolling and restarts the settle timer, so only the last event of
    /// a burst is followed by a settle.
    pub fn notify_scroll(&mut self, offset: u64, now_ms: u64) {
        vtrace!(offset, now_ms, "notify_scroll");
        self.batch_update(|list| {
            list.set_scroll_offset(offset);
            list.settle.arm(now_ms);
            if !list.viewport.is_fast_scrolling {
                list.viewport.is_fast_scrolling = true;
                list.notify();
            }
        });
    }

    /// Advances the settle timer.
    ///
    /// Returns `true` when the timer fired on this tick: fast-scrolling has ended and `on_change`
    /// was called so the host re-renders at full fidelity.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        if !self.settle.poll(now_ms) {
            return false;
        }
        vtrace!(now_ms, "settle timer fired");
        self.viewport.is_fast_scrolling = false;
        self.notify();
        true
    }

    /// Restores a host-persisted viewport snapshot.
    ///
    /// A snapshot taken mid-scroll is replayed as a scroll event at `now_ms`, so it still
    /// settles.
    pub fn restore_viewport_state(&mut self, state: ViewportState, now_ms: u64) {
        if state.is_fast_scrolling {
            self.notify_scroll(state.scroll_offset, now_ms);
            return;
        }
        self.batch_update(|list| {
            list.set_scroll_offset(state.scroll_offset);
            list.settle_silently();
        });
    }

    fn settle_silently(&mut self) {
        self.settle.cancel();
        if self.viewport.is_fast_scrolling {
            self.viewport.is_fast_scrolling = false;
            self.notify();
        }
    }

    /// Cancels a pending settle and ends fast-scrolling right away.
    ///
    /// Returns `true` if a settle deadline was pending.
    pub fn cancel_pending_settle(&mut self) -> bool {
        let pending = self.settle.is_pending();
        self.settle_silently();
        pending
    }

    /// Cancels the settle timer and detaches every callback.
    ///
    /// Call this when the rendering surface goes away but the list value lives on; `Drop` does
    /// the timer part on its own.
    pub fn teardown(&mut self) {
        if self.settle.cancel() {
            vdebug!("teardown cancelled pending settle timer");
        }
        self.viewport.is_fast_scrolling = false;
        self.options.on_change = None;
        self.options.on_scroll_to_index = None;
    }

    /// Total extent of the collection (`len * item_extent`), regardless of window size.
    pub fn total_extent(&self) -> u64 {
        (self.len as u64).saturating_mul(self.options.item_extent as u64)
    }

    pub fn visible_range(&self) -> Option<VisibleRange> {
        self.visible_range_for(self.viewport.scroll_offset, self.len)
    }

    pub fn visible_range_for(&self, scroll_offset: u64, len: usize) -> Option<VisibleRange> {
        window_bounds(
            scroll_offset,
            self.options.viewport_extent,
            self.options.item_extent,
            self.options.overscan,
            len,
        )
    }

    pub fn metrics(&self) -> WindowMetrics {
        WindowMetrics::new(self.visible_range(), self.options.item_extent, self.len)
    }

    /// Whether `index` gets full-fidelity rendering right now.
    pub fn is_eager(&self, index: usize) -> bool {
        !self.viewport.is_fast_scrolling || self.options.sampling.is_eager(index)
    }

    pub fn item_start(&self, index: usize) -> u64 {
        (index as u64).saturating_mul(self.options.item_extent as u64)
    }

    /// Maps an absolute offset to the item under it.
    pub fn index_at_offset(&self, offset: u64) -> Option<usize> {
        if self.len == 0 {
            return None;
        }
        let index = offset / self.options.item_extent as u64;
        let index = usize::try_from(index).unwrap_or(usize::MAX);
        Some(index.min(self.len - 1))
    }

    /// Visits the current window of `items` without allocating.
    ///
    /// The window is computed from `items.len()`, which is the authoritative length for this
    /// render pass.
    pub fn for_each_window_item<'a>(
        &self,
        items: &'a [T],
        mut f: impl FnMut(WindowItem<'a, T, K>),
    ) {
        if items.len() != self.len {
            vtrace!(
                tracked = self.len,
                rendered = items.len(),
                "render length differs from set_len"
            );
        }
        let Some(range) = self.visible_range_for(self.viewport.scroll_offset, items.len()) else {
            return;
        };
        for index in range.indices() {
            let item = &items[index];
            f(WindowItem {
                key: (self.options.get_item_key)(item, index),
                index,
                item,
                start: self.item_start(index),
                eager: self.is_eager(index),
            });
        }
    }

    /// Renders the current window of `items`.
    pub fn render<'a>(&self, items: &'a [T]) -> Window<'a, T, K> {
        let range = self.visible_range_for(self.viewport.scroll_offset, items.len());
        let mut out = Vec::with_capacity(range.map_or(0, |r| r.count()));
        self.for_each_window_item(items, |it| out.push(it));
        Window {
            range,
            metrics: WindowMetrics::new(range, self.options.item_extent, items.len()),
            is_fast_scrolling: self.viewport.is_fast_scrolling,
            items: out,
        }
    }

    /// Invokes `f(item, absolute_index, eager)` for each item in the window and collects the
    /// results in order.
    pub fn render_with<'a, R>(
        &self,
        items: &'a [T],
        mut f: impl FnMut(&'a T, usize, bool) -> R,
    ) -> Vec<R> {
        let mut out = Vec::new();
        self.for_each_window_item(items, |it| out.push(f(it.item, it.index, it.eager)));
        out
    }

    fn resolve_index(&self, index: isize) -> Option<usize> {
        if self.len == 0 {
            return None;
        }
        let index = usize::try_from(index).unwrap_or(0);
        Some(index.min(self.len - 1))
    }

    /// Scrolls so that `index` sits at the top of the viewport.
    ///
    /// Negative and past-the-end indexes clamp to the first/last item. On an empty collection
    /// this does nothing and returns `None`. The scroll-to-index observer receives the resolved
    /// index. This does not mark the list as fast-scrolling.
    pub fn scroll_to_index(&mut self, index: isize) -> Option<ScrollTarget> {
        let resolved = self.resolve_index(index)?;
        let target = ScrollTarget {
            requested: index,
            index: resolved,
            offset: self.item_start(resolved),
        };
        if target.was_clamped() {
            vdebug!(
                requested = index,
                resolved,
                len = self.len,
                "scroll_to_index clamped a stale index"
            );
        }
        self.set_scroll_offset(target.offset);
        if let Some(observer) = &self.options.on_scroll_to_index {
            observer(resolved);
        }
        Some(target)
    }

    pub fn scroll_to_top(&mut self) -> Option<ScrollTarget> {
        self.scroll_to_index(0)
    }

    pub fn scroll_to_bottom(&mut self) -> Option<ScrollTarget> {
        let last = self.len.checked_sub(1)?;
        self.scroll_to_index(isize::try_from(last).unwrap_or(isize::MAX))
    }
}

impl<T, K> Drop for WindowedList<T, K> {
    fn drop(&mut self) {
        if self.settle.cancel() {
            vtrace!("dropped WindowedList with a pending settle timer");
        }
    }
}

impl<T, K> core::fmt::Debug for WindowedList<T, K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("WindowedList")
            .field("options", &self.options)
            .field("len", &self.len)
            .field("viewport", &self.viewport)
            .field("settle", &self.settle)
            .finish_non_exhaustive()
    }
}
