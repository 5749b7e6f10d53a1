use alloc::sync::Arc;

use crate::error::{ConfigIssue, Result, check_extents};
use crate::list::WindowedList;

pub const DEFAULT_OVERSCAN: usize = 5;
pub const DEFAULT_SAMPLE_RATE: usize = 10;
pub const DEFAULT_SETTLE_DELAY_MS: u64 = 150;

/// A callback fired when the list state changes.
///
/// The second argument is `is_fast_scrolling`. When the settle timer fires this is called with
/// `false`, which is the host's cue to re-render at full fidelity.
pub type OnChangeCallback<T, K> = Arc<dyn Fn(&WindowedList<T, K>, bool) + Send + Sync>;

/// Observer for imperative scrolls. Receives the resolved (clamped) index.
pub type OnScrollToIndexCallback = Arc<dyn Fn(usize) + Send + Sync>;

/// Extracts the render key for an item. Keys must be unique within one render.
pub type GetItemKey<T, K> = Arc<dyn Fn(&T, usize) -> K + Send + Sync>;

/// Decides which items stay eagerly rendered while the list is fast-scrolling.
///
/// Items the policy rejects are still part of the window; the host draws a lightweight
/// placeholder for them until scrolling settles.
#[derive(Clone)]
pub enum SamplingPolicy {
    /// Render every `n`th index (`index % n == 0`). `n` must be at least 1.
    EveryNth(usize),
    /// Custom predicate over the absolute index.
    Custom(Arc<dyn Fn(usize) -> bool + Send + Sync>),
}

impl SamplingPolicy {
    pub fn is_eager(&self, index: usize) -> bool {
        match self {
            Self::EveryNth(n) => index.checked_rem(*n) == Some(0),
            Self::Custom(f) => f(index),
        }
    }

    fn validate(&self) -> Result<()> {
        match self {
            Self::EveryNth(0) => Err(ConfigIssue::ZeroSampleRate.into()),
            _ => Ok(()),
        }
    }
}

impl Default for SamplingPolicy {
    fn default() -> Self {
        Self::EveryNth(DEFAULT_SAMPLE_RATE)
    }
}

impl core::fmt::Debug for SamplingPolicy {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::EveryNth(n) => f.debug_tuple("EveryNth").field(n).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Initial scroll offset configuration.
#[derive(Clone)]
pub enum InitialOffset {
    /// A fixed initial offset.
    Value(u64),
    /// A lazily evaluated offset, typically a position the host remembered across reloads.
    Provider(Arc<dyn Fn() -> u64 + Send + Sync>),
}

impl InitialOffset {
    pub(crate) fn resolve(&self) -> u64 {
        match self {
            Self::Value(v) => *v,
            Self::Provider(f) => f(),
        }
    }
}

impl Default for InitialOffset {
    fn default() -> Self {
        Self::Value(0)
    }
}

impl core::fmt::Debug for InitialOffset {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Value(v) => f.debug_tuple("Value").field(v).finish(),
            Self::Provider(_) => f.write_str("Provider(..)"),
        }
    }
}

/// The numeric knobs of a list as plain data.
///
/// With `feature = "serde"` this can be loaded from host settings; missing optional fields take
/// their defaults. Turn it into options with [`ListOptions::from_config`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ListConfig {
    pub item_extent: u32,
    pub viewport_extent: u32,
    #[cfg_attr(feature = "serde", serde(default = "default_overscan"))]
    pub overscan: usize,
    #[cfg_attr(feature = "serde", serde(default = "default_sample_rate"))]
    pub fast_scroll_sample_rate: usize,
    #[cfg_attr(feature = "serde", serde(default = "default_settle_delay_ms"))]
    pub fast_scroll_settle_delay_ms: u64,
}

#[cfg(feature = "serde")]
fn default_overscan() -> usize {
    DEFAULT_OVERSCAN
}

#[cfg(feature = "serde")]
fn default_sample_rate() -> usize {
    DEFAULT_SAMPLE_RATE
}

#[cfg(feature = "serde")]
fn default_settle_delay_ms() -> u64 {
    DEFAULT_SETTLE_DELAY_MS
}

impl ListConfig {
    pub fn new(item_extent: u32, viewport_extent: u32) -> Self {
        Self {
            item_extent,
            viewport_extent,
            overscan: DEFAULT_OVERSCAN,
            fast_scroll_sample_rate: DEFAULT_SAMPLE_RATE,
            fast_scroll_settle_delay_ms: DEFAULT_SETTLE_DELAY_MS,
        }
    }
}

/// Configuration for [`crate::WindowedList`].
///
/// Closures are stored in `Arc`s so options stay cheap to clone and `update_options` does not
/// reallocate them.
pub struct ListOptions<T, K = usize> {
    /// Fixed extent of every item in the scroll axis. Required, must be positive.
    pub item_extent: u32,
    /// Extent of the visible viewport. Required, must be positive.
    pub viewport_extent: u32,
    pub overscan: usize,
    pub sampling: SamplingPolicy,
    /// How long scroll notifications must stop before fast-scrolling ends.
    pub fast_scroll_settle_delay_ms: u64,
    pub get_item_key: GetItemKey<T, K>,
    pub initial_offset: InitialOffset,
    pub on_change: Option<OnChangeCallback<T, K>>,
    pub on_scroll_to_index: Option<OnScrollToIndexCallback>,
}

impl<T, K> Clone for ListOptions<T, K> {
    fn clone(&self) -> Self {
        Self {
            item_extent: self.item_extent,
            viewport_extent: self.viewport_extent,
            overscan: self.overscan,
            sampling: self.sampling.clone(),
            fast_scroll_settle_delay_ms: self.fast_scroll_settle_delay_ms,
            get_item_key: Arc::clone(&self.get_item_key),
            initial_offset: self.initial_offset.clone(),
            on_change: self.on_change.clone(),
            on_scroll_to_index: self.on_scroll_to_index.clone(),
        }
    }
}

impl<T> ListOptions<T, usize> {
    /// Creates options for a list keyed by index.
    pub fn new(item_extent: u32, viewport_extent: u32) -> Self {
        Self::new_with_key(item_extent, viewport_extent, |_, i| i)
    }

    /// Builds index-keyed options from plain config, validating it.
    pub fn from_config(config: &ListConfig) -> Result<Self> {
        let options = Self::new(config.item_extent, config.viewport_extent).with_config(config);
        options.validate()?;
        Ok(options)
    }
}

impl<T, K> ListOptions<T, K> {
    /// Creates options with a custom key mapping.
    pub fn new_with_key(
        item_extent: u32,
        viewport_extent: u32,
        get_item_key: impl Fn(&T, usize) -> K + Send + Sync + 'static,
    ) -> Self {
        Self {
            item_extent,
            viewport_extent,
            overscan: DEFAULT_OVERSCAN,
            sampling: SamplingPolicy::default(),
            fast_scroll_settle_delay_ms: DEFAULT_SETTLE_DELAY_MS,
            get_item_key: Arc::new(get_item_key),
            initial_offset: InitialOffset::default(),
            on_change: None,
            on_scroll_to_index: None,
        }
    }

    /// Checks every numeric option. Called by `WindowedList::new` and every validating setter.
    pub fn validate(&self) -> Result<()> {
        check_extents(self.item_extent, self.viewport_extent)?;
        self.sampling.validate()
    }

    /// Copies every numeric knob from `config`, leaving closures untouched.
    pub fn with_config(mut self, config: &ListConfig) -> Self {
        self.item_extent = config.item_extent;
        self.viewport_extent = config.viewport_extent;
        self.overscan = config.overscan;
        self.sampling = SamplingPolicy::EveryNth(config.fast_scroll_sample_rate);
        self.fast_scroll_settle_delay_ms = config.fast_scroll_settle_delay_ms;
        self
    }

    /// Switches to a custom key type.
    ///
    /// `on_change` receives the list typed over its key, so an already-set `on_change` is
    /// dropped here. Set it after choosing the key.
    pub fn with_get_item_key<K2>(
        self,
        get_item_key: impl Fn(&T, usize) -> K2 + Send + Sync + 'static,
    ) -> ListOptions<T, K2> {
        if self.on_change.is_some() {
            vwarn!("with_get_item_key dropped an on_change callback");
        }
        ListOptions {
            item_extent: self.item_extent,
            viewport_extent: self.viewport_extent,
            overscan: self.overscan,
            sampling: self.sampling,
            fast_scroll_settle_delay_ms: self.fast_scroll_settle_delay_ms,
            get_item_key: Arc::new(get_item_key),
            initial_offset: self.initial_offset,
            on_change: None,
            on_scroll_to_index: self.on_scroll_to_index,
        }
    }

    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    pub fn with_fast_scroll_sample_rate(mut self, every: usize) -> Self {
        self.sampling = SamplingPolicy::EveryNth(every);
        self
    }

    pub fn with_sampling(mut self, sampling: SamplingPolicy) -> Self {
        self.sampling = sampling;
        self
    }

    pub fn with_fast_scroll_settle_delay_ms(mut self, delay_ms: u64) -> Self {
        self.fast_scroll_settle_delay_ms = delay_ms;
        self
    }

    pub fn with_initial_offset_value(mut self, initial_offset: u64) -> Self {
        self.initial_offset = InitialOffset::Value(initial_offset);
        self
    }

    pub fn with_initial_offset_provider(
        mut self,
        initial_offset: impl Fn() -> u64 + Send + Sync + 'static,
    ) -> Self {
        self.initial_offset = InitialOffset::Provider(Arc::new(initial_offset));
        self
    }

    pub fn with_on_change(
        mut self,
        on_change: Option<impl Fn(&WindowedList<T, K>, bool) + Send + Sync + 'static>,
    ) -> Self {
        self.on_change = on_change.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_on_scroll_to_index(
        mut self,
        observer: Option<impl Fn(usize) + Send + Sync + 'static>,
    ) -> Self {
        self.on_scroll_to_index = observer.map(|f| Arc::new(f) as _);
        self
    }
}

impl<T, K> core::fmt::Debug for ListOptions<T, K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ListOptions")
            .field("item_extent", &self.item_extent)
            .field("viewport_extent", &self.viewport_extent)
            .field("overscan", &self.overscan)
            .field("sampling", &self.sampling)
            .field(
                "fast_scroll_settle_delay_ms",
                &self.fast_scroll_settle_delay_ms,
            )
            .field("initial_offset", &self.initial_offset)
            .finish_non_exhaustive()
    }
}
