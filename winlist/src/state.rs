/// The mutable half of a list: where the viewport is and whether it is moving.
///
/// Only scroll notifications, imperative scrolls and the settle timer change it. Rendering reads
/// it and never writes it.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize` so a host can keep a
/// remembered scroll position across reloads.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewportState {
    pub scroll_offset: u64,
    pub is_fast_scrolling: bool,
}
