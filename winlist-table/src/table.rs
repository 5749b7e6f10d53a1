use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

use winlist::{ListOptions, ScrollTarget, VisibleRange, WindowMetrics, WindowedList};

use crate::{
    CellAlign, Column, SelectAllState, SelectionSet, SortDirection, SortState, click_header,
};

/// Per-row class/style hook: `(row, row_index) -> class`.
pub type RowClassFn<R> = Arc<dyn Fn(&R, usize) -> Option<String> + Send + Sync>;

/// Which of the three table states a render lands in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TablePhase {
    Loading,
    Empty,
    Populated,
}

/// Header metadata for one column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnHeader {
    pub key: String,
    pub label: String,
    pub width: Option<u32>,
    pub align: CellAlign,
    pub sortable: bool,
    /// Set on the active sort column only.
    pub sort: Option<SortDirection>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HeaderCell {
    /// Leading select-all control, present when row selection is enabled.
    Selection(SelectAllState),
    Column(ColumnHeader),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RowContent<C> {
    /// One cell per column, in column order.
    Cells(Vec<C>),
    /// Deferred while fast-scrolling; draw a lightweight stand-in.
    Placeholder,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableRow<K, C> {
    pub key: K,
    pub index: usize,
    /// Absolute start offset of the row in the scroll axis.
    pub start: u64,
    pub class: Option<String>,
    /// `Some` only when row selection is enabled.
    pub selected: Option<bool>,
    pub content: RowContent<C>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableBody<K, C> {
    pub range: Option<VisibleRange>,
    pub metrics: WindowMetrics,
    pub is_fast_scrolling: bool,
    pub rows: Vec<TableRow<K, C>>,
}

/// The output of [`Table::render`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TableView<K, C> {
    /// The body shows a loading indicator; no window was computed.
    Loading,
    /// The collection is empty; the host shows its empty-state placeholder.
    Empty,
    Populated {
        header: Vec<HeaderCell>,
        body: TableBody<K, C>,
    },
}

impl<K, C> TableView<K, C> {
    pub fn phase(&self) -> TablePhase {
        match self {
            Self::Loading => TablePhase::Loading,
            Self::Empty => TablePhase::Empty,
            Self::Populated { .. } => TablePhase::Populated,
        }
    }
}

/// A virtualized table: a column model, header/sort/selection derivation, and a
/// [`WindowedList`] for the body.
///
/// The table never computes ranges itself. Sort and selection values stay with the caller:
/// the table reads them on every render and returns proposed new values from gestures.
///
/// A new table starts in the loading phase; call `set_loading(false)` once rows arrive.
pub struct Table<R, K = usize, C = String> {
    list: WindowedList<R, K>,
    columns: Vec<Column<R, C>>,
    selectable: bool,
    row_class: Option<RowClassFn<R>>,
    loading: bool,
}

impl<R, K, C> Table<R, K, C> {
    pub fn new(options: ListOptions<R, K>, columns: Vec<Column<R, C>>) -> winlist::Result<Self> {
        Ok(Self::from_list(WindowedList::new(options)?, columns))
    }

    pub fn from_list(list: WindowedList<R, K>, columns: Vec<Column<R, C>>) -> Self {
        tdebug!(columns = columns.len(), "Table::from_list");
        Self {
            list,
            columns,
            selectable: false,
            row_class: None,
            loading: true,
        }
    }

    pub fn with_selection(mut self, selectable: bool) -> Self {
        self.selectable = selectable;
        self
    }

    pub fn with_row_class(
        mut self,
        row_class: impl Fn(&R, usize) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        self.row_class = Some(Arc::new(row_class));
        self
    }

    pub fn list(&self) -> &WindowedList<R, K> {
        &self.list
    }

    /// The body's scroll handle (`scroll_to_index`, `notify_scroll`, `tick`, ...).
    pub fn list_mut(&mut self) -> &mut WindowedList<R, K> {
        &mut self.list
    }

    pub fn into_list(self) -> WindowedList<R, K> {
        self.list
    }

    pub fn columns(&self) -> &[Column<R, C>] {
        &self.columns
    }

    pub fn set_columns(&mut self, columns: Vec<Column<R, C>>) {
        self.columns = columns;
    }

    pub fn is_selectable(&self) -> bool {
        self.selectable
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn set_loading(&mut self, loading: bool) {
        if self.loading != loading {
            tdebug!(loading, "Table::set_loading");
        }
        self.loading = loading;
    }

    /// Signals that the caller is fetching a new collection.
    pub fn reload(&mut self) {
        self.set_loading(true);
    }

    /// Sets the body's length ahead of the next render (`render` also syncs it).
    pub fn set_len(&mut self, len: usize) {
        self.list.set_len(len);
    }

    pub fn phase(&self, len: usize) -> TablePhase {
        if self.loading {
            TablePhase::Loading
        } else if len == 0 {
            TablePhase::Empty
        } else {
            TablePhase::Populated
        }
    }

    /// Proposes the sort state after a header click on `key`.
    pub fn click_header(&self, key: &str, current: &SortState) -> SortState {
        let next = click_header(&self.columns, key, current);
        ttrace!(key, changed = next != *current, "Table::click_header");
        next
    }

    pub fn select_all_state(&self, selection: &SelectionSet, len: usize) -> SelectAllState {
        SelectAllState::derive(selection, len)
    }

    /// Proposes the selection after activating the select-all control.
    ///
    /// Returns the selection unchanged when row selection is disabled.
    pub fn toggle_select_all(&self, current: &SelectionSet, len: usize) -> SelectionSet {
        if !self.selectable {
            return current.clone();
        }
        let next = current.select_all_toggled(len);
        ttrace!(len, selected = next.len(), "Table::toggle_select_all");
        next
    }

    /// Proposes the selection after toggling one row's checkbox.
    ///
    /// Ignored when row selection is disabled or `index` is not a current row.
    pub fn toggle_row(&self, current: &SelectionSet, index: usize, len: usize) -> SelectionSet {
        if !self.selectable || index >= len {
            tdebug!(index, len, "Table::toggle_row ignored");
            return current.clone();
        }
        current.toggled(index)
    }

    /// Builds the header row for the given sort and selection.
    pub fn header(
        &self,
        sort: &SortState,
        selection: &SelectionSet,
        len: usize,
    ) -> Vec<HeaderCell> {
        let mut cells = Vec::with_capacity(self.columns.len() + usize::from(self.selectable));
        if self.selectable {
            cells.push(HeaderCell::Selection(SelectAllState::derive(selection, len)));
        }
        cells.extend(self.columns.iter().map(|c| {
            HeaderCell::Column(ColumnHeader {
                key: c.key.clone(),
                label: c.header.clone(),
                width: c.width,
                align: c.align,
                sortable: c.sortable,
                sort: if c.sortable {
                    sort.direction_for(&c.key)
                } else {
                    None
                },
            })
        }));
        cells
    }

    /// Scrolls the body to `index` after syncing the list with a collection of `len` rows, so
    /// the index clamps into the current collection.
    pub fn scroll_to_index(&mut self, index: isize, len: usize) -> Option<ScrollTarget> {
        self.list.set_len(len);
        self.list.scroll_to_index(index)
    }

    /// Renders the table for `rows`, which the caller has already sorted and filtered.
    ///
    /// `rows.len()` becomes the list's length, so later scroll requests clamp against the
    /// collection that was rendered. Loading and empty states short-circuit before a window is
    /// computed.
    pub fn render(
        &mut self,
        rows: &[R],
        sort: &SortState,
        selection: &SelectionSet,
    ) -> TableView<K, C> {
        let len = rows.len();
        self.list.set_len(len);
        match self.phase(len) {
            TablePhase::Loading => return TableView::Loading,
            TablePhase::Empty => return TableView::Empty,
            TablePhase::Populated => {}
        }

        let header = self.header(sort, selection, len);
        let window = self.list.render(rows);
        let body_rows = window
            .items
            .into_iter()
            .map(|it| {
                let content = if it.eager {
                    RowContent::Cells(
                        self.columns
                            .iter()
                            .map(|c| c.render_cell(it.item, it.index))
                            .collect(),
                    )
                } else {
                    RowContent::Placeholder
                };
                TableRow {
                    key: it.key,
                    index: it.index,
                    start: it.start,
                    class: self.row_class.as_ref().and_then(|f| f(it.item, it.index)),
                    selected: self.selectable.then_some(selection.contains(it.index)),
                    content,
                }
            })
            .collect();

        TableView::Populated {
            header,
            body: TableBody {
                range: window.range,
                metrics: window.metrics,
                is_fast_scrolling: window.is_fast_scrolling,
                rows: body_rows,
            },
        }
    }
}

impl<R, K, C> core::fmt::Debug for Table<R, K, C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Table")
            .field("list", &self.list)
            .field("columns", &self.columns)
            .field("selectable", &self.selectable)
            .field("loading", &self.loading)
            .finish_non_exhaustive()
    }
}
