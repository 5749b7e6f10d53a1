use alloc::string::String;
use alloc::sync::Arc;
use core::cmp::Ordering;

/// Horizontal alignment hint for a column's cells and header.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellAlign {
    #[default]
    Start,
    Center,
    End,
}

/// Produces the displayable content of a cell from `(row, row_index)`.
pub type CellFn<R, C> = Arc<dyn Fn(&R, usize) -> C + Send + Sync>;

/// Orders two rows for the optional sorting helper.
pub type CompareFn<R> = Arc<dyn Fn(&R, &R) -> Ordering + Send + Sync>;

/// A column descriptor.
///
/// `C` is whatever your UI layer draws in a cell (a `String` by default, but it can be a styled
/// span, a widget id, etc.).
pub struct Column<R, C = String> {
    /// Stable identifier, also used as the sort key.
    pub key: String,
    pub header: String,
    pub width: Option<u32>,
    pub sortable: bool,
    pub align: CellAlign,
    pub cell: CellFn<R, C>,
    pub compare: Option<CompareFn<R>>,
}

impl<R, C> Column<R, C> {
    pub fn new(
        key: impl Into<String>,
        header: impl Into<String>,
        cell: impl Fn(&R, usize) -> C + Send + Sync + 'static,
    ) -> Self {
        Self {
            key: key.into(),
            header: header.into(),
            width: None,
            sortable: false,
            align: CellAlign::Start,
            cell: Arc::new(cell),
            compare: None,
        }
    }

    /// Builds a column from a value accessor and a formatter over `(value, row, row_index)`.
    pub fn with_value<V>(
        key: impl Into<String>,
        header: impl Into<String>,
        value: impl Fn(&R) -> V + Send + Sync + 'static,
        format: impl Fn(&V, &R, usize) -> C + Send + Sync + 'static,
    ) -> Self {
        Self::new(key, header, move |row, index| {
            let v = value(row);
            format(&v, row, index)
        })
    }

    pub fn with_width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn with_sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    pub fn with_align(mut self, align: CellAlign) -> Self {
        self.align = align;
        self
    }

    /// Attaches a comparator and marks the column sortable.
    pub fn with_compare(
        mut self,
        compare: impl Fn(&R, &R) -> Ordering + Send + Sync + 'static,
    ) -> Self {
        self.compare = Some(Arc::new(compare));
        self.sortable = true;
        self
    }

    /// Shorthand for `with_compare` ordering rows by an extracted key.
    pub fn with_sort_key<V: Ord>(self, sort_key: impl Fn(&R) -> V + Send + Sync + 'static) -> Self {
        self.with_compare(move |a, b| sort_key(a).cmp(&sort_key(b)))
    }

    pub fn render_cell(&self, row: &R, index: usize) -> C {
        (self.cell)(row, index)
    }
}

impl<R, C> Clone for Column<R, C> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            header: self.header.clone(),
            width: self.width,
            sortable: self.sortable,
            align: self.align,
            cell: Arc::clone(&self.cell),
            compare: self.compare.clone(),
        }
    }
}

impl<R, C> core::fmt::Debug for Column<R, C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("header", &self.header)
            .field("width", &self.width)
            .field("sortable", &self.sortable)
            .field("align", &self.align)
            .field("compare", &self.compare.is_some())
            .finish_non_exhaustive()
    }
}
