use alloc::string::String;

use crate::Column;

/// Sort direction. There is no "unsorted" direction: a key is either active or absent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// The active sort, owned by the caller.
///
/// The table only proposes a new value after a header click; applying it to the rows is the
/// caller's job (see [`SortState::sort_rows`] for a helper).
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SortState {
    pub key: Option<String>,
    pub direction: SortDirection,
}

impl SortState {
    pub fn unsorted() -> Self {
        Self::default()
    }

    pub fn by(key: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            key: Some(key.into()),
            direction,
        }
    }

    pub fn is_active(&self, key: &str) -> bool {
        self.key.as_deref() == Some(key)
    }

    /// The direction shown on `key`'s header, if it is the active key.
    pub fn direction_for(&self, key: &str) -> Option<SortDirection> {
        self.is_active(key).then_some(self.direction)
    }

    /// Header-click transition for a sortable key: flips the active key, otherwise activates
    /// `key` ascending.
    pub fn toggled(&self, key: &str) -> Self {
        if self.is_active(key) {
            Self {
                key: self.key.clone(),
                direction: self.direction.flipped(),
            }
        } else {
            Self::by(key, SortDirection::Asc)
        }
    }

    /// Stable-sorts `rows` with the active column's comparator.
    ///
    /// Returns `false` (leaving `rows` untouched) when no key is active, the key names no column,
    /// or that column has no comparator.
    pub fn sort_rows<R, C>(&self, rows: &mut [R], columns: &[Column<R, C>]) -> bool {
        let Some(key) = self.key.as_deref() else {
            return false;
        };
        let Some(compare) = columns
            .iter()
            .find(|c| c.key == key)
            .and_then(|c| c.compare.as_ref())
        else {
            return false;
        };
        match self.direction {
            SortDirection::Asc => rows.sort_by(|a, b| compare(a, b)),
            SortDirection::Desc => rows.sort_by(|a, b| compare(b, a)),
        }
        true
    }
}

/// Resolves a header click against the column model.
///
/// Non-sortable and unknown keys leave the sort state unchanged.
pub fn click_header<R, C>(columns: &[Column<R, C>], key: &str, current: &SortState) -> SortState {
    match columns.iter().find(|c| c.key == key) {
        Some(column) if column.sortable => current.toggled(key),
        _ => current.clone(),
    }
}
