use alloc::collections::BTreeSet;

/// The derived state of a "select all" control.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SelectAllState {
    Unchecked,
    Indeterminate,
    Checked,
}

impl SelectAllState {
    /// Derives the tri-state from a selection and the *current* collection length.
    ///
    /// Only members that are valid indexes for `len` count, so stale entries left over from a
    /// longer collection never make the control look fully checked.
    pub fn derive(selection: &SelectionSet, len: usize) -> Self {
        let live = selection.live_count(len);
        if len == 0 || live == 0 {
            Self::Unchecked
        } else if live == len {
            Self::Checked
        } else {
            Self::Indeterminate
        }
    }

    pub fn is_checked(self) -> bool {
        self == Self::Checked
    }

    pub fn is_indeterminate(self) -> bool {
        self == Self::Indeterminate
    }
}

/// A set of selected row indexes, owned by the caller.
///
/// Every operation returns a new set. Indexes that fall outside the current collection are kept
/// as-is until the caller prunes them ([`SelectionSet::pruned`]) or a select-all gesture replaces
/// the whole set.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SelectionSet {
    indices: BTreeSet<usize>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every index in `0..len`.
    pub fn all(len: usize) -> Self {
        (0..len).collect()
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.indices.contains(&index)
    }

    /// Ascending iteration over every member, stale ones included.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.indices.iter().copied()
    }

    /// Number of members that are valid indexes for a collection of `len` rows.
    pub fn live_count(&self, len: usize) -> usize {
        self.indices.range(..len).count()
    }

    /// Members that are no longer valid for a collection of `len` rows.
    pub fn stale(&self, len: usize) -> impl Iterator<Item = usize> + '_ {
        self.indices.range(len..).copied()
    }

    /// A copy without the stale members.
    pub fn pruned(&self, len: usize) -> Self {
        self.indices.range(..len).copied().collect()
    }

    pub fn with(&self, index: usize) -> Self {
        let mut next = self.clone();
        next.indices.insert(index);
        next
    }

    pub fn without(&self, index: usize) -> Self {
        let mut next = self.clone();
        next.indices.remove(&index);
        next
    }

    /// Flips membership of `index`.
    pub fn toggled(&self, index: usize) -> Self {
        if self.contains(index) {
            self.without(index)
        } else {
            self.with(index)
        }
    }

    /// The select-all gesture: clears a fully checked selection, otherwise selects `0..len`.
    pub fn select_all_toggled(&self, len: usize) -> Self {
        match SelectAllState::derive(self, len) {
            SelectAllState::Checked => Self::new(),
            SelectAllState::Unchecked | SelectAllState::Indeterminate => Self::all(len),
        }
    }
}

impl FromIterator<usize> for SelectionSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Self {
            indices: iter.into_iter().collect(),
        }
    }
}

impl<const N: usize> From<[usize; N]> for SelectionSet {
    fn from(indices: [usize; N]) -> Self {
        indices.into_iter().collect()
    }
}
