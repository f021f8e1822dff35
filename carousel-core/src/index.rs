//! Active index arithmetic and ownership.

/// Map any proposed index onto a valid slide position.
///
/// With `wrap`, the proposal is taken modulo the slide count (negative
/// proposals wrap from the end). Without it, the proposal is clamped to the
/// first and last slide. Zero slides are treated as one so the result is
/// always `0` there.
#[must_use]
pub fn normalize(proposed: i64, slide_count: usize, wrap: bool) -> usize {
    let len = i64::try_from(slide_count.max(1)).unwrap_or(i64::MAX);
    let index = if wrap {
        proposed.rem_euclid(len)
    } else {
        proposed.clamp(0, len - 1)
    };
    usize::try_from(index).unwrap_or(0)
}

/// Convert a slide position into the signed domain used for proposals.
#[must_use]
pub(crate) fn signed(index: usize) -> i64 {
    i64::try_from(index).unwrap_or(i64::MAX)
}

/// Who owns the active index. Fixed when the carousel is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexOwner {
    /// The carousel holds the index and commits its own proposals.
    Owned(OwnedIndex),
    /// The caller holds the index; the carousel only proposes changes.
    External(ExternalIndex),
}

/// Index cell written only by the carousel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OwnedIndex {
    current: usize,
}

impl OwnedIndex {
    pub(crate) const fn new(current: usize) -> Self {
        Self { current }
    }

    pub(crate) fn set(&mut self, index: usize) {
        self.current = index;
    }

    /// The committed index.
    #[must_use]
    pub const fn get(&self) -> usize {
        self.current
    }
}

/// Read-only view of an index written by the caller.
///
/// The value is kept exactly as supplied; readers normalize it against the
/// slide list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExternalIndex {
    supplied: usize,
}

impl ExternalIndex {
    pub(crate) const fn new(supplied: usize) -> Self {
        Self { supplied }
    }

    pub(crate) fn sync(&mut self, supplied: usize) {
        self.supplied = supplied;
    }

    /// The last index the caller supplied.
    #[must_use]
    pub const fn supplied(&self) -> usize {
        self.supplied
    }
}

impl IndexOwner {
    /// Raw index before normalization.
    #[must_use]
    pub const fn raw(&self) -> usize {
        match self {
            Self::Owned(owned) => owned.get(),
            Self::External(external) => external.supplied(),
        }
    }

    /// Whether the caller owns the index.
    #[must_use]
    pub const fn is_external(&self) -> bool {
        matches!(self, Self::External(_))
    }
}
