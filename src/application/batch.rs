//! Canonical shape of a `build_many` / `create_many` request

use super::attributes::Overrides;

/// One overrides entry per document to produce
///
/// Built from a count, a list of overrides, or both:
///
/// ```
/// use fixture_factory::{Batch, Overrides};
///
/// assert_eq!(Batch::from(3).len(), 3);
/// assert_eq!(Batch::from(vec![Overrides::new(), Overrides::new()]).len(), 2);
/// assert_eq!(Batch::from((vec![Overrides::new()], 4)).len(), 4);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Batch {
    entries: Vec<Overrides>,
}

impl Batch {
    /// Canonicalize a list and/or count.
    ///
    /// Without a count, the list length is used. With both, the list is
    /// truncated or padded with empty overrides to exactly `count`.
    pub fn normalize(overrides: Option<Vec<Overrides>>, count: Option<usize>) -> Self {
        let mut entries = overrides.unwrap_or_default();
        let count = count.unwrap_or(entries.len());
        entries.resize_with(count, Overrides::default);
        Self { entries }
    }

    /// `count` documents with no overrides
    pub fn of(count: usize) -> Self {
        Self::normalize(None, Some(count))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[Overrides] {
        &self.entries
    }
}

impl From<usize> for Batch {
    fn from(count: usize) -> Self {
        Self::of(count)
    }
}

impl From<Vec<Overrides>> for Batch {
    fn from(overrides: Vec<Overrides>) -> Self {
        Self::normalize(Some(overrides), None)
    }
}

impl From<(Vec<Overrides>, usize)> for Batch {
    fn from((overrides, count): (Vec<Overrides>, usize)) -> Self {
        Self::normalize(Some(overrides), Some(count))
    }
}

impl IntoIterator for Batch {
    type Item = Overrides;
    type IntoIter = std::vec::IntoIter<Overrides>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
