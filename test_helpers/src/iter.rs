//! Iterators that record how they were consumed.

use std::cell::Cell;
use std::rc::Rc;

/// Shared view of how many items a [`Tracked`] iterator has yielded.
#[derive(Clone, Debug, Default)]
pub struct Pulls(Rc<Cell<usize>>);

impl Pulls {
    /// Items yielded so far.
    #[must_use]
    pub fn count(&self) -> usize {
        self.0.get()
    }
}

/// Wraps an iterator, counting the items it yields.
///
/// The wrapper is not `Clone`, so a consumer can only walk it once. Tests
/// hand it to bulk mutators and then inspect [`Pulls`] to confirm each
/// element was pulled exactly once.
///
/// # Examples
///
/// ```
/// use freebuilder_test_helpers::iter::Tracked;
///
/// let (tracked, pulls) = Tracked::new(vec![1, 2, 3]);
/// let total: i32 = tracked.sum();
/// assert_eq!(total, 6);
/// assert_eq!(pulls.count(), 3);
/// ```
#[derive(Debug)]
pub struct Tracked<I> {
    inner: I,
    pulls: Pulls,
}

impl<I: Iterator> Tracked<I> {
    /// Wraps `source` and returns the handle reporting its consumption.
    pub fn new<S>(source: S) -> (Self, Pulls)
    where
        S: IntoIterator<IntoIter = I>,
    {
        let pulls = Pulls::default();
        let tracked = Self {
            inner: source.into_iter(),
            pulls: pulls.clone(),
        };
        (tracked, pulls)
    }
}

impl<I: Iterator> Iterator for Tracked<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.inner.next()?;
        self.pulls.0.set(self.pulls.0.get() + 1);
        Some(item)
    }
}
