//! The unkeyed variant of [`Tree`]: every element is its own key.
//!
//! # Examples
//!
//! ```
//! use ostree::set::Set;
//!
//! let set: Set<_> = [4, 5, 2, 1, 3].into_iter().collect();
//!
//! assert_eq!(set.iter().copied().collect::<Vec<_>>(), [1, 2, 3, 4, 5]);
//! assert_eq!(set.rank(3), Some(&3));
//! assert!(!set.contains(&6));
//! ```

use std::fmt;
use std::iter::FusedIterator;
use std::ops::ControlFlow;

use crate::avl::{self, Tree};
use crate::compare::{Comparator, Natural};

/// An ordered set backed by an order-statistics AVL tree.
#[derive(Clone)]
pub struct Set<T, C = Natural> {
    tree: Tree<T, (), C>,
}

impl<T, C> Default for Set<T, C>
where
    C: Default,
{
    fn default() -> Self {
        Self {
            tree: Tree::default(),
        }
    }
}

impl<T, C> fmt::Debug for Set<T, C>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T> Set<T> {
    /// Generates a new, empty `Set` ordered by `T`'s [`Ord`] implementation.
    pub fn new() -> Self
    where
        T: Ord,
    {
        Self { tree: Tree::new() }
    }
}

impl<T, C> Set<T, C> {
    /// Generates a new, empty `Set` ordered by `cmp`.
    pub fn with_comparator(cmp: C) -> Self {
        Self {
            tree: Tree::with_comparator(cmp),
        }
    }

    /// The comparator this set orders its elements with.
    pub fn comparator(&self) -> &C {
        self.tree.comparator()
    }

    /// The number of elements in the set. `O(1)`.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Whether the set has no elements.
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// The number of levels in the backing tree.
    pub fn height(&self) -> usize {
        self.tree.height()
    }

    /// Removes every element.
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// The `k`-th smallest element, counting from 1.
    pub fn rank(&self, k: usize) -> Option<&T> {
        self.tree.rank_entry(k).map(|(t, _)| t)
    }

    /// The smallest element.
    pub fn first(&self) -> Option<&T> {
        self.tree.first().map(|(t, _)| t)
    }

    /// The largest element.
    pub fn last(&self) -> Option<&T> {
        self.tree.last().map(|(t, _)| t)
    }

    /// An iterator over the elements in ascending order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter(self.tree.keys())
    }

    /// Calls `f` on each element in ascending order until it returns [`ControlFlow::Break`].
    pub fn walk<B, F>(&self, mut f: F) -> ControlFlow<B>
    where
        F: FnMut(&T) -> ControlFlow<B>,
    {
        self.tree.walk(|t, _| f(t))
    }
}

impl<T, C> Set<T, C>
where
    C: Comparator<T>,
{
    /// Adds `value` to the set. Returns `false` if an equal element was already present, in which
    /// case that element is overwritten with `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ostree::set::Set;
    ///
    /// let mut set = Set::new();
    ///
    /// assert!(set.insert(1));
    /// assert!(!set.insert(1));
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn insert(&mut self, value: T) -> bool {
        self.replace(value).is_none()
    }

    /// Adds `value` to the set, returning the element it overwrote, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use ostree::set::Set;
    ///
    /// // Compare by the first field only.
    /// let mut set = Set::with_comparator(|a: &(i32, &str), b: &(i32, &str)| a.0.cmp(&b.0));
    ///
    /// assert_eq!(set.replace((1, "old")), None);
    /// assert_eq!(set.replace((1, "new")), Some((1, "old")));
    /// assert_eq!(set.get(&(1, "")), Some(&(1, "new")));
    /// ```
    pub fn replace(&mut self, value: T) -> Option<T> {
        self.tree.insert_entry(value, ()).map(|(t, ())| t)
    }

    /// Removes the element equal to `value`. Returns whether one was present.
    pub fn remove(&mut self, value: &T) -> bool {
        self.take(value).is_some()
    }

    /// Removes and returns the element equal to `value`.
    pub fn take(&mut self, value: &T) -> Option<T> {
        self.tree.remove_entry(value).map(|(t, ())| t)
    }

    /// Whether an element equal to `value` is present.
    pub fn contains(&self, value: &T) -> bool {
        self.tree.contains_key(value)
    }

    /// The stored element equal to `value`.
    pub fn get(&self, value: &T) -> Option<&T> {
        self.tree.get_key_value(value).map(|(t, _)| t)
    }

    /// The 1-indexed position of `value` in ascending order.
    pub fn rank_of(&self, value: &T) -> Option<usize> {
        self.tree.rank_of(value)
    }
}

impl<T> FromIterator<T> for Set<T>
where
    T: Ord,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<T, C> Extend<T> for Set<T, C>
where
    C: Comparator<T>,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<'a, T, C> IntoIterator for &'a Set<T, C> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An in-order iterator over the elements of a [`Set`].
pub struct Iter<'a, T>(avl::Keys<'a, T, ()>);

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T> fmt::Debug for Iter<'_, T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}
