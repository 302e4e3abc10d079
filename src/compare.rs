//! Orderings used by the trees in this crate.
//!
//! A tree carries its comparator as a value, so two trees over the same key type can sort
//! differently without any shared state.
//!
//! # Examples
//!
//! ```
//! use std::cmp::Ordering;
//!
//! use ostree::avl::Tree;
//! use ostree::compare::{Comparator, Natural, Reversed, ThreeWay};
//!
//! assert_eq!(Natural.compare(&1, &2), Ordering::Less);
//! assert_eq!(Reversed(Natural).compare(&1, &2), Ordering::Greater);
//! assert_eq!(ThreeWay(|a: &i32, b: &i32| a - b).compare(&5, &5), Ordering::Equal);
//!
//! // Any closure returning an `Ordering` is a comparator too.
//! let mut tree = Tree::with_comparator(|a: &i32, b: &i32| b.cmp(a));
//! tree.insert(1, "one");
//! tree.insert(2, "two");
//! assert_eq!(tree.rank(1), Some(&"two"));
//! ```

use std::cmp::Ordering;

/// A three-way comparison over keys of type `K`.
///
/// Implementations must be a consistent strict weak ordering over every key ever handed to the
/// tree. A comparator that isn't leaves the tree in an unspecified (but memory safe) shape.
pub trait Comparator<K: ?Sized> {
    /// Compares `a` with `b`.
    fn compare(&self, a: &K, b: &K) -> Ordering;
}

/// Orders keys by their [`Ord`] implementation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Natural;

impl<K: Ord + ?Sized> Comparator<K> for Natural {
    fn compare(&self, a: &K, b: &K) -> Ordering {
        a.cmp(b)
    }
}

impl<K: ?Sized, F> Comparator<K> for F
where
    F: Fn(&K, &K) -> Ordering,
{
    fn compare(&self, a: &K, b: &K) -> Ordering {
        self(a, b)
    }
}

/// Adapts a function returning a negative, zero, or positive number into a [`Comparator`].
#[derive(Clone, Copy, Debug, Default)]
pub struct ThreeWay<F>(pub F);

impl<K: ?Sized, F> Comparator<K> for ThreeWay<F>
where
    F: Fn(&K, &K) -> i32,
{
    fn compare(&self, a: &K, b: &K) -> Ordering {
        (self.0)(a, b).cmp(&0)
    }
}

/// Flips the ordering of the wrapped comparator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Reversed<C>(pub C);

impl<K: ?Sized, C> Comparator<K> for Reversed<C>
where
    C: Comparator<K>,
{
    fn compare(&self, a: &K, b: &K) -> Ordering {
        self.0.compare(b, a)
    }
}
