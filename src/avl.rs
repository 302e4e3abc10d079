//! An order-statistics AVL tree. Besides the usual map operations, every node tracks the size of
//! its subtree so the tree can answer "what is the k-th smallest entry?" in `O(lg N)`.
//!
//! # Examples
//!
//! ```
//! use ostree::avl::Tree;
//!
//! let mut tree = Tree::new();
//!
//! // Nothing in here yet.
//! assert_eq!(tree.get(&1), None);
//! assert_eq!(tree.rank(1), None);
//!
//! tree.insert(3, "c");
//! tree.insert(1, "a");
//! tree.insert(2, "b");
//!
//! // Ranks are 1-indexed positions in ascending key order.
//! assert_eq!(tree.rank(1), Some(&"a"));
//! assert_eq!(tree.rank(3), Some(&"c"));
//! assert_eq!(tree.rank_of(&2), Some(2));
//!
//! // Inserting a new value for the same key overwrites the value.
//! assert_eq!(tree.insert(1, "A"), Some("a"));
//! assert_eq!(tree.len(), 3);
//!
//! // Removing a key returns its value.
//! assert_eq!(tree.remove(&2), Some("b"));
//! assert_eq!(tree.iter().collect::<Vec<_>>(), [(&1, &"A"), (&3, &"c")]);
//! ```

mod node;

use std::fmt;
use std::iter::FusedIterator;
use std::ops::ControlFlow;

use crate::compare::{Comparator, Natural};
use node::{Link, Node};

/// A self-balancing Binary Search Tree (specifically, an AVL tree) augmented with subtree sizes.
/// This can be used for inserting, finding, and removing keys and values, and for finding entries
/// by their position in sorted order.
///
/// Keys are ordered by the comparator `C` the tree was built with. Keys are unique: inserting a
/// key that compares equal to an existing one overwrites that entry.
#[derive(Clone)]
pub struct Tree<K, V, C = Natural> {
    root: Link<K, V>,
    cmp: C,
}

impl<K, V, C> Default for Tree<K, V, C>
where
    C: Default,
{
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<K, V, C> fmt::Debug for Tree<K, V, C>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V> Tree<K, V> {
    /// Generates a new, empty `Tree` ordered by `K`'s [`Ord`] implementation.
    pub fn new() -> Self
    where
        K: Ord,
    {
        Self::with_comparator(Natural)
    }
}

impl<K, V, C> Tree<K, V, C> {
    /// Generates a new, empty `Tree` ordered by `cmp`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ostree::avl::Tree;
    /// use ostree::compare::ThreeWay;
    ///
    /// let mut tree = Tree::with_comparator(ThreeWay(|a: &i32, b: &i32| b - a));
    /// tree.insert(1, ());
    /// tree.insert(2, ());
    ///
    /// assert_eq!(tree.keys().collect::<Vec<_>>(), [&2, &1]);
    /// ```
    pub fn with_comparator(cmp: C) -> Self {
        Self {
            root: Link(None),
            cmp,
        }
    }

    /// The comparator this tree orders its keys with.
    pub fn comparator(&self) -> &C {
        &self.cmp
    }

    /// The number of entries in the tree. `O(1)`.
    pub fn len(&self) -> usize {
        self.root.size()
    }

    /// Whether the tree has no entries.
    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// The number of levels in the tree. An empty tree has height 0.
    pub fn height(&self) -> usize {
        self.root.height()
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.root = Link(None);
    }

    /// Returns the `k`-th smallest value, counting from 1. Returns `None` if `k` is 0 or larger
    /// than [`Tree::len`].
    ///
    /// # Examples
    ///
    /// ```
    /// use ostree::avl::Tree;
    ///
    /// let tree: Tree<_, _> = [(10, 'a'), (30, 'c'), (20, 'b')].into_iter().collect();
    ///
    /// assert_eq!(tree.rank(2), Some(&'b'));
    /// assert_eq!(tree.rank(0), None);
    /// assert_eq!(tree.rank(4), None);
    /// ```
    pub fn rank(&self, k: usize) -> Option<&V> {
        self.rank_entry(k).map(|(_, v)| v)
    }

    /// Like [`Tree::rank`] but also returns the key.
    pub fn rank_entry(&self, k: usize) -> Option<(&K, &V)> {
        self.root.select(k).map(|n| (&n.key, &n.value))
    }

    /// The entry with the smallest key.
    pub fn first(&self) -> Option<(&K, &V)> {
        self.root.leftmost().map(|n| (&n.key, &n.value))
    }

    /// The entry with the largest key.
    pub fn last(&self) -> Option<(&K, &V)> {
        self.root.rightmost().map(|n| (&n.key, &n.value))
    }

    /// An iterator over the entries in ascending key order.
    ///
    /// Each call starts a fresh pass. Nodes are only visited as the iterator is advanced, so
    /// dropping it early does no further work.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(&self.root)
    }

    /// An iterator over the keys in ascending order.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys(self.iter())
    }

    /// An iterator over the values in ascending key order.
    pub fn values(&self) -> Values<'_, K, V> {
        Values(self.iter())
    }

    /// Calls `f` on each entry in ascending key order until `f` returns
    /// [`ControlFlow::Break`]. Once `f` breaks, no other entry is visited and the break value is
    /// returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::ops::ControlFlow;
    ///
    /// use ostree::avl::Tree;
    ///
    /// let tree: Tree<_, _> = (1..=100).map(|k| (k, k * k)).collect();
    ///
    /// let mut visited = 0;
    /// let found = tree.walk(|k, v| {
    ///     visited += 1;
    ///     if *v > 50 {
    ///         ControlFlow::Break(*k)
    ///     } else {
    ///         ControlFlow::Continue(())
    ///     }
    /// });
    ///
    /// assert_eq!(found, ControlFlow::Break(8));
    /// assert_eq!(visited, 8);
    /// ```
    pub fn walk<B, F>(&self, mut f: F) -> ControlFlow<B>
    where
        F: FnMut(&K, &V) -> ControlFlow<B>,
    {
        match self.root.node() {
            Some(root) => root.walk(&mut f),
            None => ControlFlow::Continue(()),
        }
    }
}

impl<K, V, C> Tree<K, V, C>
where
    C: Comparator<K>,
{
    /// Potentially finds the value associated with the given key in this tree. If no node has the
    /// corresponding key, `None` is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use ostree::avl::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(1, 2);
    ///
    /// assert_eq!(tree.get(&1), Some(&2));
    /// assert_eq!(tree.get(&42), None);
    /// ```
    pub fn get(&self, key: &K) -> Option<&V> {
        self.root.find(key, &self.cmp).map(|n| &n.value)
    }

    /// Like [`Tree::get`] but also returns the stored key.
    pub fn get_key_value(&self, key: &K) -> Option<(&K, &V)> {
        self.root.find(key, &self.cmp).map(|n| (&n.key, &n.value))
    }

    /// A mutable reference to the value associated with the given key.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.root.find_mut(key, &self.cmp).map(|n| &mut n.value)
    }

    /// Whether the tree holds an entry for `key`.
    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// The 1-indexed position of `key` in ascending order, or `None` if the key is absent.
    /// `tree.rank(tree.rank_of(&k)?)` is the value at `k`.
    pub fn rank_of(&self, key: &K) -> Option<usize> {
        self.root.position(key, &self.cmp)
    }

    /// Inserts the given value into the tree stored at the given key. Inserting a new value for an
    /// existing key overwrites the entry in place and returns the old value.
    ///
    /// # Examples
    ///
    /// ```
    /// use ostree::avl::Tree;
    ///
    /// let mut tree = Tree::new();
    ///
    /// assert_eq!(tree.insert(1, 2), None);
    /// assert_eq!(tree.get(&1), Some(&2));
    ///
    /// assert_eq!(tree.insert(1, 3), Some(2));
    /// assert_eq!(tree.get(&1), Some(&3));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.insert_entry(key, value).map(|(_, v)| v)
    }

    /// Like [`Tree::insert`] but the stored key is replaced as well, and the old pair returned.
    pub(crate) fn insert_entry(&mut self, key: K, value: V) -> Option<(K, V)> {
        self.root.insert(key, value, &self.cmp)
    }

    /// Removes the entry for the given key from the tree and returns its value. If the tree does
    /// not contain the key, nothing happens.
    ///
    /// # Examples
    ///
    /// ```
    /// use ostree::avl::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(1, 2);
    ///
    /// assert_eq!(tree.remove(&1), Some(2));
    /// assert_eq!(tree.remove(&1), None);
    /// assert!(tree.is_empty());
    /// ```
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.remove_entry(key).map(|(_, v)| v)
    }

    /// Like [`Tree::remove`] but also returns the stored key.
    pub fn remove_entry(&mut self, key: &K) -> Option<(K, V)> {
        self.root.remove(key, &self.cmp)
    }
}

impl<K, V> FromIterator<(K, V)> for Tree<K, V>
where
    K: Ord,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<K, V, C> Extend<(K, V)> for Tree<K, V, C>
where
    C: Comparator<K>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<'a, K, V, C> IntoIterator for &'a Tree<K, V, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An in-order iterator over the entries of a [`Tree`].
///
/// Holds the path of nodes whose left subtrees are done but which haven't been yielded yet, so it
/// never keeps more than `height` nodes around.
pub struct Iter<'a, K, V> {
    stack: Vec<&'a Node<K, V>>,
    remaining: usize,
}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
            remaining: self.remaining,
        }
    }
}

impl<K, V> fmt::Debug for Iter<'_, K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, K, V> Iter<'a, K, V> {
    fn new(root: &'a Link<K, V>) -> Self {
        let mut iter = Self {
            stack: Vec::with_capacity(root.height()),
            remaining: root.size(),
        };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut link: &'a Link<K, V>) {
        while let Some(node) = link.node() {
            self.stack.push(node);
            link = &node.left;
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(&node.right);
        self.remaining -= 1;
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

/// An in-order iterator over the keys of a [`Tree`].
pub struct Keys<'a, K, V>(Iter<'a, K, V>);

impl<K, V> Clone for Keys<'_, K, V> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<K, V> fmt::Debug for Keys<'_, K, V>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}

impl<K, V> FusedIterator for Keys<'_, K, V> {}

/// An in-order iterator over the values of a [`Tree`].
pub struct Values<'a, K, V>(Iter<'a, K, V>);

impl<K, V> Clone for Values<'_, K, V> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<K, V> fmt::Debug for Values<'_, K, V>
where
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}

impl<K, V> FusedIterator for Values<'_, K, V> {}

/// Asserts the structural invariants of every node in `tree`: ascending keys, exact heights and
/// sizes, and children whose heights differ by at most one.
#[cfg(test)]
pub(crate) fn assert_invariants<K, V, C>(tree: &Tree<K, V, C>)
where
    K: fmt::Debug,
    C: Comparator<K>,
{
    /// Returns the subtree's height and size after checking it.
    fn check<K, V, C>(link: &Link<K, V>, cmp: &C) -> (usize, usize)
    where
        K: fmt::Debug,
        C: Comparator<K>,
    {
        let Some(node) = link.node() else {
            return (0, 0);
        };
        if let Some(left) = node.left.node() {
            assert_eq!(cmp.compare(&left.key, &node.key), std::cmp::Ordering::Less);
        }
        if let Some(right) = node.right.node() {
            assert_eq!(cmp.compare(&right.key, &node.key), std::cmp::Ordering::Greater);
        }
        let (left_height, left_size) = check(&node.left, cmp);
        let (right_height, right_size) = check(&node.right, cmp);

        assert!(
            left_height.abs_diff(right_height) <= 1,
            "unbalanced at {:?}: {} vs {}",
            node.key,
            left_height,
            right_height
        );
        assert_eq!(node.height, left_height.max(right_height) + 1, "height at {:?}", node.key);
        assert_eq!(node.size, left_size + right_size + 1, "size at {:?}", node.key);
        (node.height, node.size)
    }

    check(&tree.root, &tree.cmp);

    let keys: Vec<_> = tree.keys().collect();
    for pair in keys.windows(2) {
        assert_eq!(
            tree.cmp.compare(pair[0], pair[1]),
            std::cmp::Ordering::Less,
            "{:?} not ascending",
            pair
        );
    }
}


#[cfg(test)]
mod quicktests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::test::quick::Op;

    /// Applies a set of operations to a tree and a `BTreeMap`, checking that every answer agrees
    /// and that the tree stays a valid AVL tree after each step.
    fn do_ops<K, V>(ops: &[Op<K, V>], bst: &mut Tree<K, V>, map: &mut BTreeMap<K, V>)
    where
        K: Clone + Ord + std::fmt::Debug,
        V: Clone + PartialEq + std::fmt::Debug,
    {
        for op in ops {
            match op {
                Op::Insert(k, v) => {
                    assert_eq!(bst.insert(k.clone(), v.clone()), map.insert(k.clone(), v.clone()));
                }
                Op::Remove(k) => {
                    assert_eq!(bst.remove(k), map.remove(k));
                }
                Op::Rank(k) => {
                    let k = usize::from(*k);
                    let expected = k.checked_sub(1).and_then(|i| map.iter().nth(i));
                    assert_eq!(bst.rank_entry(k), expected);
                }
                Op::Iter => {
                    assert!(bst.iter().eq(map.iter()));
                }
            }
            assert_invariants(&*bst);
            assert_eq!(bst.len(), map.len());
        }
    }

    quickcheck::quickcheck! {
        fn fuzz_multiple_operations_i8(ops: Vec<Op<i8, i8>>) -> bool {
            let mut tree = Tree::new();
            let mut map = BTreeMap::new();

            do_ops(&ops, &mut tree, &mut map);
            map.keys().all(|key| tree.get(key) == map.get(key))
        }
    }

    quickcheck::quickcheck! {
        fn rank_matches_iteration(xs: Vec<i16>) -> bool {
            let tree: Tree<_, _> = xs.iter().map(|x| (*x, ())).collect();

            tree.iter()
                .enumerate()
                .all(|(i, (k, _))| tree.rank_entry(i + 1) == Some((k, &())) && tree.rank_of(k) == Some(i + 1))
        }
    }

    quickcheck::quickcheck! {
        fn remove_all_in_any_order(xs: Vec<i8>, order: Vec<usize>) -> bool {
            let mut tree: Tree<_, _> = xs.iter().map(|x| (*x, *x)).collect();
            let mut keys: Vec<_> = tree.keys().copied().collect();

            for i in order {
                if keys.is_empty() {
                    break;
                }
                let key = keys.swap_remove(i % keys.len());
                tree.remove(&key);
                assert_invariants(&tree);
            }
            for key in keys {
                tree.remove(&key);
            }
            tree.is_empty() && tree.iter().next().is_none()
        }
    }
}
