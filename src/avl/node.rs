//! The owned node graph behind [`Tree`](super::Tree).
//!
//! Every child slot is a [`Link`] that owns its subtree outright. Rotations move boxes from one
//! slot to another, so a node always has exactly one incoming link.

use std::cmp::Ordering;
use std::mem;
use std::ops::ControlFlow;

use crate::compare::Comparator;

/// An optionally present, uniquely owned subtree.
#[derive(Clone)]
pub(super) struct Link<K, V>(pub(super) Option<Box<Node<K, V>>>);

impl<K, V> Default for Link<K, V> {
    fn default() -> Self {
        Self(None)
    }
}

#[derive(Clone)]
pub(super) struct Node<K, V> {
    pub(super) key: K,
    pub(super) value: V,
    pub(super) left: Link<K, V>,
    pub(super) right: Link<K, V>,

    /// How many levels are in the subtree rooted at this node.
    /// A node with no children has a height of 1.
    pub(super) height: usize,
    /// How many nodes are in the subtree rooted at this node, counting itself.
    pub(super) size: usize,
}

impl<K, V> Node<K, V> {
    fn new_boxed(key: K, value: V) -> Box<Self> {
        Box::new(Self {
            key,
            value,
            left: Link(None),
            right: Link(None),
            height: 1,
            size: 1,
        })
    }

    /// Recomputes `height` and `size` from the children. Children must already be up to date.
    fn fix(&mut self) {
        self.height = self.left.height().max(self.right.height()) + 1;
        self.size = self.left.size() + self.right.size() + 1;
    }

    /// `height(left) - height(right)`. Positive means the node leans left.
    ///
    /// See [the Wikipedia page][wiki] for more details.
    ///
    /// [wiki]: https://en.wikipedia.org/wiki/AVL_tree#Balance_factor
    fn balance_factor(&self) -> isize {
        self.left.height() as isize - self.right.height() as isize
    }

    /// Visits the subtree in order, stopping as soon as `f` breaks.
    pub(super) fn walk<B, F>(&self, f: &mut F) -> ControlFlow<B>
    where
        F: FnMut(&K, &V) -> ControlFlow<B>,
    {
        if let Some(left) = self.left.node() {
            left.walk(f)?;
        }
        f(&self.key, &self.value)?;
        match self.right.node() {
            Some(right) => right.walk(f),
            None => ControlFlow::Continue(()),
        }
    }
}

impl<K, V> Link<K, V> {
    pub(super) fn node(&self) -> Option<&Node<K, V>> {
        self.0.as_deref()
    }

    pub(super) fn node_mut(&mut self) -> Option<&mut Node<K, V>> {
        self.0.as_deref_mut()
    }

    pub(super) fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    pub(super) fn height(&self) -> usize {
        self.node().map_or(0, |n| n.height)
    }

    pub(super) fn size(&self) -> usize {
        self.node().map_or(0, |n| n.size)
    }

    fn take(&mut self) -> Self {
        Link(self.0.take())
    }

    /// Finds the node whose key compares equal to `key`.
    pub(super) fn find<C>(&self, key: &K, cmp: &C) -> Option<&Node<K, V>>
    where
        C: Comparator<K>,
    {
        let mut link = self;
        while let Some(node) = link.node() {
            link = match cmp.compare(key, &node.key) {
                Ordering::Less => &node.left,
                Ordering::Equal => return Some(node),
                Ordering::Greater => &node.right,
            };
        }
        None
    }

    pub(super) fn find_mut<C>(&mut self, key: &K, cmp: &C) -> Option<&mut Node<K, V>>
    where
        C: Comparator<K>,
    {
        let mut link = self;
        while let Some(node) = link.node_mut() {
            link = match cmp.compare(key, &node.key) {
                Ordering::Less => &mut node.left,
                Ordering::Equal => return Some(node),
                Ordering::Greater => &mut node.right,
            };
        }
        None
    }

    /// Finds the `k`-th smallest node, 1-indexed.
    pub(super) fn select(&self, mut k: usize) -> Option<&Node<K, V>> {
        if k == 0 || k > self.size() {
            return None;
        }
        let mut node = self.node()?;
        loop {
            let left_size = node.left.size();
            match k.cmp(&(left_size + 1)) {
                Ordering::Equal => return Some(node),
                Ordering::Less => node = node.left.node()?,
                Ordering::Greater => {
                    k -= left_size + 1;
                    node = node.right.node()?;
                }
            }
        }
    }

    /// The 1-indexed position of the node whose key compares equal to `key`.
    pub(super) fn position<C>(&self, key: &K, cmp: &C) -> Option<usize>
    where
        C: Comparator<K>,
    {
        let mut smaller = 0;
        let mut link = self;
        while let Some(node) = link.node() {
            link = match cmp.compare(key, &node.key) {
                Ordering::Less => &node.left,
                Ordering::Equal => return Some(smaller + node.left.size() + 1),
                Ordering::Greater => {
                    smaller += node.left.size() + 1;
                    &node.right
                }
            };
        }
        None
    }

    pub(super) fn leftmost(&self) -> Option<&Node<K, V>> {
        let mut node = self.node()?;
        while let Some(left) = node.left.node() {
            node = left;
        }
        Some(node)
    }

    pub(super) fn rightmost(&self) -> Option<&Node<K, V>> {
        let mut node = self.node()?;
        while let Some(right) = node.right.node() {
            node = right;
        }
        Some(node)
    }

    fn leftmost_mut(&mut self) -> Option<&mut Node<K, V>> {
        let mut node = self.node_mut()?;
        while node.left.node().is_some() {
            node = node.left.node_mut()?;
        }
        Some(node)
    }

    /// Inserts `key` and `value` into this subtree. If a node with an equal key already exists,
    /// its key and value are overwritten in place and the old pair is returned. Nothing is
    /// rebalanced in that case since the shape didn't change.
    pub(super) fn insert<C>(&mut self, key: K, value: V, cmp: &C) -> Option<(K, V)>
    where
        C: Comparator<K>,
    {
        let Some(node) = self.node_mut() else {
            self.0 = Some(Node::new_boxed(key, value));
            return None;
        };

        let replaced = match cmp.compare(&key, &node.key) {
            Ordering::Less => node.left.insert(key, value, cmp),
            Ordering::Equal => {
                let old_key = mem::replace(&mut node.key, key);
                let old_value = mem::replace(&mut node.value, value);
                Some((old_key, old_value))
            }
            Ordering::Greater => node.right.insert(key, value, cmp),
        };

        if replaced.is_none() {
            self.balance();
        }
        replaced
    }

    /// Removes the node whose key compares equal to `key` from this subtree and returns its
    /// contents. Returns `None`, leaving the subtree untouched, if there is no such node.
    pub(super) fn remove<C>(&mut self, key: &K, cmp: &C) -> Option<(K, V)>
    where
        C: Comparator<K>,
    {
        let node = self.node_mut()?;
        let removed = match cmp.compare(key, &node.key) {
            Ordering::Less => node.left.remove(key, cmp)?,
            Ordering::Greater => node.right.remove(key, cmp)?,
            Ordering::Equal if node.left.is_empty() || node.right.is_empty() => {
                // Splice the node out. Whichever child survives is already balanced.
                let mut node = self.0.take()?;
                *self = if node.left.is_empty() {
                    node.right.take()
                } else {
                    node.left.take()
                };
                let Node { key, value, .. } = *node;
                return Some((key, value));
            }
            Ordering::Equal => {
                // Two children: trade contents with the in-order successor so the node that
                // actually leaves the tree has at most one child. The successor's old slot now
                // holds `key`, which is smaller than everything else on the right.
                let successor = node
                    .right
                    .leftmost_mut()
                    .expect("two children => right child");
                mem::swap(&mut node.key, &mut successor.key);
                mem::swap(&mut node.value, &mut successor.value);
                node.right.remove(key, cmp)?
            }
        };

        self.balance();
        Some(removed)
    }

    /// Restores the AVL invariant at this node, assuming both children are valid AVL trees whose
    /// heights differ by at most 2. Always refreshes `height` and `size`.
    ///
    /// See https://en.wikipedia.org/wiki/AVL_tree#Rebalancing for terminology.
    fn balance(&mut self) {
        let Some(root) = self.node_mut() else {
            return;
        };
        root.fix();
        match root.balance_factor() {
            2 => {
                let left = root.left.node().expect("left heavy => left child");
                if left.balance_factor() == -1 {
                    self.rotate_left_right();
                } else {
                    self.rotate_right();
                }
            }
            -2 => {
                let right = root.right.node().expect("right heavy => right child");
                if right.balance_factor() == 1 {
                    self.rotate_right_left();
                } else {
                    self.rotate_left();
                }
            }
            _ => {}
        }

        if cfg!(debug_assertions) {
            let Some(root) = self.node() else {
                return;
            };
            let left_height = root.left.height();
            let right_height = root.right.height();
            assert_eq!(root.height, left_height.max(right_height) + 1);
            assert_eq!(root.size, root.left.size() + root.right.size() + 1);
            assert!(left_height.abs_diff(right_height) <= 1);
        }
    }

    /// Rotate self to the right. This moves the left child up vertically and self down vertically.
    /// Used to rebalance the tree when the left child is too tall.
    ///
    /// ## Panics
    ///
    /// When called on a node without a left child.
    ///
    /// # Diagram
    ///
    /// ```text
    ///        old_root              new_root
    ///         /    \                /    \
    ///    new_root   z    rotate -> x   old_root
    ///     /   \                          /  \
    ///    x     y                        y    z
    /// ```
    fn rotate_right(&mut self) {
        let mut old_root = self.0.take().expect("Cannot rotate empty tree/node.");
        let mut new_root = old_root.left.0.take().expect("Rotate right => left child");

        old_root.left = new_root.right.take();
        old_root.fix();

        new_root.right = Link(Some(old_root));
        new_root.fix();
        self.0 = Some(new_root);
    }

    /// Mirror image of [`Link::rotate_right`].
    ///
    /// ```text
    ///     old_root                    new_root
    ///      /    \                      /    \
    ///     x   new_root   rotate ->  old_root  z
    ///          /   \                 /  \
    ///         y     z               x    y
    /// ```
    fn rotate_left(&mut self) {
        let mut old_root = self.0.take().expect("Cannot rotate empty tree/node.");
        let mut new_root = old_root.right.0.take().expect("Rotate left => right child");

        old_root.right = new_root.left.take();
        old_root.fix();

        new_root.left = Link(Some(old_root));
        new_root.fix();
        self.0 = Some(new_root);
    }

    fn rotate_left_right(&mut self) {
        self.node_mut()
            .expect("Rotating a tree requires a root")
            .left
            .rotate_left();
        self.rotate_right();
    }

    fn rotate_right_left(&mut self) {
        self.node_mut()
            .expect("Rotating a tree requires a root")
            .right
            .rotate_right();
        self.rotate_left();
    }
}
