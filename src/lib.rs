//! This crate exposes an order-statistics Binary Search Tree (BST) and an ordered set built on
//! top of it.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored records. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` will typically store
//! some sort of value (the value that was inserted, for example) and will
//! sometimes have child `Node`s. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    key less than its own key.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    key greater than its own key.
//!
//! Searching takes `O(height)`. The trees here are AVL trees: at every `Node` the heights of the
//! two subtrees differ by at most one, which keeps the height at `O(lg N)`.
//!
//! ## Order statistics
//!
//! Each `Node` also records how many `Node`s live in its subtree. That makes it possible to find
//! the k-th smallest entry ([`avl::Tree::rank`]) or the position of a key
//! ([`avl::Tree::rank_of`]) by walking a single root-to-leaf path.
//!
//! ## Ordering
//!
//! Trees are ordered by a [`compare::Comparator`] chosen when the tree is built. It defaults to
//! the key type's [`Ord`] implementation.

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod avl;
pub mod compare;
pub mod set;
