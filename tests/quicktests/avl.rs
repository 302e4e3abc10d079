use ostree::avl::Tree;
use quickcheck_macros::quickcheck;

use std::collections::{BTreeMap, HashSet};

use crate::Op;

/// Applies a set of operations to a tree and a map.
/// This way we can ensure that after a random smattering of inserts
/// and deletes we have the same set of keys in the map.
fn do_ops<K, V>(ops: &[Op<K, V>], bst: &mut Tree<K, V>, map: &mut BTreeMap<K, V>)
where
    K: Clone + Ord,
    V: Clone,
{
    for op in ops {
        match op {
            Op::Insert(k, v) => {
                bst.insert(k.clone(), v.clone());
                map.insert(k.clone(), v.clone());
            }
            Op::Remove(k) => {
                bst.remove(k);
                map.remove(k);
            }
        }
    }
}

#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<i8, i8>>) -> bool {
    let mut tree = Tree::new();
    let mut map = BTreeMap::new();

    do_ops(&ops, &mut tree, &mut map);
    tree.len() == map.len() && tree.iter().eq(map.iter())
}

#[quickcheck]
fn contains(xs: Vec<i8>) -> bool {
    let mut tree = Tree::new();
    for x in &xs {
        tree.insert(*x, *x);
    }

    xs.iter().all(|x| tree.get(x) == Some(x) && tree.contains_key(x))
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let mut tree = Tree::new();
    for x in &xs {
        tree.insert(*x, *x);
    }
    let added: HashSet<_> = xs.into_iter().collect();
    let nots: HashSet<_> = nots.into_iter().collect();
    let mut nots = nots.difference(&added);

    nots.all(|x| tree.get(x).is_none() && tree.rank_of(x).is_none())
}

#[quickcheck]
fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    let mut tree = Tree::new();
    for x in &xs {
        tree.insert(*x, *x);
    }
    for delete in &deletes {
        tree.remove(delete);
    }

    let mut still_present = xs;
    for delete in &deletes {
        // We may have inserted the same value multiple times - delete each one.
        while let Some(pos) = still_present.iter().position(|x| x == delete) {
            still_present.swap_remove(pos);
        }
    }

    deletes.iter().all(|x| tree.get(x).is_none())
        && still_present.iter().all(|x| tree.get(x).is_some())
}

#[quickcheck]
fn last_write_wins(xs: Vec<(u8, u16)>) -> bool {
    let mut tree = Tree::new();
    let mut expected = BTreeMap::new();
    for (k, v) in xs {
        tree.insert(k, v);
        expected.insert(k, v);
    }

    tree.len() == expected.len() && expected.iter().all(|(k, v)| tree.get(k) == Some(v))
}

#[quickcheck]
fn rank_walks_in_order(xs: Vec<i16>, k: usize) -> bool {
    let tree: Tree<_, _> = xs.iter().map(|x| (*x, ())).collect();
    let sorted: Vec<_> = tree.keys().collect();

    let k = k % (tree.len() + 2);
    let expected = k.checked_sub(1).and_then(|i| sorted.get(i).copied());
    tree.rank_entry(k).map(|(key, _)| key) == expected
}

#[quickcheck]
fn iteration_is_strictly_ascending(ops: Vec<Op<i8, ()>>) -> bool {
    let mut tree = Tree::new();
    let mut map = BTreeMap::new();
    do_ops(&ops, &mut tree, &mut map);

    let keys: Vec<_> = tree.keys().collect();
    keys.windows(2).all(|pair| pair[0] < pair[1])
}
