use ostree::compare::{Natural, Reversed};
use ostree::set::Set;
use quickcheck_macros::quickcheck;

use std::collections::BTreeSet;
use std::ops::ControlFlow;

#[quickcheck]
fn matches_btreeset(xs: Vec<i8>, removes: Vec<i8>) -> bool {
    let mut set: Set<_> = xs.iter().copied().collect();
    let mut model: BTreeSet<_> = xs.iter().copied().collect();
    for x in &removes {
        if set.remove(x) != model.remove(x) {
            return false;
        }
    }

    set.len() == model.len() && set.iter().eq(model.iter())
}

#[quickcheck]
fn reversed_is_descending(xs: Vec<i8>) -> bool {
    let mut set = Set::with_comparator(Reversed(Natural));
    set.extend(xs.iter().copied());
    let model: BTreeSet<_> = xs.into_iter().collect();

    set.iter().eq(model.iter().rev())
}

#[quickcheck]
fn walk_stops_at_first_break(xs: Vec<u8>, stop: u8) -> bool {
    let set: Set<_> = xs.into_iter().collect();

    let mut visited = Vec::new();
    let result = set.walk(|x| {
        visited.push(*x);
        if *x >= stop {
            ControlFlow::Break(*x)
        } else {
            ControlFlow::Continue(())
        }
    });

    let expected: Vec<_> = set.iter().copied().take_while(|x| *x < stop).collect();
    match result {
        ControlFlow::Break(x) => x >= stop && visited.last() == Some(&x) && visited[..visited.len() - 1] == expected[..],
        ControlFlow::Continue(()) => visited == expected && visited.len() == set.len(),
    }
}

#[quickcheck]
fn remove_all_leaves_empty(xs: Vec<i16>) -> bool {
    let mut set: Set<_> = xs.iter().copied().collect();
    for x in xs.iter().rev() {
        set.remove(x);
    }

    set.is_empty() && set.iter().next().is_none() && set.rank(1).is_none()
}
