//! Stable sorting for client-rendered tables.
//!
//! Every table in the console is sorted locally with the same two pieces:
//! a key comparator built by [`compare`] and the index-decorated
//! [`stable_sort`] that guarantees equal rows keep their input order.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Sort direction carried in the table view state (and the URL query
/// string for deep-linkable views).
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Order {
    Asc,
    Desc,
}

impl Order {
    /// Flip the direction, as clicking an already-sorted column header does.
    pub fn toggled(self) -> Order {
        match self {
            Order::Asc => Order::Desc,
            Order::Desc => Order::Asc,
        }
    }
}

/// Build a comparator ordering rows by the value `key` extracts.
///
/// Descending is the exact negation of ascending; equal keys compare
/// equal. Keys only need `PartialOrd`, incomparable values (NaN) are
/// treated as equal so the sort stays total.
pub fn compare<T, K, F>(order: Order, key: F) -> impl Fn(&T, &T) -> Ordering
where
    K: PartialOrd,
    F: Fn(&T) -> K,
{
    move |a, b| {
        let ord = key(a).partial_cmp(&key(b)).unwrap_or(Ordering::Equal);
        match order {
            Order::Asc => ord,
            Order::Desc => ord.reverse(),
        }
    }
}

/// Sort a copy of `items`, breaking comparator ties by original position.
///
/// Each element is decorated with its input index and the index is used
/// as the tiebreaker, so stability holds no matter what the underlying
/// sort guarantees. The input slice is left untouched.
pub fn stable_sort<T, C>(items: &[T], cmp: C) -> Vec<T>
where
    T: Clone,
    C: Fn(&T, &T) -> Ordering,
{
    let mut decorated: Vec<(usize, &T)> = items.iter().enumerate().collect();
    decorated.sort_unstable_by(|(ia, a), (ib, b)| cmp(a, b).then(ia.cmp(ib)));
    decorated.into_iter().map(|(_, el)| el.clone()).collect()
}
