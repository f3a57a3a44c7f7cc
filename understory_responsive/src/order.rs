// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Breakpoint ordering: ranks breakpoints from narrowest to widest.

use alloc::string::String;
use alloc::vec::Vec;
use core::cmp::Ordering;

use hashbrown::HashMap;

use crate::{BreakpointValue, Breakpoints};

/// Rank of every breakpoint in ascending width order.
///
/// Ranks are 0-based and dense. Numeric breakpoints always rank before inert
/// ones.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OrderMap {
    ranks: HashMap<String, usize>,
}

impl OrderMap {
    /// Returns the rank of `name`, if it is a known breakpoint.
    #[must_use]
    pub fn rank(&self, name: &str) -> Option<usize> {
        self.ranks.get(name).copied()
    }

    /// Number of ranked breakpoints.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    /// Returns `true` if nothing is ranked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }

    /// Iterates `(name, rank)` pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.ranks.iter().map(|(name, rank)| (name.as_str(), *rank))
    }
}

/// Computes the rank of every breakpoint.
///
/// Numeric values sort ascending and before inert values; inert values sort
/// by their raw strings. Equal values keep declaration order, so the entry
/// declared first receives the lower rank.
#[must_use]
pub fn compute_order(breakpoints: &Breakpoints) -> OrderMap {
    let mut sorted: Vec<(&str, &BreakpointValue)> = breakpoints.iter().collect();
    // Stable: ties resolve by declaration order.
    sorted.sort_by(|(_, a), (_, b)| compare_values(a, b));
    OrderMap {
        ranks: sorted
            .into_iter()
            .enumerate()
            .map(|(rank, (name, _))| (name.into(), rank))
            .collect(),
    }
}

fn compare_values(a: &BreakpointValue, b: &BreakpointValue) -> Ordering {
    match (a, b) {
        (BreakpointValue::Width(a), BreakpointValue::Width(b)) => a.total_cmp(b),
        (BreakpointValue::Width(_), BreakpointValue::Inert(_)) => Ordering::Less,
        (BreakpointValue::Inert(_), BreakpointValue::Width(_)) => Ordering::Greater,
        (BreakpointValue::Inert(a), BreakpointValue::Inert(b)) => a.cmp(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranks_follow_ascending_width() {
        let bps: Breakpoints = [("c", 300.0), ("a", 100.0), ("b", 200.0)]
            .into_iter()
            .collect();
        let order = compute_order(&bps);
        assert_eq!(order.rank("a"), Some(0));
        assert_eq!(order.rank("b"), Some(1));
        assert_eq!(order.rank("c"), Some(2));
        assert_eq!(order.rank("d"), None);
    }

    #[test]
    fn numeric_ranks_before_inert() {
        let mut bps = Breakpoints::new();
        bps.insert("x", "foo");
        bps.insert("a", 100.0);
        let order = compute_order(&bps);
        assert_eq!(order.rank("a"), Some(0));
        assert_eq!(order.rank("x"), Some(1));
    }

    #[test]
    fn inert_values_sort_lexically() {
        let mut bps = Breakpoints::new();
        bps.insert("tv", "tv");
        bps.insert("print", "print");
        bps.insert("small", 768.0);
        let order = compute_order(&bps);
        assert_eq!(order.rank("small"), Some(0));
        assert_eq!(order.rank("print"), Some(1));
        assert_eq!(order.rank("tv"), Some(2));
    }

    #[test]
    fn equal_widths_keep_declaration_order() {
        let bps: Breakpoints = [("second", 500.0), ("first", 500.0), ("zero", 0.0)]
            .into_iter()
            .collect();
        let order = compute_order(&bps);
        assert_eq!(order.rank("zero"), Some(0));
        assert_eq!(order.rank("second"), Some(1), "first declared wins the lower rank");
        assert_eq!(order.rank("first"), Some(2));
    }

    #[test]
    fn infinity_ranks_last_among_numeric() {
        let bps = Breakpoints::default().with_infinity("infinity");
        let order = compute_order(&bps);
        assert_eq!(order.len(), 5);
        assert_eq!(order.rank("infinity"), Some(4));
    }
}
