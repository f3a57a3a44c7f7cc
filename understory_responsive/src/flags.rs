// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Derived comparison maps: `less_than`, `greater_than`, and `is`.
//!
//! Each map holds one entry per breakpoint, in declaration order, comparing
//! that breakpoint against the current media type. Inert breakpoints are
//! `false` in every map.
//!
//! ## Rank zero
//!
//! [`less_than`] treats a current media type with rank `0` as if it had no
//! rank at all, so when the narrowest tier is current every `less_than` entry
//! is `false`. [`greater_than`] has no such guard.
//!
//! ```rust
//! use understory_responsive::{Breakpoints, compute_order, greater_than, less_than};
//!
//! let bps: Breakpoints = [("small", 768.0), ("large", 1200.0)].into_iter().collect();
//! let order = compute_order(&bps);
//!
//! assert_eq!(less_than("small", &bps, &order).get("large"), Some(false));
//! assert_eq!(greater_than("large", &bps, &order).get("small"), Some(true));
//! ```

use alloc::string::String;
use smallvec::SmallVec;

use crate::{BreakpointValue, Breakpoints, OrderMap};

/// A name → `bool` map with one entry per breakpoint.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BreakpointFlags {
    flags: SmallVec<[(String, bool); 6]>,
}

impl BreakpointFlags {
    /// Returns the flag for `name`, or `None` if `name` is not a breakpoint.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<bool> {
        self.flags
            .iter()
            .find_map(|(n, flag)| (n == name).then_some(*flag))
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    /// Returns `true` if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// Iterates `(name, flag)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> + '_ {
        self.flags.iter().map(|(name, flag)| (name.as_str(), *flag))
    }

    /// Names whose flag is set, in declaration order.
    pub fn set_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.iter().filter_map(|(name, flag)| flag.then_some(name))
    }
}

impl<K: Into<String>> FromIterator<(K, bool)> for BreakpointFlags {
    fn from_iter<I: IntoIterator<Item = (K, bool)>>(iter: I) -> Self {
        Self {
            flags: iter
                .into_iter()
                .map(|(name, flag)| (name.into(), flag))
                .collect(),
        }
    }
}

/// For every breakpoint: is `current` strictly narrower than it?
///
/// An entry is `true` iff it is numeric, `current` has a non-zero rank, and
/// that rank is below the entry's rank.
#[must_use]
pub fn less_than(
    current: &str,
    breakpoints: &Breakpoints,
    ordering: &OrderMap,
) -> BreakpointFlags {
    // Rank 0 counts as absent.
    let current_rank = ordering.rank(current).filter(|&rank| rank != 0);
    breakpoints
        .iter()
        .map(|(name, value)| {
            let flag = match (value, current_rank, ordering.rank(name)) {
                (BreakpointValue::Width(_), Some(current), Some(rank)) => current < rank,
                _ => false,
            };
            (name, flag)
        })
        .collect()
}

/// For every breakpoint: is `current` strictly wider than it?
///
/// An entry is `true` iff it is numeric and the rank of `current` exceeds the
/// entry's rank. An unknown `current` yields all `false`.
#[must_use]
pub fn greater_than(
    current: &str,
    breakpoints: &Breakpoints,
    ordering: &OrderMap,
) -> BreakpointFlags {
    let current_rank = ordering.rank(current);
    breakpoints
        .iter()
        .map(|(name, value)| {
            let flag = match (value, current_rank, ordering.rank(name)) {
                (BreakpointValue::Width(_), Some(current), Some(rank)) => current > rank,
                _ => false,
            };
            (name, flag)
        })
        .collect()
}

/// For every breakpoint: is it `current`?
///
/// Only numeric entries with a non-zero, finite width can be `true`, which
/// keeps the open-ended infinity tier out of identity checks.
#[must_use]
pub fn is(current: &str, breakpoints: &Breakpoints) -> BreakpointFlags {
    breakpoints
        .iter()
        .map(|(name, value)| {
            let flag = match value {
                BreakpointValue::Width(width) if *width != 0.0 && width.is_finite() => {
                    name == current
                }
                BreakpointValue::Width(_) | BreakpointValue::Inert(_) => false,
            };
            (name, flag)
        })
        .collect()
}
