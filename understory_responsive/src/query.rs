// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Media query strings derived from a breakpoint set.
//!
//! Numeric breakpoints become contiguous width ranges: each tier spans from one
//! pixel past the previous tier (in rank order) up to its own width. The
//! narrowest tier starts at `0px` and an infinite width leaves the range open.
//!
//! ```rust
//! use understory_responsive::{Breakpoints, compute_order, media_queries};
//!
//! let bps: Breakpoints = [("small", 768.0), ("large", 1200.0)].into_iter().collect();
//! let bps = bps.with_infinity("infinity");
//! let queries = media_queries(&bps, &compute_order(&bps));
//!
//! assert_eq!(queries.get("small"), Some("(min-width: 0px) and (max-width: 768px)"));
//! assert_eq!(queries.get("large"), Some("(min-width: 769px) and (max-width: 1200px)"));
//! assert_eq!(queries.get("infinity"), Some("(min-width: 1201px)"));
//! ```

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use crate::{BreakpointValue, Breakpoints, OrderMap};

/// One media query per breakpoint, in breakpoint declaration order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MediaQuerySet {
    queries: Vec<(String, String)>,
}

impl MediaQuerySet {
    /// Returns the query for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.queries
            .iter()
            .find_map(|(n, query)| (n == name).then_some(query.as_str()))
    }

    /// Number of queries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.queries.len()
    }

    /// Returns `true` if there are no queries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }

    /// Iterates `(name, query)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.queries
            .iter()
            .map(|(name, query)| (name.as_str(), query.as_str()))
    }
}

/// Builds the media query for every breakpoint.
///
/// Width ranges follow `ordering`; the returned set iterates in the
/// declaration order of `breakpoints`. Inert values are used verbatim.
#[must_use]
pub fn media_queries(breakpoints: &Breakpoints, ordering: &OrderMap) -> MediaQuerySet {
    let mut numeric: Vec<(usize, &str, f64)> = breakpoints
        .iter()
        .filter_map(|(name, value)| {
            let width = value.width()?;
            Some((ordering.rank(name).unwrap_or(usize::MAX), name, width))
        })
        .collect();
    numeric.sort_by_key(|(rank, ..)| *rank);

    let mut ranges: Vec<(&str, String)> = Vec::with_capacity(numeric.len());
    let mut min = 0.0_f64;
    for (_, name, width) in numeric {
        let query = if width.is_finite() {
            format!("(min-width: {min}px) and (max-width: {width}px)")
        } else {
            format!("(min-width: {min}px)")
        };
        ranges.push((name, query));
        min = width + 1.0;
    }

    let queries = breakpoints
        .iter()
        .map(|(name, value)| {
            let query = match value {
                BreakpointValue::Width(_) => ranges
                    .iter()
                    .find_map(|(n, query)| (*n == name).then(|| query.clone()))
                    .unwrap_or_default(),
                BreakpointValue::Inert(raw) => raw.clone(),
            };
            (name.into(), query)
        })
        .collect();
    MediaQuerySet { queries }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute_order;

    fn build(bps: &Breakpoints) -> MediaQuerySet {
        media_queries(bps, &compute_order(bps))
    }

    #[test]
    fn ranges_follow_rank_not_declaration() {
        let bps: Breakpoints = [("large", 1200.0), ("small", 768.0)].into_iter().collect();
        let queries = build(&bps);
        let names: Vec<_> = queries.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["large", "small"], "declaration order is preserved");
        assert_eq!(
            queries.get("small"),
            Some("(min-width: 0px) and (max-width: 768px)")
        );
        assert_eq!(
            queries.get("large"),
            Some("(min-width: 769px) and (max-width: 1200px)")
        );
    }

    #[test]
    fn inert_values_are_raw_queries() {
        let mut bps = Breakpoints::new();
        bps.insert("small", 768.0);
        bps.insert("print", "print");
        let queries = build(&bps);
        assert_eq!(queries.get("print"), Some("print"));
        assert_eq!(queries.len(), 2);
    }

    #[test]
    fn infinity_is_open_ended() {
        let bps = Breakpoints::default().with_infinity("infinity");
        let queries = build(&bps);
        assert_eq!(queries.get("infinity"), Some("(min-width: 1201px)"));
        assert_eq!(
            queries.get("extraSmall"),
            Some("(min-width: 0px) and (max-width: 480px)")
        );
    }

    #[test]
    fn fractional_widths_are_preserved() {
        let bps: Breakpoints = [("a", 100.5), ("b", 200.0)].into_iter().collect();
        let queries = build(&bps);
        assert_eq!(
            queries.get("b"),
            Some("(min-width: 101.5px) and (max-width: 200px)")
        );
    }
}
