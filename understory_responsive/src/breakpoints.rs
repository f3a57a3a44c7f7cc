// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Named breakpoint configuration.

use alloc::string::String;
use smallvec::SmallVec;

/// Name of the synthetic breakpoint wider than every configured breakpoint.
pub const DEFAULT_INFINITY_KEY: &str = "infinity";

/// The four-tier set used when no breakpoints are configured.
pub const DEFAULT_BREAKPOINTS: [(&str, f64); 4] = [
    ("extraSmall", 480.0),
    ("small", 768.0),
    ("medium", 992.0),
    ("large", 1200.0),
];

/// Value attached to a single breakpoint name.
#[derive(Clone, Debug, PartialEq)]
pub enum BreakpointValue {
    /// Upper viewport width of this tier, in logical pixels.
    Width(f64),
    /// A non-numeric value.
    ///
    /// Inert breakpoints never take part in width comparisons and report
    /// `false` in every comparison map. The string is used verbatim as the
    /// media query for this breakpoint (for example `"print"`).
    Inert(String),
}

impl BreakpointValue {
    /// Returns the width for [`BreakpointValue::Width`], `None` otherwise.
    #[must_use]
    pub const fn width(&self) -> Option<f64> {
        match self {
            Self::Width(width) => Some(*width),
            Self::Inert(_) => None,
        }
    }

    /// Returns `true` for [`BreakpointValue::Width`].
    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Self::Width(_))
    }
}

impl From<f64> for BreakpointValue {
    fn from(width: f64) -> Self {
        Self::Width(width)
    }
}

impl From<f32> for BreakpointValue {
    fn from(width: f32) -> Self {
        Self::Width(width.into())
    }
}

impl From<u32> for BreakpointValue {
    fn from(width: u32) -> Self {
        Self::Width(width.into())
    }
}

impl From<&str> for BreakpointValue {
    fn from(value: &str) -> Self {
        Self::Inert(value.into())
    }
}

impl From<String> for BreakpointValue {
    fn from(value: String) -> Self {
        Self::Inert(value)
    }
}

/// An ordered mapping from breakpoint name to [`BreakpointValue`].
///
/// Iteration follows declaration order. Re-inserting an existing name
/// replaces its value without moving it, so the position of a name is the
/// position of its first insertion.
///
/// [`Breakpoints::default`] is the four-tier set in [`DEFAULT_BREAKPOINTS`];
/// use [`Breakpoints::new`] for an empty set.
#[derive(Clone, Debug, PartialEq)]
pub struct Breakpoints {
    entries: SmallVec<[(String, BreakpointValue); 6]>,
}

impl Breakpoints {
    /// Creates an empty breakpoint set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: SmallVec::new(),
        }
    }

    /// Inserts or replaces the value for `name`.
    ///
    /// Returns the previous value if `name` was already present.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        value: impl Into<BreakpointValue>,
    ) -> Option<BreakpointValue> {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => Some(core::mem::replace(slot, value)),
            None => {
                self.entries.push((name, value));
                None
            }
        }
    }

    /// Returns a copy of this set with `key` mapped to an infinite width.
    ///
    /// `self` is left untouched.
    #[must_use]
    pub fn with_infinity(&self, key: &str) -> Self {
        let mut augmented = self.clone();
        augmented.insert(key, f64::INFINITY);
        augmented
    }

    /// Returns the value for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&BreakpointValue> {
        self.entries
            .iter()
            .find_map(|(n, value)| (n == name).then_some(value))
    }

    /// Returns `true` if `name` is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Number of breakpoints.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no breakpoints.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates `(name, value)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BreakpointValue)> + '_ {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Iterates names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(name, _)| name.as_str())
    }
}

impl Default for Breakpoints {
    fn default() -> Self {
        DEFAULT_BREAKPOINTS.into_iter().collect()
    }
}

impl<K, V> FromIterator<(K, V)> for Breakpoints
where
    K: Into<String>,
    V: Into<BreakpointValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut breakpoints = Self::new();
        breakpoints.extend(iter);
        breakpoints
    }
}

impl<K, V> Extend<(K, V)> for Breakpoints
where
    K: Into<String>,
    V: Into<BreakpointValue>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (name, value) in iter {
            self.insert(name, value);
        }
    }
}
