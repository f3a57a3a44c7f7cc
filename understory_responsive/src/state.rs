// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The responsive state snapshot and caller-supplied extra fields.

use alloc::collections::BTreeMap;
use alloc::string::String;

use crate::{BreakpointFlags, Breakpoints, Orientation};

/// Field names of [`ResponsiveState`] as they appear when serialized.
///
/// A custom extra field with one of these names shadows the core field when
/// the state is serialized, unless [`ExtraFields::apply`] can route it into
/// the typed field.
pub const RESERVED_FIELDS: [&str; 7] = [
    "_responsiveState",
    "mediaType",
    "orientation",
    "lessThan",
    "greaterThan",
    "is",
    "breakpoints",
];

/// Snapshot of which breakpoint the viewport currently falls into.
///
/// Produced by [`ResponsiveReducer`](crate::ResponsiveReducer). Every
/// recalculation builds a new value; the reducer hands it out behind an
/// [`Arc`](alloc::sync::Arc) so consumers can detect changes by pointer.
#[derive(Clone, Debug, PartialEq)]
pub struct ResponsiveState {
    /// Name of the current breakpoint.
    pub media_type: String,
    /// Current orientation, `None` when no evaluator was available.
    pub orientation: Option<Orientation>,
    /// Per breakpoint: the current media type is strictly narrower.
    pub less_than: BreakpointFlags,
    /// Per breakpoint: the current media type is strictly wider.
    pub greater_than: BreakpointFlags,
    /// Per breakpoint: it is the current media type.
    pub is: BreakpointFlags,
    /// The breakpoint configuration, including the infinity tier.
    pub breakpoints: Breakpoints,
    /// Custom fields contributed by [`ExtraFields`].
    ///
    /// A key listed in [`RESERVED_FIELDS`] replaces that core field in
    /// serialized output.
    pub extra: BTreeMap<String, ExtraValue>,
}

impl ResponsiveState {
    /// Shape marker, always `true`.
    ///
    /// Serialized as `_responsiveState` so downstream consumers can recognize
    /// the object.
    #[must_use]
    pub const fn is_responsive_state(&self) -> bool {
        true
    }

    /// Returns `true` if `name` is the current breakpoint.
    #[must_use]
    pub fn is_media(&self, name: &str) -> bool {
        self.is.get(name).unwrap_or(false)
    }

    /// Returns `true` if the current breakpoint is narrower than `name`.
    #[must_use]
    pub fn is_less_than(&self, name: &str) -> bool {
        self.less_than.get(name).unwrap_or(false)
    }

    /// Returns `true` if the current breakpoint is wider than `name`.
    #[must_use]
    pub fn is_greater_than(&self, name: &str) -> bool {
        self.greater_than.get(name).unwrap_or(false)
    }

    /// Returns a custom extra field.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&ExtraValue> {
        self.extra.get(key)
    }
}

/// Value of a custom extra field.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum ExtraValue {
    /// A boolean.
    Bool(bool),
    /// A number.
    Number(f64),
    /// A string.
    Text(String),
}

impl From<bool> for ExtraValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for ExtraValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for ExtraValue {
    fn from(value: &str) -> Self {
        Self::Text(value.into())
    }
}

impl From<String> for ExtraValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Overrides and additions applied on top of a computed [`ResponsiveState`].
///
/// Typed overrides replace the matching state field. Custom fields are added
/// to [`ResponsiveState::extra`]. Whatever is set here always wins over the
/// computed value.
///
/// ```rust
/// use understory_responsive::ExtraFields;
///
/// let extra = ExtraFields::default()
///     .with_media_type("override")
///     .with_field("compact", true);
/// assert_eq!(extra.media_type.as_deref(), Some("override"));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExtraFields {
    /// Replaces [`ResponsiveState::media_type`].
    pub media_type: Option<String>,
    /// Replaces [`ResponsiveState::orientation`].
    pub orientation: Option<Option<Orientation>>,
    /// Replaces [`ResponsiveState::less_than`].
    pub less_than: Option<BreakpointFlags>,
    /// Replaces [`ResponsiveState::greater_than`].
    pub greater_than: Option<BreakpointFlags>,
    /// Replaces [`ResponsiveState::is`].
    pub is: Option<BreakpointFlags>,
    /// Replaces [`ResponsiveState::breakpoints`].
    pub breakpoints: Option<Breakpoints>,
    /// Custom fields, keyed by their serialized name.
    pub custom: BTreeMap<String, ExtraValue>,
}

impl ExtraFields {
    /// Overrides the media type.
    #[must_use]
    pub fn with_media_type(mut self, media_type: impl Into<String>) -> Self {
        self.media_type = Some(media_type.into());
        self
    }

    /// Overrides the orientation.
    #[must_use]
    pub fn with_orientation(mut self, orientation: Option<Orientation>) -> Self {
        self.orientation = Some(orientation);
        self
    }

    /// Overrides the `less_than` map.
    #[must_use]
    pub fn with_less_than(mut self, less_than: BreakpointFlags) -> Self {
        self.less_than = Some(less_than);
        self
    }

    /// Overrides the `greater_than` map.
    #[must_use]
    pub fn with_greater_than(mut self, greater_than: BreakpointFlags) -> Self {
        self.greater_than = Some(greater_than);
        self
    }

    /// Overrides the `is` map.
    #[must_use]
    pub fn with_is(mut self, is: BreakpointFlags) -> Self {
        self.is = Some(is);
        self
    }

    /// Overrides the reported breakpoint set.
    #[must_use]
    pub fn with_breakpoints(mut self, breakpoints: Breakpoints) -> Self {
        self.breakpoints = Some(breakpoints);
        self
    }

    /// Adds a custom field.
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<ExtraValue>) -> Self {
        self.custom.insert(key.into(), value.into());
        self
    }

    /// Returns `true` if applying these fields would change nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.media_type.is_none()
            && self.orientation.is_none()
            && self.less_than.is_none()
            && self.greater_than.is_none()
            && self.is.is_none()
            && self.breakpoints.is_none()
            && self.custom.is_empty()
    }

    /// Applies these fields to `state`.
    ///
    /// Typed overrides are applied first, then custom fields. A custom
    /// `mediaType` text or a custom `orientation` of `"portrait"` or
    /// `"landscape"` is routed into the typed field. Any other custom key in
    /// [`RESERVED_FIELDS`] is kept in [`ResponsiveState::extra`], where it
    /// shadows the core field on serialization.
    pub fn apply(self, state: &mut ResponsiveState) {
        if let Some(media_type) = self.media_type {
            state.media_type = media_type;
        }
        if let Some(orientation) = self.orientation {
            state.orientation = orientation;
        }
        if let Some(less_than) = self.less_than {
            state.less_than = less_than;
        }
        if let Some(greater_than) = self.greater_than {
            state.greater_than = greater_than;
        }
        if let Some(is) = self.is {
            state.is = is;
        }
        if let Some(breakpoints) = self.breakpoints {
            state.breakpoints = breakpoints;
        }
        for (key, value) in self.custom {
            let routed = match (key.as_str(), &value) {
                ("mediaType", ExtraValue::Text(media_type)) => {
                    state.media_type.clone_from(media_type);
                    true
                }
                ("orientation", ExtraValue::Text(name)) => match Orientation::from_name(name) {
                    Some(orientation) => {
                        state.orientation = Some(orientation);
                        true
                    }
                    None => false,
                },
                _ => false,
            };
            if routed {
                state.extra.remove(&key);
                continue;
            }
            if RESERVED_FIELDS.contains(&key.as_str()) {
                tracing::debug!(field = %key, "extra field shadows a state field");
            }
            state.extra.insert(key, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> ResponsiveState {
        let breakpoints = Breakpoints::default().with_infinity("infinity");
        ResponsiveState {
            media_type: "small".into(),
            orientation: Some(Orientation::Portrait),
            less_than: breakpoints.names().map(|n| (n, false)).collect(),
            greater_than: breakpoints.names().map(|n| (n, false)).collect(),
            is: breakpoints.names().map(|n| (n, n == "small")).collect(),
            breakpoints,
            extra: BTreeMap::new(),
        }
    }

    #[test]
    fn typed_overrides_win() {
        let mut state = base();
        ExtraFields::default()
            .with_media_type("override")
            .with_orientation(None)
            .apply(&mut state);
        assert_eq!(state.media_type, "override");
        assert_eq!(state.orientation, None);
        assert!(state.is_media("small"), "untouched fields stay computed");
    }

    #[test]
    fn custom_fields_are_added() {
        let mut state = base();
        ExtraFields::default()
            .with_field("compact", true)
            .with_field("columns", 4.0)
            .apply(&mut state);
        assert_eq!(state.field("compact"), Some(&ExtraValue::Bool(true)));
        assert_eq!(state.field("columns"), Some(&ExtraValue::Number(4.0)));
    }

    #[test]
    fn reserved_custom_keys_route_into_typed_fields() {
        let mut state = base();
        let extra = ExtraFields::default()
            .with_field("mediaType", "custom")
            .with_field("orientation", "landscape");
        assert!(!extra.is_empty());
        extra.apply(&mut state);
        assert_eq!(state.media_type, "custom");
        assert_eq!(state.orientation, Some(Orientation::Landscape));
        assert!(state.extra.is_empty());
    }

    #[test]
    fn unroutable_reserved_keys_are_kept() {
        let mut state = base();
        ExtraFields::default()
            .with_field("breakpoints", "custom")
            .with_field("orientation", "sideways")
            .with_field("mediaType", 3.0)
            .apply(&mut state);
        assert_eq!(state.media_type, "small");
        assert_eq!(state.orientation, Some(Orientation::Portrait));
        assert_eq!(state.field("breakpoints"), Some(&ExtraValue::from("custom")));
        assert_eq!(state.field("orientation"), Some(&ExtraValue::from("sideways")));
        assert_eq!(state.field("mediaType"), Some(&ExtraValue::Number(3.0)));
    }

    #[test]
    fn map_and_breakpoint_overrides_replace_fields() {
        let mut state = base();
        let tiers: Breakpoints = [("compact", 600.0)].into_iter().collect();
        ExtraFields::default()
            .with_less_than([("compact", true)].into_iter().collect())
            .with_greater_than([("compact", false)].into_iter().collect())
            .with_is([("compact", false)].into_iter().collect())
            .with_breakpoints(tiers.clone())
            .apply(&mut state);
        assert_eq!(state.breakpoints, tiers);
        assert!(state.is_less_than("compact"));
        assert_eq!(state.less_than.len(), 1);
        assert_eq!(state.greater_than.get("compact"), Some(false));
        assert!(!state.is_media("small"));
    }

    #[test]
    fn marker_is_always_set() {
        assert!(base().is_responsive_state());
        assert!(ExtraFields::default().is_empty());
    }
}
