// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The responsive state reducer.
//!
//! [`ResponsiveReducer`] owns everything derived from the breakpoint
//! configuration: the infinity-augmented [`Breakpoints`], the [`OrderMap`],
//! and the [`MediaQuerySet`]. These are computed once in
//! [`ResponsiveReducer::new`] and never change afterward.
//!
//! [`ResponsiveReducer::reduce`] then behaves like a store reducer:
//!
//! - an [`Action`] whose type is [`CALCULATE_RESPONSIVE_STATE`] always
//!   produces a fresh state;
//! - the very first call (no previous state) produces a fresh state whatever
//!   the action type;
//! - any other action returns the previous [`Arc`] untouched, so consumers can
//!   compare with [`Arc::ptr_eq`].
//!
//! ```rust
//! use std::sync::Arc;
//! use understory_responsive::{Action, Breakpoints, ReducerOptions, ResponsiveReducer};
//!
//! let bps: Breakpoints = [("small", 768.0), ("large", 1200.0)].into_iter().collect();
//! let reducer = ResponsiveReducer::new(Some(bps), ReducerOptions::default());
//!
//! let state = reducer.initial_state();
//! assert_eq!(state.media_type, "infinity");
//! assert_eq!(state.orientation, None);
//!
//! // Unrelated actions pass the state through.
//! let next = reducer.reduce(Some(state.clone()), &Action::new("SOMETHING_ELSE")).unwrap();
//! assert!(Arc::ptr_eq(&state, &next));
//!
//! // Recalculating with an evaluator resolves the matching tier.
//! let narrow = |query: &str| query == "(min-width: 0px) and (max-width: 768px)";
//! let next = reducer.reduce(Some(next), &Action::calculate(Some(&narrow))).unwrap();
//! assert_eq!(next.media_type, "small");
//! ```

use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::sync::Arc;
use core::fmt;

use crate::{
    Breakpoints, DEFAULT_INFINITY_KEY, ExtraFields, MatchMedia, MediaQuerySet, NoViewport,
    OrderMap, ResponsiveState, compute_order, greater_than, is, less_than, media_queries,
    resolve_media_type, resolve_orientation,
};

/// Action type that triggers a recalculation.
pub const CALCULATE_RESPONSIVE_STATE: &str = "CALCULATE_RESPONSIVE_STATE";

/// An action delivered to [`ResponsiveReducer::reduce`].
///
/// `M` is the evaluator type; actions without an evaluator use
/// [`NoViewport`].
pub struct Action<'a, M: ?Sized = NoViewport> {
    /// Action type tag.
    pub action_type: &'a str,
    /// Media query evaluator, absent when there is no viewport.
    pub match_media: Option<&'a M>,
}

impl<'a> Action<'a, NoViewport> {
    /// Creates an action of the given type without an evaluator.
    #[must_use]
    pub const fn new(action_type: &'a str) -> Self {
        Self {
            action_type,
            match_media: None,
        }
    }

    /// A recalculation without an evaluator.
    #[must_use]
    pub const fn calculate_headless() -> Self {
        Self::new(CALCULATE_RESPONSIVE_STATE)
    }
}

impl<'a, M: ?Sized> Action<'a, M> {
    /// Creates an action of the given type carrying an evaluator.
    #[must_use]
    pub const fn with_match_media(action_type: &'a str, match_media: &'a M) -> Self {
        Self {
            action_type,
            match_media: Some(match_media),
        }
    }

    /// A recalculation using `match_media`, if any.
    #[must_use]
    pub const fn calculate(match_media: Option<&'a M>) -> Self {
        Self {
            action_type: CALCULATE_RESPONSIVE_STATE,
            match_media,
        }
    }

    /// Returns `true` if this action requests a recalculation.
    #[must_use]
    pub fn is_calculate(&self) -> bool {
        self.action_type == CALCULATE_RESPONSIVE_STATE
    }
}

impl<M: ?Sized> Clone for Action<'_, M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M: ?Sized> Copy for Action<'_, M> {}

impl<M: ?Sized> fmt::Debug for Action<'_, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("action_type", &self.action_type)
            .field("match_media", &self.match_media.is_some())
            .finish()
    }
}

/// Hook computing [`ExtraFields`] from a freshly computed state.
pub type ExtraFieldsFn = dyn Fn(&ResponsiveState) -> ExtraFields + Send + Sync;

/// Construction options for [`ResponsiveReducer`].
pub struct ReducerOptions {
    /// Media type used verbatim for the very first state, bypassing the
    /// evaluator.
    pub initial_media_type: Option<String>,
    /// Name of the synthetic breakpoint wider than all others.
    ///
    /// Also the media type reported when nothing matches or there is no
    /// evaluator. Defaults to [`DEFAULT_INFINITY_KEY`].
    pub infinity: String,
    /// Computes overrides and custom fields for every new state.
    pub extra_fields: Option<Box<ExtraFieldsFn>>,
}

impl ReducerOptions {
    /// Sets [`ReducerOptions::initial_media_type`].
    #[must_use]
    pub fn with_initial_media_type(mut self, media_type: impl Into<String>) -> Self {
        self.initial_media_type = Some(media_type.into());
        self
    }

    /// Sets [`ReducerOptions::infinity`].
    #[must_use]
    pub fn with_infinity(mut self, key: impl Into<String>) -> Self {
        self.infinity = key.into();
        self
    }

    /// Sets [`ReducerOptions::extra_fields`].
    #[must_use]
    pub fn with_extra_fields<F>(mut self, extra_fields: F) -> Self
    where
        F: Fn(&ResponsiveState) -> ExtraFields + Send + Sync + 'static,
    {
        self.extra_fields = Some(Box::new(extra_fields));
        self
    }
}

impl Default for ReducerOptions {
    fn default() -> Self {
        Self {
            initial_media_type: None,
            infinity: DEFAULT_INFINITY_KEY.into(),
            extra_fields: None,
        }
    }
}

impl fmt::Debug for ReducerOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReducerOptions")
            .field("initial_media_type", &self.initial_media_type)
            .field("infinity", &self.infinity)
            .field("extra_fields", &self.extra_fields.is_some())
            .finish()
    }
}

/// Computes [`ResponsiveState`] snapshots for a fixed breakpoint set.
pub struct ResponsiveReducer {
    breakpoints: Breakpoints,
    ordering: OrderMap,
    media_queries: MediaQuerySet,
    options: ReducerOptions,
}

impl ResponsiveReducer {
    /// Creates a reducer for `breakpoints`.
    ///
    /// `None` selects [`Breakpoints::default`]. The configured set is copied
    /// and gains the infinity tier named by [`ReducerOptions::infinity`].
    #[must_use]
    pub fn new(breakpoints: Option<Breakpoints>, options: ReducerOptions) -> Self {
        let breakpoints = breakpoints
            .unwrap_or_default()
            .with_infinity(&options.infinity);
        let ordering = compute_order(&breakpoints);
        let media_queries = media_queries(&breakpoints, &ordering);
        tracing::debug!(
            breakpoints = breakpoints.len(),
            infinity = %options.infinity,
            "responsive reducer configured"
        );
        Self {
            breakpoints,
            ordering,
            media_queries,
            options,
        }
    }

    /// The breakpoint set, including the infinity tier.
    #[must_use]
    pub fn breakpoints(&self) -> &Breakpoints {
        &self.breakpoints
    }

    /// Rank of every breakpoint.
    #[must_use]
    pub fn ordering(&self) -> &OrderMap {
        &self.ordering
    }

    /// The media query for every breakpoint.
    ///
    /// Hosts that listen for media query changes can register these and
    /// dispatch [`CALCULATE_RESPONSIVE_STATE`] when one of them flips.
    #[must_use]
    pub fn media_queries(&self) -> &MediaQuerySet {
        &self.media_queries
    }

    /// Name of the infinity tier.
    #[must_use]
    pub fn infinity(&self) -> &str {
        &self.options.infinity
    }

    /// Applies `action` to `state`.
    ///
    /// Evaluator errors are returned unchanged.
    pub fn reduce<M>(
        &self,
        state: Option<Arc<ResponsiveState>>,
        action: &Action<'_, M>,
    ) -> Result<Arc<ResponsiveState>, M::Error>
    where
        M: MatchMedia + ?Sized,
    {
        match state {
            Some(state) if !action.is_calculate() => {
                tracing::trace!(action = action.action_type, "responsive state unchanged");
                Ok(state)
            }
            state => self
                .compute(state.is_none(), action.match_media)
                .map(Arc::new),
        }
    }

    /// The state produced by the first action when there is no evaluator.
    #[must_use]
    pub fn initial_state(&self) -> Arc<ResponsiveState> {
        match self.reduce(None, &Action::calculate_headless()) {
            Ok(state) => state,
            Err(never) => match never {},
        }
    }

    /// Computes a fresh state.
    ///
    /// `first` selects [`ReducerOptions::initial_media_type`] when it is set.
    pub fn compute<M>(
        &self,
        first: bool,
        match_media: Option<&M>,
    ) -> Result<ResponsiveState, M::Error>
    where
        M: MatchMedia + ?Sized,
    {
        let media_type: String = match (&self.options.initial_media_type, first) {
            (Some(initial), true) => initial.clone(),
            _ => resolve_media_type(match_media, &self.media_queries, &self.options.infinity)?
                .into(),
        };
        let orientation = resolve_orientation(match_media)?;

        let mut state = ResponsiveState {
            less_than: less_than(&media_type, &self.breakpoints, &self.ordering),
            greater_than: greater_than(&media_type, &self.breakpoints, &self.ordering),
            is: is(&media_type, &self.breakpoints),
            media_type,
            orientation,
            breakpoints: self.breakpoints.clone(),
            extra: BTreeMap::new(),
        };
        if let Some(extra_fields) = &self.options.extra_fields {
            extra_fields(&state).apply(&mut state);
        }
        tracing::debug!(
            media_type = %state.media_type,
            orientation = state.orientation.map(|o| o.as_str()),
            "responsive state recalculated"
        );
        Ok(state)
    }
}

impl fmt::Debug for ResponsiveReducer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponsiveReducer")
            .field("breakpoints", &self.breakpoints)
            .field("ordering", &self.ordering)
            .field("media_queries", &self.media_queries)
            .field("options", &self.options)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BreakpointFlags, Orientation, Viewport};
    use alloc::vec::Vec;
    use kurbo::Size;

    fn flags(pairs: &[(&str, bool)]) -> BreakpointFlags {
        pairs.iter().copied().collect()
    }

    fn small_large() -> Breakpoints {
        [("small", 768.0), ("large", 1200.0)].into_iter().collect()
    }

    #[test]
    fn headless_first_state() {
        let reducer = ResponsiveReducer::new(Some(small_large()), ReducerOptions::default());
        let state = reducer.initial_state();
        assert!(state.is_responsive_state());
        assert_eq!(state.media_type, "infinity");
        assert_eq!(state.orientation, None);
        assert_eq!(
            state.is,
            flags(&[("small", false), ("large", false), ("infinity", false)])
        );
        assert_eq!(
            state.less_than,
            flags(&[("small", false), ("large", false), ("infinity", false)])
        );
        assert_eq!(
            state.greater_than,
            flags(&[("small", true), ("large", true), ("infinity", false)])
        );
        assert_eq!(state.breakpoints.len(), 3);
    }

    #[test]
    fn missing_breakpoints_use_defaults() {
        let reducer = ResponsiveReducer::new(None, ReducerOptions::default());
        let names: Vec<_> = reducer.breakpoints().names().collect();
        assert_eq!(
            names,
            ["extraSmall", "small", "medium", "large", "infinity"]
        );
        assert_eq!(reducer.media_queries().len(), 5);
    }

    #[test]
    fn unrelated_actions_keep_identity() {
        let reducer = ResponsiveReducer::new(None, ReducerOptions::default());
        let state = reducer.initial_state();
        let next = reducer
            .reduce(Some(state.clone()), &Action::new("OTHER"))
            .unwrap();
        assert!(Arc::ptr_eq(&state, &next), "pass-through must not reallocate");

        let viewport = Viewport::new(Size::new(600.0, 800.0));
        let passed = reducer
            .reduce(
                Some(next.clone()),
                &Action::with_match_media("OTHER", &viewport),
            )
            .unwrap();
        assert!(Arc::ptr_eq(&next, &passed));
    }

    #[test]
    fn recalculation_allocates_a_new_state() {
        let reducer = ResponsiveReducer::new(None, ReducerOptions::default());
        let state = reducer.initial_state();
        let next = reducer
            .reduce(Some(state.clone()), &Action::calculate_headless())
            .unwrap();
        assert!(!Arc::ptr_eq(&state, &next));
        assert_eq!(*state, *next);
    }

    #[test]
    fn any_action_initializes_missing_state() {
        let reducer = ResponsiveReducer::new(None, ReducerOptions::default());
        let state = reducer.reduce(None, &Action::new("@@INIT")).unwrap();
        assert_eq!(state.media_type, "infinity");
    }

    #[test]
    fn viewport_resolves_tier_and_orientation() {
        let reducer = ResponsiveReducer::new(None, ReducerOptions::default());
        let viewport = Viewport::new(Size::new(600.0, 900.0));
        let state = reducer
            .reduce(None, &Action::calculate(Some(&viewport)))
            .unwrap();
        assert_eq!(state.media_type, "small");
        assert_eq!(state.orientation, Some(Orientation::Portrait));
        assert!(state.is_media("small"));
        assert!(state.is_greater_than("extraSmall"));
        assert!(state.is_less_than("medium"));
        assert!(state.is_less_than("infinity"));
        assert!(!state.is_less_than("small"));
    }

    #[test]
    fn initial_media_type_bypasses_evaluator_once() {
        let options = ReducerOptions::default().with_initial_media_type("large");
        let reducer = ResponsiveReducer::new(None, options);
        let viewport = Viewport::new(Size::new(300.0, 500.0));
        let action = Action::calculate(Some(&viewport));

        let first = reducer.reduce(None, &action).unwrap();
        assert_eq!(first.media_type, "large");
        assert_eq!(
            first.orientation,
            Some(Orientation::Portrait),
            "orientation is still resolved"
        );

        let second = reducer.reduce(Some(first), &action).unwrap();
        assert_eq!(second.media_type, "extraSmall");
    }

    #[test]
    fn custom_infinity_key() {
        let options = ReducerOptions::default().with_infinity("huge");
        let reducer = ResponsiveReducer::new(Some(small_large()), options);
        assert_eq!(reducer.infinity(), "huge");
        assert!(!reducer.breakpoints().contains("infinity"));
        let state = reducer.initial_state();
        assert_eq!(state.media_type, "huge");
        assert_eq!(state.greater_than.get("large"), Some(true));
    }

    #[test]
    fn extra_fields_override_computed_values() {
        let options = ReducerOptions::default().with_extra_fields(|state| {
            ExtraFields::default()
                .with_media_type("override")
                .with_field("wide", state.media_type == "infinity")
        });
        let reducer = ResponsiveReducer::new(None, options);
        let state = reducer.initial_state();
        assert_eq!(state.media_type, "override");
        assert_eq!(state.field("wide"), Some(&crate::ExtraValue::Bool(true)));
        // Maps are computed from the resolved media type, before overrides.
        assert_eq!(state.greater_than.get("large"), Some(true));
    }

    #[test]
    fn evaluator_errors_reach_the_caller() {
        let mut bps = small_large();
        bps.insert("tv", "tv");
        let reducer = ResponsiveReducer::new(Some(bps), ReducerOptions::default());
        let viewport = Viewport::new(Size::new(1000.0, 700.0));
        let result = reducer.reduce(None, &Action::calculate(Some(&viewport)));
        assert_eq!(
            result,
            Err(crate::MediaQueryError::UnknownMediaType("tv".into()))
        );
    }

    #[test]
    fn extra_fields_can_replace_breakpoints() {
        let options = ReducerOptions::default().with_extra_fields(|_| {
            ExtraFields::default().with_breakpoints([("compact", 600.0)].into_iter().collect())
        });
        let reducer = ResponsiveReducer::new(Some(small_large()), options);
        let state = reducer.initial_state();
        assert_eq!(state.breakpoints.names().collect::<Vec<_>>(), ["compact"]);
        // The reducer's own configuration is unaffected.
        assert_eq!(reducer.breakpoints().len(), 3);
        assert_eq!(state.is.len(), 3);
    }

    #[test]
    fn fractional_width_between_ranges_falls_back_to_infinity() {
        let reducer = ResponsiveReducer::new(None, ReducerOptions::default());
        let viewport = Viewport::new(Size::new(768.5, 600.0));
        let state = reducer
            .reduce(None, &Action::calculate(Some(&viewport)))
            .unwrap();
        assert_eq!(state.media_type, "infinity");
        assert!(state.is_greater_than("large"));

        let rounded = Viewport::new(Size::new(768.0, 600.0));
        let state = reducer
            .reduce(Some(state), &Action::calculate(Some(&rounded)))
            .unwrap();
        assert_eq!(state.media_type, "small");
    }
}
