// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_responsive --heading-base-level=0

//! Understory Responsive: breakpoint state for responsive UI.
//!
//! This crate answers "which layout tier is the viewport in?" as a plain data
//! snapshot that a state store can hold and compare. It is renderer-agnostic:
//! it never observes resize events itself. The host decides when to
//! recalculate and supplies something that can evaluate media queries.
//!
//! The core concepts are:
//!
//! - [`Breakpoints`]: named tiers, each either a pixel width
//!   ([`BreakpointValue::Width`]) or an inert value used as a raw media query
//!   ([`BreakpointValue::Inert`]).
//! - [`compute_order`]: ranks tiers from narrowest to widest ([`OrderMap`]).
//! - [`media_queries`]: derives a contiguous width-range query per tier
//!   ([`MediaQuerySet`]).
//! - [`MatchMedia`]: the evaluator seam. Closures `Fn(&str) -> bool`, the
//!   built-in [`Viewport`], or a host binding to a browser's `matchMedia`.
//! - [`resolve_media_type`] and [`resolve_orientation`]: last-match-wins
//!   folds over the evaluator.
//! - [`less_than`], [`greater_than`], [`is`]: per-tier comparison maps
//!   ([`BreakpointFlags`]).
//! - [`ResponsiveReducer`]: ties it all together and turns an [`Action`] plus
//!   the previous [`ResponsiveState`] into the next one.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Size;
//! use understory_responsive::{Action, Breakpoints, ReducerOptions, ResponsiveReducer, Viewport};
//!
//! let breakpoints: Breakpoints = [("small", 768.0), ("large", 1200.0)].into_iter().collect();
//! let reducer = ResponsiveReducer::new(Some(breakpoints), ReducerOptions::default());
//!
//! // Before any viewport is known the state reports the infinity tier.
//! let state = reducer.initial_state();
//! assert_eq!(state.media_type, "infinity");
//!
//! // The host measured its window and asks for a recalculation.
//! let viewport = Viewport::new(Size::new(800.0, 600.0));
//! let state = reducer.reduce(Some(state), &Action::calculate(Some(&viewport))).unwrap();
//! assert_eq!(state.media_type, "large");
//! assert!(state.is_greater_than("small"));
//! assert!(state.is_less_than("infinity"));
//! ```
//!
//! ## Infinity tier
//!
//! The reducer adds one synthetic tier, named `"infinity"` unless
//! [`ReducerOptions::infinity`] says otherwise, whose width is
//! [`f64::INFINITY`]. It is the fallback media type when there is no evaluator
//! or nothing matches. It never reports `true` in [`is`].
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for dependencies such as `kurbo`
//!   and `tracing`.
//! - `libm`: enables `no_std` + `alloc` builds that rely on `libm` for
//!   floating-point math.
//! - `serde`: serializes [`ResponsiveState`] to the camelCase shape used by
//!   store consumers and (de)serializes [`Breakpoints`] from configuration maps.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod breakpoints;
mod flags;
mod order;
mod query;
mod reducer;
mod resolve;
#[cfg(feature = "serde")]
mod serde_impls;
mod state;
mod viewport;

pub use breakpoints::{BreakpointValue, Breakpoints, DEFAULT_BREAKPOINTS, DEFAULT_INFINITY_KEY};
pub use flags::{BreakpointFlags, greater_than, is, less_than};
pub use order::{OrderMap, compute_order};
pub use query::{MediaQuerySet, media_queries};
pub use reducer::{
    Action, CALCULATE_RESPONSIVE_STATE, ExtraFieldsFn, ReducerOptions, ResponsiveReducer,
};
pub use resolve::{
    LANDSCAPE_QUERY, MatchMedia, NoViewport, Orientation, PORTRAIT_QUERY, resolve_media_type,
    resolve_orientation,
};
pub use state::{ExtraFields, ExtraValue, RESERVED_FIELDS, ResponsiveState};
pub use viewport::{MediaKind, MediaQueryError, Viewport};
