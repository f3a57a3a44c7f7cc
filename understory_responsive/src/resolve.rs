// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Media type and orientation resolution over a [`MatchMedia`] evaluator.
//!
//! Both resolvers fold over their queries in a fixed order and let every
//! matching query overwrite the running result, so the **last** match wins.

use core::convert::Infallible;

use crate::MediaQuerySet;

/// Query evaluated to detect portrait orientation.
pub const PORTRAIT_QUERY: &str = "(orientation: portrait)";

/// Query evaluated to detect landscape orientation.
pub const LANDSCAPE_QUERY: &str = "(orientation: landscape)";

/// Something that can test whether a media query currently matches.
///
/// Hosts with a browser-like environment typically forward to `matchMedia`;
/// hosts that only know their window size can use [`Viewport`](crate::Viewport).
/// Any `Fn(&str) -> bool` is an infallible evaluator.
pub trait MatchMedia {
    /// Error reported when a query cannot be evaluated.
    type Error;

    /// Returns whether `query` matches the current environment.
    fn match_media(&self, query: &str) -> Result<bool, Self::Error>;
}

impl<F> MatchMedia for F
where
    F: Fn(&str) -> bool,
{
    type Error = Infallible;

    fn match_media(&self, query: &str) -> Result<bool, Infallible> {
        Ok(self(query))
    }
}

/// Evaluator type for environments without a viewport.
///
/// It has no values; it only names the evaluator type of an
/// [`Action`](crate::Action) that carries none.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoViewport {}

impl MatchMedia for NoViewport {
    type Error = Infallible;

    fn match_media(&self, _query: &str) -> Result<bool, Infallible> {
        match *self {}
    }
}

/// Screen orientation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Orientation {
    /// Height is at least the width.
    Portrait,
    /// Width exceeds the height.
    Landscape,
}

impl Orientation {
    /// Returns `"portrait"` or `"landscape"`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Portrait => "portrait",
            Self::Landscape => "landscape",
        }
    }

    /// Parses `"portrait"` or `"landscape"`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "portrait" => Some(Self::Portrait),
            "landscape" => Some(Self::Landscape),
            _ => None,
        }
    }
}

/// Resolves the name of the breakpoint matching the current environment.
///
/// Without an evaluator this returns `fallback`. Otherwise every query is
/// evaluated in declaration order, starting from `fallback`, and the last one
/// that matches wins. Evaluator errors are returned as-is.
pub fn resolve_media_type<'a, M>(
    match_media: Option<&M>,
    queries: &'a MediaQuerySet,
    fallback: &'a str,
) -> Result<&'a str, M::Error>
where
    M: MatchMedia + ?Sized,
{
    let Some(match_media) = match_media else {
        return Ok(fallback);
    };
    queries
        .iter()
        .try_fold(fallback, |current, (name, query)| -> Result<&'a str, M::Error> {
            Ok(if match_media.match_media(query)? {
                name
            } else {
                current
            })
        })
}

/// Resolves the current orientation.
///
/// Without an evaluator this returns `None`. Otherwise [`PORTRAIT_QUERY`] and
/// then [`LANDSCAPE_QUERY`] are evaluated and the last match wins, so an
/// evaluator that matches both reports [`Orientation::Landscape`].
pub fn resolve_orientation<M>(match_media: Option<&M>) -> Result<Option<Orientation>, M::Error>
where
    M: MatchMedia + ?Sized,
{
    let Some(match_media) = match_media else {
        return Ok(None);
    };
    [
        (PORTRAIT_QUERY, Orientation::Portrait),
        (LANDSCAPE_QUERY, Orientation::Landscape),
    ]
    .into_iter()
    .try_fold(None, |current, (query, orientation)| -> Result<_, M::Error> {
        Ok(if match_media.match_media(query)? {
            Some(orientation)
        } else {
            current
        })
    })
}
