// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A [`MatchMedia`] evaluator for hosts that know their viewport size.
//!
//! [`Viewport`] understands the subset of media queries this crate produces,
//! plus what is commonly written by hand for inert breakpoints:
//!
//! - comma-separated query lists (any member matching is a match),
//! - an optional leading `not` or `only`,
//! - the media types `all`, `screen`, and `print`,
//! - `width`, `height` and their `min-`/`max-` forms, with `px`, `em`/`rem`
//!   (16px) lengths or a bare `0`,
//! - `orientation: portrait | landscape`.
//!
//! Anything else is reported as a [`MediaQueryError`].
//!
//! ```rust
//! use kurbo::Size;
//! use understory_responsive::{MatchMedia, Viewport};
//!
//! let viewport = Viewport::new(Size::new(800.0, 600.0));
//! assert_eq!(viewport.match_media("(min-width: 769px) and (max-width: 992px)"), Ok(true));
//! assert_eq!(viewport.match_media("(orientation: portrait)"), Ok(false));
//! assert!(viewport.match_media("(hover: hover)").is_err());
//! ```

use alloc::string::{String, ToString};

use kurbo::Size;

use crate::{MatchMedia, Orientation};

const PX_PER_EM: f64 = 16.0;

/// Media type a [`Viewport`] presents itself as.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum MediaKind {
    /// An interactive screen.
    #[default]
    Screen,
    /// Paged print output.
    Print,
}

/// Errors reported by [`Viewport`] for queries it cannot evaluate.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MediaQueryError {
    /// The query, or one member of a query list, was blank.
    #[error("empty media query")]
    Empty,
    /// A bare word that is not a known media type.
    #[error("unknown media type `{0}`")]
    UnknownMediaType(String),
    /// A media feature this evaluator does not support.
    #[error("unsupported media feature `{0}`")]
    UnsupportedFeature(String),
    /// A length that is not a number followed by `px`, `em` or `rem`.
    #[error("invalid length `{0}`")]
    InvalidLength(String),
    /// An `orientation` value other than `portrait` or `landscape`.
    #[error("invalid orientation `{0}`")]
    InvalidOrientation(String),
    /// Anything that does not parse as a media query.
    #[error("malformed media query `{0}`")]
    Malformed(String),
}

/// A viewport of a given size that answers media queries.
///
/// Widths are compared exactly. The ranges from
/// [`media_queries`](crate::media_queries) start one pixel past the previous
/// tier, so a fractional width such as `768.5` (common under display scaling)
/// matches no finite tier and resolves to the infinity tier. Round the size
/// first if that is not wanted.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Viewport {
    /// Viewport size in logical pixels.
    pub size: Size,
    /// Media type reported by this viewport.
    pub media: MediaKind,
}

impl Viewport {
    /// Creates a screen viewport of the given size.
    #[must_use]
    pub const fn new(size: Size) -> Self {
        Self {
            size,
            media: MediaKind::Screen,
        }
    }

    /// Returns this viewport with a different media type.
    #[must_use]
    pub const fn with_media(mut self, media: MediaKind) -> Self {
        self.media = media;
        self
    }

    /// Orientation following CSS: portrait when height is at least the width.
    #[must_use]
    pub fn orientation(&self) -> Orientation {
        if self.size.height >= self.size.width {
            Orientation::Portrait
        } else {
            Orientation::Landscape
        }
    }

    /// Evaluates a media query list against this viewport.
    ///
    /// Every member of the list is parsed, so an unsupported member is an
    /// error even if an earlier one matched.
    pub fn evaluate(&self, query: &str) -> Result<bool, MediaQueryError> {
        let mut matched = false;
        for member in query.split(',') {
            matched |= self.evaluate_one(member.trim())?;
        }
        Ok(matched)
    }

    fn evaluate_one(&self, query: &str) -> Result<bool, MediaQueryError> {
        if query.is_empty() {
            return Err(MediaQueryError::Empty);
        }
        let (negated, rest) = match split_keyword(query) {
            ("not", rest) => (true, rest),
            ("only", rest) => (false, rest),
            _ => (false, query),
        };
        if rest.is_empty() {
            return Err(MediaQueryError::Malformed(query.to_string()));
        }

        let mut matched = true;
        let mut remaining = rest;
        loop {
            let (term, tail) = next_term(remaining, query)?;
            matched &= self.evaluate_term(term)?;
            let tail = tail.trim_start();
            if tail.is_empty() {
                break;
            }
            match split_keyword(tail) {
                ("and", after) if !after.is_empty() => remaining = after,
                _ => return Err(MediaQueryError::Malformed(query.to_string())),
            }
        }
        Ok(matched != negated)
    }

    fn evaluate_term(&self, term: &str) -> Result<bool, MediaQueryError> {
        let Some(inner) = term.strip_prefix('(').and_then(|t| t.strip_suffix(')')) else {
            return match term.to_ascii_lowercase().as_str() {
                "all" => Ok(true),
                "screen" => Ok(self.media == MediaKind::Screen),
                "print" => Ok(self.media == MediaKind::Print),
                _ => Err(MediaQueryError::UnknownMediaType(term.to_string())),
            };
        };
        let (feature, value) = match inner.split_once(':') {
            Some((feature, value)) => (feature.trim(), Some(value.trim())),
            None => (inner.trim(), None),
        };
        let feature = feature.to_ascii_lowercase();
        let Size { width, height } = self.size;
        match (feature.as_str(), value) {
            ("width", Some(v)) => Ok(width == parse_length(v)?),
            ("min-width", Some(v)) => Ok(width >= parse_length(v)?),
            ("max-width", Some(v)) => Ok(width <= parse_length(v)?),
            ("height", Some(v)) => Ok(height == parse_length(v)?),
            ("min-height", Some(v)) => Ok(height >= parse_length(v)?),
            ("max-height", Some(v)) => Ok(height <= parse_length(v)?),
            ("width", None) => Ok(width > 0.0),
            ("height", None) => Ok(height > 0.0),
            ("orientation", Some(v)) => match v.to_ascii_lowercase().as_str() {
                "portrait" => Ok(self.orientation() == Orientation::Portrait),
                "landscape" => Ok(self.orientation() == Orientation::Landscape),
                _ => Err(MediaQueryError::InvalidOrientation(v.to_string())),
            },
            ("orientation", None) => Ok(true),
            _ => Err(MediaQueryError::UnsupportedFeature(feature)),
        }
    }
}

impl MatchMedia for Viewport {
    type Error = MediaQueryError;

    fn match_media(&self, query: &str) -> Result<bool, MediaQueryError> {
        self.evaluate(query)
    }
}

/// Splits off the leading bare word and trims what follows.
fn split_keyword(input: &str) -> (&str, &str) {
    match input.find(|c: char| c.is_whitespace() || c == '(') {
        Some(end) => (&input[..end], input[end..].trim_start()),
        None => (input, ""),
    }
}

/// Splits off one term: a parenthesized feature or a bare media type.
fn next_term<'a>(input: &'a str, query: &str) -> Result<(&'a str, &'a str), MediaQueryError> {
    if input.starts_with('(') {
        let close = input
            .find(')')
            .ok_or_else(|| MediaQueryError::Malformed(query.to_string()))?;
        Ok(input.split_at(close + 1))
    } else {
        let (word, _) = split_keyword(input);
        if word.is_empty() {
            return Err(MediaQueryError::Malformed(query.to_string()));
        }
        Ok(input.split_at(word.len()))
    }
}

fn parse_length(value: &str) -> Result<f64, MediaQueryError> {
    let invalid = || MediaQueryError::InvalidLength(value.to_string());
    let (number, scale) = if let Some(n) = value.strip_suffix("px") {
        (n, 1.0)
    } else if let Some(n) = value.strip_suffix("rem") {
        (n, PX_PER_EM)
    } else if let Some(n) = value.strip_suffix("em") {
        (n, PX_PER_EM)
    } else if value == "0" {
        (value, 1.0)
    } else {
        return Err(invalid());
    };
    let number: f64 = number.trim().parse().map_err(|_| invalid())?;
    if number.is_finite() {
        Ok(number * scale)
    } else {
        Err(invalid())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn landscape() -> Viewport {
        Viewport::new(Size::new(1024.0, 768.0))
    }

    #[test]
    fn width_ranges() {
        let vp = landscape();
        assert_eq!(vp.evaluate("(min-width: 993px) and (max-width: 1200px)"), Ok(true));
        assert_eq!(vp.evaluate("(min-width: 0px) and (max-width: 768px)"), Ok(false));
        assert_eq!(vp.evaluate("(min-width: 1201px)"), Ok(false));
        assert_eq!(vp.evaluate("(max-width: 64em)"), Ok(true));
        assert_eq!(vp.evaluate("(min-height: 0)"), Ok(true));
    }

    #[test]
    fn media_types_and_negation() {
        let vp = landscape();
        assert_eq!(vp.evaluate("screen"), Ok(true));
        assert_eq!(vp.evaluate("print"), Ok(false));
        assert_eq!(vp.evaluate("only screen and (min-width: 1000px)"), Ok(true));
        assert_eq!(vp.evaluate("not print"), Ok(true));
        let paper = vp.with_media(MediaKind::Print);
        assert_eq!(paper.evaluate("print"), Ok(true));
        assert_eq!(paper.evaluate("screen, print"), Ok(true));
    }

    #[test]
    fn orientation_follows_aspect() {
        let vp = landscape();
        assert_eq!(vp.orientation(), Orientation::Landscape);
        assert_eq!(vp.evaluate("(orientation: landscape)"), Ok(true));
        let square = Viewport::new(Size::new(500.0, 500.0));
        assert_eq!(square.orientation(), Orientation::Portrait);
        assert_eq!(square.evaluate("(orientation: portrait)"), Ok(true));
    }

    #[test]
    fn unsupported_queries_are_errors() {
        let vp = landscape();
        assert_eq!(vp.evaluate(""), Err(MediaQueryError::Empty));
        assert_eq!(vp.evaluate("screen,"), Err(MediaQueryError::Empty));
        assert_eq!(
            vp.evaluate("tv"),
            Err(MediaQueryError::UnknownMediaType("tv".into()))
        );
        assert_eq!(
            vp.evaluate("(hover: hover)"),
            Err(MediaQueryError::UnsupportedFeature("hover".into()))
        );
        assert_eq!(
            vp.evaluate("(min-width: wide)"),
            Err(MediaQueryError::InvalidLength("wide".into()))
        );
        assert_eq!(
            vp.evaluate("(orientation: sideways)"),
            Err(MediaQueryError::InvalidOrientation("sideways".into()))
        );
        assert!(matches!(
            vp.evaluate("(min-width: 10px"),
            Err(MediaQueryError::Malformed(_))
        ));
        assert!(matches!(
            vp.evaluate("screen or print"),
            Err(MediaQueryError::Malformed(_))
        ));
    }
}
