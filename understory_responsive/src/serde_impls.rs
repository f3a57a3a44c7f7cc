// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `serde` support, enabled by the `serde` feature.
//!
//! [`Breakpoints`] round-trips as a map in declaration order: numbers are
//! widths, `null` is an infinite width, and strings are inert values.
//! [`ResponsiveState`] serializes to the camelCase shape store consumers
//! expect, with custom extra fields flattened after the core fields. A custom
//! field named like a core field replaces it.

use alloc::string::String;
use core::fmt;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{BreakpointFlags, BreakpointValue, Breakpoints, RESERVED_FIELDS, ResponsiveState};

impl Serialize for BreakpointValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Width(width) if *width == f64::INFINITY => serializer.serialize_none(),
            Self::Width(width) => serializer.serialize_f64(*width),
            Self::Inert(value) => serializer.serialize_str(value),
        }
    }
}

impl<'de> Deserialize<'de> for BreakpointValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ValueVisitor;

        impl Visitor<'_> for ValueVisitor {
            type Value = BreakpointValue;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a breakpoint width or a media query string")
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                Ok(BreakpointValue::Width(v as f64))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                Ok(BreakpointValue::Width(v as f64))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
                Ok(BreakpointValue::Width(v))
            }

            fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(BreakpointValue::Width(f64::INFINITY))
            }

            fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
                self.visit_unit()
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                Ok(BreakpointValue::Inert(v.into()))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
                Ok(BreakpointValue::Inert(v))
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}

impl Serialize for Breakpoints {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

impl<'de> Deserialize<'de> for Breakpoints {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct BreakpointsVisitor;

        impl<'de> Visitor<'de> for BreakpointsVisitor {
            type Value = Breakpoints;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of breakpoint names to widths")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut breakpoints = Breakpoints::new();
                while let Some((name, value)) = map.next_entry::<String, BreakpointValue>()? {
                    breakpoints.insert(name, value);
                }
                Ok(breakpoints)
            }
        }

        deserializer.deserialize_map(BreakpointsVisitor)
    }
}

impl Serialize for BreakpointFlags {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

impl Serialize for ResponsiveState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let shadowed = RESERVED_FIELDS
            .iter()
            .filter(|key| self.extra.contains_key(**key))
            .count();
        let len = RESERVED_FIELDS.len() - shadowed + self.extra.len();
        let mut map = serializer.serialize_map(Some(len))?;
        core_entry(&mut map, self, "_responsiveState", &self.is_responsive_state())?;
        core_entry(&mut map, self, "mediaType", &self.media_type)?;
        core_entry(&mut map, self, "orientation", &self.orientation)?;
        core_entry(&mut map, self, "lessThan", &self.less_than)?;
        core_entry(&mut map, self, "greaterThan", &self.greater_than)?;
        core_entry(&mut map, self, "is", &self.is)?;
        core_entry(&mut map, self, "breakpoints", &self.breakpoints)?;
        for (key, value) in &self.extra {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Writes a core field unless a custom extra field of the same name replaces it.
fn core_entry<M, T>(
    map: &mut M,
    state: &ResponsiveState,
    key: &'static str,
    value: &T,
) -> Result<(), M::Error>
where
    M: SerializeMap,
    T: Serialize + ?Sized,
{
    if state.extra.contains_key(key) {
        return Ok(());
    }
    map.serialize_entry(key, value)
}
