// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Driving responsive state from a resizing window.
//!
//! This example shows how a host:
//! - builds a `ResponsiveReducer` once from its breakpoint configuration,
//! - dispatches `CALCULATE_RESPONSIVE_STATE` with a `Viewport` whenever the
//!   window size changes,
//! - passes unrelated actions through and detects changes by pointer.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p understory_demos --example responsive_resize`

use std::sync::Arc;

use kurbo::Size;
use tracing_subscriber::EnvFilter;
use understory_responsive::{
    Action, Breakpoints, ExtraFields, ReducerOptions, ResponsiveReducer, Viewport,
};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Typically loaded from app configuration; the `print` tier is a raw query.
    let breakpoints: Breakpoints = serde_json::from_str(
        r#"{ "phone": 600, "tablet": 1024, "desktop": 1440, "print": "print" }"#,
    )
    .expect("static breakpoint config is valid");

    let options = ReducerOptions::default().with_extra_fields(|state| {
        ExtraFields::default().with_field("compact", !state.is_greater_than("phone"))
    });
    let reducer = ResponsiveReducer::new(Some(breakpoints), options);

    for (name, query) in reducer.media_queries().iter() {
        println!("{name:>8}: {query}");
    }

    let mut state = reducer.initial_state();
    let sizes = [
        Size::new(375.0, 812.0),
        Size::new(800.0, 1280.0),
        Size::new(1366.0, 768.0),
        Size::new(2560.0, 1440.0),
    ];
    for size in sizes {
        let viewport = Viewport::new(size);
        let previous = Arc::clone(&state);
        state = reducer
            .reduce(Some(state), &Action::calculate(Some(&viewport)))
            .expect("generated queries are understood by Viewport");
        println!(
            "{:>6}x{:<6} -> {}",
            size.width,
            size.height,
            serde_json::to_string(&*state).expect("state serializes")
        );

        // A click, a keypress, ...: the state object is shared, not rebuilt.
        let next = reducer
            .reduce(Some(Arc::clone(&state)), &Action::new("POINTER_DOWN"))
            .expect("pass-through never evaluates");
        assert!(Arc::ptr_eq(&state, &next));
        assert!(!Arc::ptr_eq(&previous, &state));
    }
}
