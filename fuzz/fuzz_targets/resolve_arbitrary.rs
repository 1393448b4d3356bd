// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for dispatch robustness.
//!
//! Feeds arbitrary selectors to an instance whose attributes cover every
//! built-in value kind, and asserts that resolution and sending never panic
//! and that `responds_to` agrees with the outcome of the send.

#![no_main]

use libfuzzer_sys::fuzz_target;
use relay_core::{Arguments, ClassBuilder, OBJECT_SELECTORS, Resolution, SendError, Value};

fuzz_target!(|data: &[u8]| {
    // Selectors are strings; invalid UTF-8 never reaches dispatch
    let Ok(selector) = std::str::from_utf8(data) else {
        return;
    };

    let Ok(builder) = ClassBuilder::new("Fuzz").attributes(["text", "items", "table", "count"])
    else {
        return;
    };
    let class = builder.build();
    let Ok(instance) = class.construct([
        ("text", Value::from("fuzz")),
        ("items", Value::list([Value::from(1), Value::from("two")])),
        ("table", Value::map([("k", Value::symbol("v"))])),
        ("count", Value::from(3)),
    ]) else {
        return;
    };

    let responds = instance.responds_to(selector);
    let resolution = instance.resolve(selector);
    let outcome = instance.send(selector, Arguments::none());

    if OBJECT_SELECTORS.contains(&selector) {
        assert!(responds);
        return;
    }
    if instance.get(selector).is_some() || selector == "call" {
        return;
    }
    match resolution {
        Resolution::NotFound => {
            assert!(!responds);
            assert!(matches!(outcome, Err(SendError::DoesNotUnderstand { .. })));
        }
        Resolution::Ambiguous(_) => {
            assert!(!responds);
            assert!(matches!(outcome, Err(SendError::AmbiguousMethod { .. })));
        }
        Resolution::Resolved(_) => assert!(responds),
    }
});
