// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Subcommand implementations.
//!
//! Each command loads the manifest, builds its instance, and returns the
//! text to print.

pub mod manifest;

use camino::Utf8Path;
use miette::Result;
use relay_core::{Arguments, Instance, OBJECT_SELECTORS, Resolution};
use std::fmt::Write as _;
use tracing::debug;

use manifest::{parse_argument, parse_manifest};

fn load(path: &Utf8Path) -> Result<Instance> {
    debug!(manifest = %path, "loading manifest");
    parse_manifest(path)?.instantiate()
}

/// Validates the manifest and describes the instance it builds.
pub fn check(path: &Utf8Path) -> Result<String> {
    let instance = load(path)?;
    let class = instance.class();
    let mut out = format!(
        "{}: {} attribute(s), bind scope {}\n",
        class.name(),
        class.schema().len(),
        class.config().bind_scope
    );
    for (name, value) in class.schema().iter().zip(instance.values()) {
        let _ = writeln!(out, "  {name} = {value}");
    }
    Ok(out)
}

/// Shows how `selector` would be answered, without binding it.
pub fn resolve(path: &Utf8Path, selector: &str) -> Result<String> {
    let instance = load(path)?;
    if instance.class().find_method(selector).is_some() {
        return Ok(format!("{selector} -> method\n"));
    }
    if instance.get(selector).is_some() {
        return Ok(format!("{selector} -> reader\n"));
    }
    if OBJECT_SELECTORS.contains(&selector) {
        return Ok(format!("{selector} -> object\n"));
    }
    Ok(match instance.resolve(selector) {
        Resolution::Resolved(binding) => format!("{selector} -> {binding}\n"),
        Resolution::NotFound => format!("{selector} -> not found\n"),
        Resolution::Ambiguous(candidates) => {
            let listed: Vec<String> = candidates.iter().map(ToString::to_string).collect();
            format!("{selector} -> ambiguous: {}\n", listed.join(", "))
        }
    })
}

/// Reports `responds_to` for each selector.
pub fn probe(path: &Utf8Path, selectors: &[String]) -> Result<String> {
    let instance = load(path)?;
    let mut out = String::new();
    for selector in selectors {
        let _ = writeln!(out, "{selector}: {}", instance.responds_to(selector));
    }
    Ok(out)
}

/// Sends `selector` with `args` and returns the printed result.
pub fn send(path: &Utf8Path, selector: &str, args: &[String]) -> Result<String> {
    let instance = load(path)?;
    let positional = args
        .iter()
        .map(|arg| parse_argument(arg))
        .collect::<Result<Vec<_>>>()?;
    let result = instance.send(selector, Arguments::new(positional))?;
    Ok(format!("{result}\n"))
}
