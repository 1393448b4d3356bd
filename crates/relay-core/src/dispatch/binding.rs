// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Forwarding bindings and the table that stores them.

use super::Candidate;
use crate::error::SendError;
use crate::value::{Arguments, Value};
use ecow::EcoString;
use std::collections::HashMap;
use std::fmt;
use std::sync::{PoisonError, RwLock};
use tracing::debug;

/// How a forwarded send passes its arguments on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallShape {
    /// Target ends with `=`: exactly one argument, no block.
    Setter,
    /// Any arguments and an optional block, passed through unchanged.
    Variadic,
}

impl CallShape {
    /// The shape used to forward to `target`.
    #[must_use]
    pub fn for_target(target: &str) -> Self {
        if target.ends_with('=') {
            Self::Setter
        } else {
            Self::Variadic
        }
    }
}

/// A resolved delegation: sends of one selector go to `target` on the
/// attribute at `index`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub attribute: EcoString,
    pub index: usize,
    pub target: EcoString,
    pub shape: CallShape,
}

impl Binding {
    /// Forwards a send to the bound attribute value.
    ///
    /// # Errors
    ///
    /// Returns [`SendError::ArityMismatch`] when a setter is not given
    /// exactly one argument, and otherwise whatever the target raises.
    pub fn forward(
        &self,
        values: &[Value],
        selector: &str,
        args: Arguments,
    ) -> Result<Value, SendError> {
        let Some(receiver) = values.get(self.index) else {
            return Err(SendError::DoesNotUnderstand {
                receiver: self.attribute.clone(),
                selector: selector.into(),
            });
        };
        match self.shape {
            CallShape::Setter => {
                args.expect_arity(selector, 1)?;
                receiver.send(&self.target, Arguments::new(args.positional))
            }
            CallShape::Variadic => receiver.send(&self.target, args),
        }
    }
}

impl From<Candidate> for Binding {
    fn from(candidate: Candidate) -> Self {
        Self {
            shape: CallShape::for_target(&candidate.target),
            attribute: candidate.attribute,
            index: candidate.index,
            target: candidate.target,
        }
    }
}

impl fmt::Display for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.attribute, self.target)
    }
}

/// Selector → binding map shared by every reader of a class or instance.
///
/// Entries are insert-only. The first binding installed for a selector wins;
/// later installs of the same selector return the existing entry.
#[derive(Default)]
pub struct ForwardingTable {
    entries: RwLock<HashMap<EcoString, Binding>>,
}

impl ForwardingTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The binding for `selector`, if one was installed.
    #[must_use]
    pub fn get(&self, selector: &str) -> Option<Binding> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(selector)
            .cloned()
    }

    /// Installs `binding` unless `selector` is already bound, and returns the
    /// binding that is in the table afterwards.
    pub fn install(&self, selector: &str, binding: Binding) -> Binding {
        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(existing) = entries.get(selector) {
            debug!(selector, binding = %existing, "selector already bound");
            return existing.clone();
        }
        debug!(selector, binding = %binding, "installed forwarding binding");
        entries.insert(selector.into(), binding.clone());
        binding
    }

    #[must_use]
    pub fn contains(&self, selector: &str) -> bool {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(selector)
    }

    /// Bound selectors, sorted.
    #[must_use]
    pub fn selectors(&self) -> Vec<EcoString> {
        let mut selectors: Vec<EcoString> = self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        selectors.sort();
        selectors
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for ForwardingTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ForwardingTable")
            .field("selectors", &self.selectors())
            .finish()
    }
}
