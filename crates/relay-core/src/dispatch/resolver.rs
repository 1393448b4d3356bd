// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Narrowing candidates to a single binding.

use super::{Binding, Candidate, generate};
use crate::error::SendError;
use crate::schema::AttributeSchema;
use crate::value::Value;

/// Outcome of resolving one selector against one set of attribute values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Exactly one attribute answers the selector.
    Resolved(Binding),
    /// No attribute answers the selector.
    NotFound,
    /// Several attributes answer the selector, listed in declaration order.
    Ambiguous(Vec<Candidate>),
}

impl Resolution {
    /// Resolves `selector` against `values`, which are in `schema` order.
    #[must_use]
    pub fn resolve(selector: &str, schema: &AttributeSchema, values: &[Value]) -> Self {
        Self::from_candidates(generate(selector, schema, values))
    }

    /// Applies the exactly-one rule to an already generated candidate list.
    #[must_use]
    pub fn from_candidates(mut candidates: Vec<Candidate>) -> Self {
        match candidates.len() {
            0 => Self::NotFound,
            1 => Self::Resolved(candidates.remove(0).into()),
            _ => Self::Ambiguous(candidates),
        }
    }

    #[must_use]
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }

    /// Converts the resolution into the binding to use, or the error the
    /// send should fail with.
    ///
    /// # Errors
    ///
    /// [`SendError::DoesNotUnderstand`] naming `receiver` for `NotFound`,
    /// [`SendError::AmbiguousMethod`] for `Ambiguous`.
    pub fn into_binding(self, receiver: &str, selector: &str) -> Result<Binding, SendError> {
        match self {
            Self::Resolved(binding) => Ok(binding),
            Self::NotFound => Err(SendError::DoesNotUnderstand {
                receiver: receiver.into(),
                selector: selector.into(),
            }),
            Self::Ambiguous(candidates) => Err(SendError::AmbiguousMethod {
                selector: selector.into(),
                candidates,
            }),
        }
    }
}
