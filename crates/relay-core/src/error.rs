// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Error types for class declaration, construction, and message sends.
//!
//! All errors are programming-contract violations: they are returned to the
//! caller as soon as they are detected and never logged or swallowed here.
//! They integrate with [`miette`] so binaries can render them with codes and
//! help text.

// Spurious warnings from miette derive macro expansion
#![allow(unused_assignments)]

use ecow::EcoString;
use miette::Diagnostic;
use thiserror::Error;

use crate::dispatch::Candidate;

/// A problem with a class's attribute declaration.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum DeclarationError {
    /// The same attribute name appears twice in one declaration.
    #[error("attribute `{name}` is declared more than once on {class}")]
    #[diagnostic(
        code(relay::duplicate_attribute),
        help("remove the repeated name from the attribute list")
    )]
    DuplicateAttribute { class: EcoString, name: EcoString },

    /// The attribute name cannot be used as a reader or selector prefix.
    #[error("`{name}` is not a valid attribute name on {class}")]
    #[diagnostic(
        code(relay::invalid_attribute_name),
        help("attribute names must match [A-Za-z_][A-Za-z0-9_]*")
    )]
    InvalidAttributeName { class: EcoString, name: EcoString },

    /// The class already declared its attributes.
    #[error("{class} already declared its attributes")]
    #[diagnostic(
        code(relay::schema_redeclared),
        help("declare every attribute in a single `attributes` call")
    )]
    SchemaRedeclared { class: EcoString },
}

/// A problem with the keyword arguments passed to a constructor.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum ConstructionError {
    /// One or more declared attributes were not supplied.
    #[error("missing attribute(s) for {class}: {}", join(.names))]
    #[diagnostic(code(relay::missing_attribute))]
    MissingAttribute {
        class: EcoString,
        names: Vec<EcoString>,
    },

    /// One or more supplied names are not declared attributes.
    #[error("unknown attribute(s) for {class}: {}", join(.names))]
    #[diagnostic(code(relay::unknown_attribute))]
    UnknownAttribute {
        class: EcoString,
        names: Vec<EcoString>,
    },

    /// A declared attribute was supplied more than once.
    #[error("attribute `{name}` supplied more than once for {class}")]
    #[diagnostic(code(relay::duplicate_argument))]
    DuplicateArgument { class: EcoString, name: EcoString },
}

/// A failed message send.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum SendError {
    /// No method and no delegation candidate answers the selector.
    #[error("{receiver} does not understand #{selector}")]
    #[diagnostic(code(relay::does_not_understand))]
    DoesNotUnderstand {
        receiver: EcoString,
        selector: EcoString,
    },

    /// More than one attribute could answer the selector.
    #[error("ambiguous method `{selector}`: {}", join(.candidates))]
    #[diagnostic(
        code(relay::ambiguous_method),
        help("send `<attribute>_<method>` to pick one attribute explicitly")
    )]
    AmbiguousMethod {
        selector: EcoString,
        candidates: Vec<Candidate>,
    },

    /// The class never defined the selector it is required to provide.
    #[error("{class}#{selector} is not implemented")]
    #[diagnostic(
        code(relay::not_implemented),
        help("define it with `ClassBuilder::call`")
    )]
    NotImplemented {
        class: EcoString,
        selector: EcoString,
    },

    /// The method was sent the wrong number of arguments.
    #[error("#{selector} expects {expected} argument(s), got {given}")]
    #[diagnostic(code(relay::arity_mismatch))]
    ArityMismatch {
        selector: EcoString,
        expected: EcoString,
        given: usize,
    },

    /// A built-in method rejected one of its arguments.
    #[error("#{selector}: {message}")]
    #[diagnostic(code(relay::wrong_argument))]
    WrongArgument {
        selector: EcoString,
        message: EcoString,
    },

    /// A user-defined method failed.
    #[error("{message}")]
    #[diagnostic(code(relay::failed))]
    Failed { message: EcoString },
}

impl SendError {
    /// Creates a failure with a free-form message, for use inside methods.
    #[must_use]
    pub fn failed(message: impl Into<EcoString>) -> Self {
        Self::Failed {
            message: message.into(),
        }
    }

    /// Returns true if this is the fall-through "does not understand" error.
    #[must_use]
    pub fn is_does_not_understand(&self) -> bool {
        matches!(self, Self::DoesNotUnderstand { .. })
    }
}

/// Any error raised by this crate.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum Error {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Declaration(#[from] DeclarationError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Construction(#[from] ConstructionError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Send(#[from] SendError),
}

/// Result type defaulting to the crate-wide [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;

fn join<T: std::fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
