// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Attribute declarations.
//!
//! A class declares its attributes once, as an ordered list of unique
//! identifiers. The order is significant: constructor errors and ambiguity
//! diagnostics list attributes in declaration order.

use crate::error::DeclarationError;
use ecow::EcoString;

/// The ordered attribute names declared by one class.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeSchema {
    names: Vec<EcoString>,
}

impl AttributeSchema {
    /// A schema with no attributes, the starting point of every class.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Validates and records an attribute declaration for `class`.
    ///
    /// # Errors
    ///
    /// Returns [`DeclarationError::InvalidAttributeName`] for a name that is
    /// not an identifier and [`DeclarationError::DuplicateAttribute`] for a
    /// repeated name.
    pub fn declare<I, S>(class: &str, names: I) -> Result<Self, DeclarationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<EcoString>,
    {
        let mut declared: Vec<EcoString> = Vec::new();
        for name in names {
            let name = name.into();
            if !is_identifier(&name) {
                return Err(DeclarationError::InvalidAttributeName {
                    class: class.into(),
                    name,
                });
            }
            if declared.contains(&name) {
                return Err(DeclarationError::DuplicateAttribute {
                    class: class.into(),
                    name,
                });
            }
            declared.push(name);
        }
        Ok(Self { names: declared })
    }

    /// Iterates attribute names in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &EcoString> {
        self.names.iter()
    }

    /// Position of `name` in the declaration, if declared.
    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n.as_str() == name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// `[A-Za-z_][A-Za-z0-9_]*`
fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
