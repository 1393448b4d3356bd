// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Dynamic values and the receiver protocol.
//!
//! Attribute values are arbitrary objects. Delegation needs to ask a value
//! whether it answers a selector *before* sending it, so every value exposes
//! an explicit capability query:
//!
//! - built-in values (`nil`, booleans, integers, strings, symbols, lists,
//!   maps, blocks) answer from the static method tables in [`builtins`];
//! - user-defined objects implement [`Receiver`] and are wrapped in
//!   [`Value::Object`].

pub(crate) mod builtins;

use crate::error::SendError;
use ecow::{EcoString, EcoVec};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// An object that can be queried for and sent messages.
pub trait Receiver: fmt::Debug + Send + Sync {
    /// Class name used in diagnostics and by `class`.
    fn class_name(&self) -> EcoString;

    /// Every selector this receiver answers.
    fn selectors(&self) -> Vec<EcoString>;

    /// Returns true if `selector` can be sent without a
    /// "does not understand" failure.
    fn responds_to(&self, selector: &str) -> bool {
        self.selectors().iter().any(|s| s.as_str() == selector)
    }

    /// Sends `selector` with `args`.
    ///
    /// # Errors
    ///
    /// Returns [`SendError::DoesNotUnderstand`] for unknown selectors, or any
    /// error the method itself raises.
    fn send(&self, selector: &str, args: Arguments) -> Result<Value, SendError>;
}

/// A callable passed alongside message arguments.
#[derive(Clone)]
pub struct Block(Arc<dyn Fn(&[Value]) -> Result<Value, SendError> + Send + Sync>);

impl Block {
    /// Wraps a closure as a block.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value, SendError> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Invokes the block.
    ///
    /// # Errors
    ///
    /// Returns whatever error the block raises.
    pub fn call(&self, args: &[Value]) -> Result<Value, SendError> {
        (self.0)(args)
    }
}

impl fmt::Debug for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Block")
    }
}

impl PartialEq for Block {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// Arguments of a message send: positional values plus an optional block.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arguments {
    pub positional: Vec<Value>,
    pub block: Option<Block>,
}

impl Arguments {
    /// No arguments and no block.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Positional arguments without a block.
    #[must_use]
    pub fn new(positional: Vec<Value>) -> Self {
        Self {
            positional,
            block: None,
        }
    }

    /// Attaches a trailing block.
    #[must_use]
    pub fn with_block(mut self, block: Block) -> Self {
        self.block = Some(block);
        self
    }

    /// Number of positional arguments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positional.len()
    }

    /// Returns true if there are no positional arguments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positional.is_empty()
    }

    /// Fails unless exactly `expected` positional arguments were given.
    ///
    /// # Errors
    ///
    /// Returns [`SendError::ArityMismatch`] on a count mismatch.
    pub fn expect_arity(&self, selector: &str, expected: usize) -> Result<(), SendError> {
        if self.len() == expected {
            Ok(())
        } else {
            Err(SendError::ArityMismatch {
                selector: selector.into(),
                expected: ecow::eco_format!("{expected}"),
                given: self.len(),
            })
        }
    }

    /// Fails unless between `min` and `max` positional arguments were given.
    ///
    /// # Errors
    ///
    /// Returns [`SendError::ArityMismatch`] when the count is out of range.
    pub fn expect_arity_between(
        &self,
        selector: &str,
        min: usize,
        max: usize,
    ) -> Result<(), SendError> {
        if (min..=max).contains(&self.len()) {
            Ok(())
        } else {
            Err(SendError::ArityMismatch {
                selector: selector.into(),
                expected: ecow::eco_format!("{min}..={max}"),
                given: self.len(),
            })
        }
    }
}

impl From<Vec<Value>> for Arguments {
    fn from(positional: Vec<Value>) -> Self {
        Self::new(positional)
    }
}

/// A dynamically typed value.
#[derive(Debug, Clone)]
pub enum Value {
    Nil,
    Bool(bool),
    Integer(i64),
    String(EcoString),
    Symbol(EcoString),
    List(EcoVec<Value>),
    Map(Arc<BTreeMap<EcoString, Value>>),
    Block(Block),
    Object(Arc<dyn Receiver>),
}

impl Value {
    /// Builds a list value.
    pub fn list(items: impl IntoIterator<Item = Value>) -> Self {
        Self::List(items.into_iter().collect())
    }

    /// Builds a map value.
    pub fn map<K: Into<EcoString>>(entries: impl IntoIterator<Item = (K, Value)>) -> Self {
        Self::Map(Arc::new(
            entries.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        ))
    }

    /// Builds a symbol value.
    pub fn symbol(name: impl Into<EcoString>) -> Self {
        Self::Symbol(name.into())
    }

    /// Wraps a user-defined receiver.
    pub fn object(receiver: impl Receiver + 'static) -> Self {
        Self::Object(Arc::new(receiver))
    }

    /// The class name of this value.
    #[must_use]
    pub fn class_name(&self) -> EcoString {
        match self {
            Self::Object(receiver) => receiver.class_name(),
            _ => builtins::class_name(self).into(),
        }
    }

    /// Every selector this value answers.
    #[must_use]
    pub fn selectors(&self) -> Vec<EcoString> {
        match self {
            Self::Object(receiver) => receiver.selectors(),
            _ => builtins::selectors(self).map(EcoString::from).collect(),
        }
    }

    /// Returns true if this value answers `selector`.
    #[must_use]
    pub fn responds_to(&self, selector: &str) -> bool {
        match self {
            Self::Object(receiver) => receiver.responds_to(selector),
            _ => builtins::responds_to(self, selector),
        }
    }

    /// Sends `selector` to this value.
    ///
    /// # Errors
    ///
    /// Returns [`SendError::DoesNotUnderstand`] for unknown selectors, or the
    /// error raised by the method.
    pub fn send(&self, selector: &str, args: Arguments) -> Result<Value, SendError> {
        match self {
            Self::Object(receiver) => receiver.send(selector, args),
            _ => builtins::send(self, selector, args),
        }
    }

    /// `nil` and `false` are falsy, everything else is truthy.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Self::Nil | Self::Bool(false))
    }

    /// Text form: strings and symbols unquoted, everything else as printed.
    #[must_use]
    pub fn to_text(&self) -> EcoString {
        match self {
            Self::String(s) | Self::Symbol(s) => s.clone(),
            other => ecow::eco_format!("{other}"),
        }
    }

    /// Returns the string contents if this is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Returns the integer if this is an integer.
    #[must_use]
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(*n),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Nil, Self::Nil) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::String(a), Self::String(b)) | (Self::Symbol(a), Self::Symbol(b)) => a == b,
            (Self::List(a), Self::List(b)) => a == b,
            (Self::Map(a), Self::Map(b)) => a == b,
            (Self::Block(a), Self::Block(b)) => a == b,
            (Self::Object(a), Self::Object(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nil => f.write_str("nil"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Integer(n) => write!(f, "{n}"),
            Self::String(s) => write!(f, "{:?}", s.as_str()),
            Self::Symbol(s) => write!(f, ":{s}"),
            Self::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Self::Map(entries) => {
                f.write_str("{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{:?} => {value}", key.as_str())?;
                }
                f.write_str("}")
            }
            Self::Block(_) => f.write_str("#<Block>"),
            Self::Object(receiver) => write!(f, "#<{}>", receiver.class_name()),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Integer(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Integer(n.into())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.into())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s.into())
    }
}

impl From<EcoString> for Value {
    fn from(s: EcoString) -> Self {
        Self::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Self::list(items)
    }
}

impl From<Block> for Value {
    fn from(block: Block) -> Self {
        Self::Block(block)
    }
}
