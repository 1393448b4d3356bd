// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Instances and the send pipeline.
//!
//! A send is answered by the first of:
//!
//! 1. a user-defined method on the class or an ancestor;
//! 2. an attribute reader (zero arguments);
//! 3. the object protocol: `class`, `inspect`, `to_s`, `nil?` and `==`;
//! 4. `NotImplemented`, if the selector is `call`;
//! 5. an existing forwarding binding;
//! 6. a fresh resolution against the attribute values, which is bound on
//!    success so later sends skip step 6.

use crate::class::{Class, PRIMARY_SELECTOR};
use crate::config::BindScope;
use crate::dispatch::{Binding, ForwardingTable, Resolution};
use crate::error::SendError;
use crate::value::builtins::OBJECT_SELECTORS;
use crate::value::{Arguments, Receiver, Value};
use ecow::{EcoString, eco_format};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;
use tracing::trace;

/// An object holding one value per attribute of its class.
pub struct Instance {
    class: Arc<Class>,
    values: Vec<Value>,
    /// Bindings private to this instance. Only present under
    /// [`BindScope::Instance`].
    cache: Option<ForwardingTable>,
}

impl Instance {
    /// `values` must be in schema order, one per attribute.
    pub(crate) fn new(class: Arc<Class>, values: Vec<Value>) -> Self {
        debug_assert_eq!(values.len(), class.schema().len());
        let cache =
            (class.config().bind_scope == BindScope::Instance).then(ForwardingTable::new);
        Self {
            class,
            values,
            cache,
        }
    }

    #[must_use]
    pub fn class(&self) -> &Arc<Class> {
        &self.class
    }

    /// Reads an attribute.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.class
            .schema()
            .position(name)
            .and_then(|index| self.values.get(index))
    }

    /// Attribute values in declaration order.
    #[must_use]
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Sends `call` with no arguments.
    ///
    /// # Errors
    ///
    /// [`SendError::NotImplemented`] if the class never defined `call`,
    /// otherwise whatever `call` returns.
    pub fn call(&self) -> Result<Value, SendError> {
        self.send(PRIMARY_SELECTOR, Arguments::none())
    }

    /// Sends `selector` with `args`.
    ///
    /// # Errors
    ///
    /// - [`SendError::DoesNotUnderstand`] if nothing answers the selector;
    /// - [`SendError::AmbiguousMethod`] if more than one attribute could;
    /// - [`SendError::ArityMismatch`] for a reader sent arguments, or a setter
    ///   not sent exactly one;
    /// - any error raised by the method or delegated target.
    pub fn send(&self, selector: &str, args: Arguments) -> Result<Value, SendError> {
        if let Some(method) = self.class.find_method(selector) {
            return method(self, args);
        }
        if let Some(value) = self.get(selector) {
            args.expect_arity(selector, 0)?;
            return Ok(value.clone());
        }
        if OBJECT_SELECTORS.contains(&selector) {
            return self.send_object(selector, &args);
        }
        if selector == PRIMARY_SELECTOR {
            return Err(SendError::NotImplemented {
                class: self.class.name().clone(),
                selector: selector.into(),
            });
        }

        let binding = match self.binding(selector) {
            Some(binding) => binding,
            None => self.bind(selector)?,
        };
        binding.forward(&self.values, selector, args)
    }

    /// Returns true if `selector` can be sent without a "does not
    /// understand" or ambiguity failure. Never installs a binding.
    #[must_use]
    pub fn responds_to(&self, selector: &str) -> bool {
        self.class.find_method(selector).is_some()
            || self.class.schema().contains(selector)
            || OBJECT_SELECTORS.contains(&selector)
            || self.binding(selector).is_some()
            || (selector != PRIMARY_SELECTOR && self.resolve(selector).is_resolved())
    }

    /// Resolves `selector` against the current attribute values, ignoring
    /// readers, methods and existing bindings.
    #[must_use]
    pub fn resolve(&self, selector: &str) -> Resolution {
        Resolution::resolve(selector, self.class.schema(), &self.values)
    }

    /// The binding currently used for `selector`, if any.
    #[must_use]
    pub fn binding(&self, selector: &str) -> Option<Binding> {
        self.forwarding().get(selector)
    }

    /// Selectors bound in the table this instance binds into, sorted.
    #[must_use]
    pub fn bound_selectors(&self) -> Vec<EcoString> {
        self.forwarding().selectors()
    }

    fn forwarding(&self) -> &ForwardingTable {
        self.cache
            .as_ref()
            .unwrap_or_else(|| self.class.forwarding())
    }

    fn send_object(&self, selector: &str, args: &Arguments) -> Result<Value, SendError> {
        if selector == "==" {
            args.expect_arity(selector, 1)?;
            return Ok(Value::Bool(self.is(&args.positional[0])));
        }
        args.expect_arity(selector, 0)?;
        Ok(match selector {
            "class" => Value::symbol(self.class.name().clone()),
            "nil?" => Value::Bool(false),
            _ => Value::String(eco_format!("{self}")),
        })
    }

    /// Identity: true only when `other` wraps this very instance.
    fn is(&self, other: &Value) -> bool {
        match other {
            Value::Object(receiver) => std::ptr::eq(
                Arc::as_ptr(receiver).cast::<()>(),
                std::ptr::from_ref(self).cast::<()>(),
            ),
            _ => false,
        }
    }

    fn bind(&self, selector: &str) -> Result<Binding, SendError> {
        let resolution = self.resolve(selector);
        trace!(class = %self.class.name(), selector, outcome = ?resolution, "resolved selector");
        let binding = resolution.into_binding(self.class.name(), selector)?;
        Ok(self.forwarding().install(selector, binding))
    }
}

impl Receiver for Instance {
    fn class_name(&self) -> EcoString {
        self.class.name().clone()
    }

    /// Readers, methods, the object protocol and bound selectors. Selectors
    /// that would resolve but are not bound yet are not listed;
    /// `responds_to` covers them.
    fn selectors(&self) -> Vec<EcoString> {
        let mut selectors: BTreeSet<EcoString> = self.class.schema().iter().cloned().collect();
        selectors.extend(self.class.method_selectors());
        selectors.extend(OBJECT_SELECTORS.iter().copied().map(EcoString::from));
        selectors.extend(self.bound_selectors());
        selectors.into_iter().collect()
    }

    fn responds_to(&self, selector: &str) -> bool {
        Instance::responds_to(self, selector)
    }

    fn send(&self, selector: &str, args: Arguments) -> Result<Value, SendError> {
        Instance::send(self, selector, args)
    }
}

impl From<Instance> for Value {
    fn from(instance: Instance) -> Self {
        Value::object(instance)
    }
}

/// Renders as `#<Person name: "Ann">`.
impl fmt::Display for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#<{}", self.class.name())?;
        for (i, (name, value)) in self.class.schema().iter().zip(&self.values).enumerate() {
            f.write_str(if i == 0 { " " } else { ", " })?;
            write!(f, "{name}: {value}")?;
        }
        f.write_str(">")
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Instance");
        s.field("class", self.class.name());
        for (name, value) in self.class.schema().iter().zip(&self.values) {
            s.field(name, value);
        }
        s.finish_non_exhaustive()
    }
}
