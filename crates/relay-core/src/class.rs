// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Classes: attribute schema, methods, and the shared forwarding table.
//!
//! A [`Class`] is built once with a [`ClassBuilder`] and then shared as
//! `Arc<Class>` by all of its instances. Everything about a class is fixed
//! at build time except its forwarding table, which fills in lazily as
//! instances resolve delegated selectors.
//!
//! ```
//! use relay_core::{Arguments, ClassBuilder, Value};
//!
//! let greeter = ClassBuilder::new("Greeter")
//!     .attributes(["name", "greeting"])?
//!     .call(|this, _args| {
//!         let greeting = this.send("greeting_first", Arguments::none())?;
//!         Ok(Value::from(format!("{}, {}!", greeting.to_text(), this.get("name").map(Value::to_text).unwrap_or_default())))
//!     })
//!     .build();
//!
//! let result = greeter.call([
//!     ("name", Value::from("Ann")),
//!     ("greeting", Value::list([Value::from("hi")])),
//! ])?;
//! assert_eq!(result, Value::from("hi, Ann!"));
//! # Ok::<(), relay_core::Error>(())
//! ```

use crate::config::DispatchConfig;
use crate::dispatch::{Binding, ForwardingTable};
use crate::error::{ConstructionError, DeclarationError, Error, SendError};
use crate::instance::Instance;
use crate::schema::AttributeSchema;
use crate::value::{Arguments, Value};
use ecow::EcoString;
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::sync::Arc;

/// Selector of the primary operation every class is expected to define.
pub const PRIMARY_SELECTOR: &str = "call";

/// A user-defined instance method.
pub type MethodFn = Arc<dyn Fn(&Instance, Arguments) -> Result<Value, SendError> + Send + Sync>;

/// A class with a declared attribute schema.
pub struct Class {
    name: EcoString,
    superclass: Option<Arc<Class>>,
    schema: AttributeSchema,
    methods: HashMap<EcoString, MethodFn>,
    config: DispatchConfig,
    forwarding: ForwardingTable,
}

impl Class {
    #[must_use]
    pub fn name(&self) -> &EcoString {
        &self.name
    }

    #[must_use]
    pub fn superclass(&self) -> Option<&Arc<Class>> {
        self.superclass.as_ref()
    }

    /// Names of the ancestors of this class, nearest first.
    #[must_use]
    pub fn superclass_chain(&self) -> Vec<EcoString> {
        let mut chain = Vec::new();
        let mut current = self.superclass.as_deref();
        while let Some(class) = current {
            chain.push(class.name.clone());
            current = class.superclass.as_deref();
        }
        chain
    }

    /// The attributes declared by this class. Never includes ancestors'
    /// attributes.
    #[must_use]
    pub fn schema(&self) -> &AttributeSchema {
        &self.schema
    }

    #[must_use]
    pub fn config(&self) -> DispatchConfig {
        self.config
    }

    /// Finds a user-defined method on this class or its ancestors, nearest
    /// definition first.
    #[must_use]
    pub fn find_method(&self, selector: &str) -> Option<&MethodFn> {
        let mut current = Some(self);
        while let Some(class) = current {
            if let Some(method) = class.methods.get(selector) {
                return Some(method);
            }
            current = class.superclass.as_deref();
        }
        None
    }

    /// Selectors of all user-defined methods, own and inherited, sorted.
    #[must_use]
    pub fn method_selectors(&self) -> Vec<EcoString> {
        let mut selectors = BTreeSet::new();
        let mut current = Some(self);
        while let Some(class) = current {
            selectors.extend(class.methods.keys().cloned());
            current = class.superclass.as_deref();
        }
        selectors.into_iter().collect()
    }

    /// Builds an instance from one value per declared attribute.
    ///
    /// Names may be given in any order.
    ///
    /// # Errors
    ///
    /// - [`ConstructionError::DuplicateArgument`] if a declared name is given
    ///   twice;
    /// - [`ConstructionError::MissingAttribute`] listing every declared name
    ///   that was not given, in declaration order;
    /// - [`ConstructionError::UnknownAttribute`] listing every given name that
    ///   is not declared, in the order given.
    pub fn construct<I, K>(self: &Arc<Self>, kwargs: I) -> Result<Instance, ConstructionError>
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<EcoString>,
    {
        let mut slots: Vec<Option<Value>> = vec![None; self.schema.len()];
        let mut unknown = Vec::new();
        for (name, value) in kwargs {
            let name = name.into();
            match self.schema.position(&name) {
                Some(index) if slots[index].is_some() => {
                    return Err(ConstructionError::DuplicateArgument {
                        class: self.name.clone(),
                        name,
                    });
                }
                Some(index) => slots[index] = Some(value),
                None => unknown.push(name),
            }
        }

        let missing: Vec<EcoString> = self
            .schema
            .iter()
            .zip(&slots)
            .filter(|(_, slot)| slot.is_none())
            .map(|(name, _)| name.clone())
            .collect();
        if !missing.is_empty() {
            return Err(ConstructionError::MissingAttribute {
                class: self.name.clone(),
                names: missing,
            });
        }
        if !unknown.is_empty() {
            return Err(ConstructionError::UnknownAttribute {
                class: self.name.clone(),
                names: unknown,
            });
        }

        Ok(Instance::new(
            Arc::clone(self),
            slots.into_iter().flatten().collect(),
        ))
    }

    /// Constructs an instance and sends it `call` with no arguments.
    ///
    /// # Errors
    ///
    /// Any [`ConstructionError`], [`SendError::NotImplemented`] if no `call`
    /// is defined, or the error `call` itself returns.
    pub fn call<I, K>(self: &Arc<Self>, kwargs: I) -> Result<Value, Error>
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<EcoString>,
    {
        let instance = self.construct(kwargs)?;
        Ok(instance.call()?)
    }

    /// The class-level binding for `selector`, if one was installed.
    #[must_use]
    pub fn binding(&self, selector: &str) -> Option<Binding> {
        self.forwarding.get(selector)
    }

    /// Selectors bound in the class forwarding table, sorted.
    #[must_use]
    pub fn bound_selectors(&self) -> Vec<EcoString> {
        self.forwarding.selectors()
    }

    pub(crate) fn forwarding(&self) -> &ForwardingTable {
        &self.forwarding
    }
}

impl fmt::Debug for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut methods: Vec<&EcoString> = self.methods.keys().collect();
        methods.sort();
        f.debug_struct("Class")
            .field("name", &self.name)
            .field("superclass", &self.superclass.as_ref().map(|c| &c.name))
            .field("schema", &self.schema)
            .field("methods", &methods)
            .field("config", &self.config)
            .field("forwarding", &self.forwarding)
            .finish()
    }
}

/// Builder for [`Class`].
pub struct ClassBuilder {
    name: EcoString,
    superclass: Option<Arc<Class>>,
    schema: Option<AttributeSchema>,
    methods: HashMap<EcoString, MethodFn>,
    config: Option<DispatchConfig>,
}

impl ClassBuilder {
    /// Starts a class with an empty schema and no methods.
    #[must_use]
    pub fn new(name: impl Into<EcoString>) -> Self {
        Self {
            name: name.into(),
            superclass: None,
            schema: None,
            methods: HashMap::new(),
            config: None,
        }
    }

    /// Inherits methods, `call`, and dispatch configuration from
    /// `superclass`. The attribute schema is *not* inherited.
    #[must_use]
    pub fn superclass(mut self, superclass: &Arc<Class>) -> Self {
        self.superclass = Some(Arc::clone(superclass));
        self
    }

    /// Declares the attributes of the class.
    ///
    /// # Errors
    ///
    /// [`DeclarationError::SchemaRedeclared`] when called twice, plus any
    /// error from [`AttributeSchema::declare`].
    pub fn attributes<I, S>(mut self, names: I) -> Result<Self, DeclarationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<EcoString>,
    {
        if self.schema.is_some() {
            return Err(DeclarationError::SchemaRedeclared {
                class: self.name.clone(),
            });
        }
        self.schema = Some(AttributeSchema::declare(&self.name, names)?);
        Ok(self)
    }

    /// Defines an instance method. A later definition of the same selector
    /// replaces the earlier one.
    #[must_use]
    pub fn method<F>(mut self, selector: impl Into<EcoString>, f: F) -> Self
    where
        F: Fn(&Instance, Arguments) -> Result<Value, SendError> + Send + Sync + 'static,
    {
        self.methods.insert(selector.into(), Arc::new(f));
        self
    }

    /// Defines the primary operation, `call`.
    #[must_use]
    pub fn call<F>(self, f: F) -> Self
    where
        F: Fn(&Instance, Arguments) -> Result<Value, SendError> + Send + Sync + 'static,
    {
        self.method(PRIMARY_SELECTOR, f)
    }

    #[must_use]
    pub fn config(mut self, config: DispatchConfig) -> Self {
        self.config = Some(config);
        self
    }

    #[must_use]
    pub fn build(self) -> Arc<Class> {
        let config = self
            .config
            .or_else(|| self.superclass.as_ref().map(|s| s.config))
            .unwrap_or_default();
        Arc::new(Class {
            name: self.name,
            superclass: self.superclass,
            schema: self.schema.unwrap_or_default(),
            methods: self.methods,
            config,
            forwarding: ForwardingTable::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BindScope;

    fn greeter() -> Arc<Class> {
        ClassBuilder::new("Greeter")
            .attributes(["name", "greeting"])
            .unwrap()
            .build()
    }

    #[test]
    fn construct_in_any_order() {
        let class = greeter();
        let instance = class
            .construct([
                ("greeting", Value::list([Value::from("hi")])),
                ("name", Value::from("Ann")),
            ])
            .unwrap();
        assert_eq!(instance.get("name"), Some(&Value::from("Ann")));
        assert_eq!(
            instance.get("greeting"),
            Some(&Value::list([Value::from("hi")]))
        );
    }

    #[test]
    fn construct_missing_attribute() {
        let err = greeter()
            .construct([("name", Value::from("Ann"))])
            .unwrap_err();
        assert_eq!(
            err,
            ConstructionError::MissingAttribute {
                class: "Greeter".into(),
                names: vec!["greeting".into()],
            }
        );
    }

    #[test]
    fn construct_unknown_attribute() {
        let err = greeter()
            .construct([
                ("name", Value::from("Ann")),
                ("greeting", Value::from("hi")),
                ("mood", Value::from("cheerful")),
            ])
            .unwrap_err();
        assert_eq!(
            err,
            ConstructionError::UnknownAttribute {
                class: "Greeter".into(),
                names: vec!["mood".into()],
            }
        );
    }

    #[test]
    fn missing_reported_before_unknown() {
        let err = greeter()
            .construct([("mood", Value::from("cheerful"))])
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "missing attribute(s) for Greeter: name, greeting"
        );
    }

    #[test]
    fn construct_duplicate_argument() {
        let err = greeter()
            .construct([
                ("name", Value::from("Ann")),
                ("name", Value::from("Bob")),
                ("greeting", Value::from("hi")),
            ])
            .unwrap_err();
        assert!(matches!(err, ConstructionError::DuplicateArgument { .. }));
    }

    #[test]
    fn schema_cannot_be_redeclared() {
        let err = ClassBuilder::new("Greeter")
            .attributes(["name"])
            .unwrap()
            .attributes(["greeting"])
            .err()
            .unwrap();
        assert_eq!(
            err,
            DeclarationError::SchemaRedeclared {
                class: "Greeter".into()
            }
        );
    }

    #[test]
    fn call_without_definition_is_not_implemented() {
        let err = greeter()
            .call([
                ("name", Value::from("Ann")),
                ("greeting", Value::from("hi")),
            ])
            .unwrap_err();
        assert_eq!(
            err,
            Error::Send(SendError::NotImplemented {
                class: "Greeter".into(),
                selector: "call".into(),
            })
        );
    }

    #[test]
    fn call_returns_result_directly() {
        let class = ClassBuilder::new("Adder")
            .attributes(["a", "b"])
            .unwrap()
            .call(|this, _| this.send("a_+", Arguments::new(vec![this.send("b", Arguments::none())?])))
            .build();
        let sum = class
            .call([("a", Value::from(2)), ("b", Value::from(3))])
            .unwrap();
        assert_eq!(sum, Value::from(5));
    }

    #[test]
    fn subclass_starts_with_empty_schema() {
        let base = greeter();
        let child = ClassBuilder::new("Child").superclass(&base).build();
        assert!(child.schema().is_empty());
        assert!(child.construct(Vec::<(&str, Value)>::new()).is_ok());
        assert!(child.construct([("name", Value::from("Ann"))]).is_err());
        assert_eq!(child.superclass_chain(), vec!["Greeter"]);
        assert!(Arc::ptr_eq(child.superclass().unwrap(), &base));
        assert!(base.superclass().is_none());
    }

    #[test]
    fn subclass_inherits_methods_and_config() {
        let base = ClassBuilder::new("Base")
            .config(DispatchConfig::with_bind_scope(BindScope::Instance))
            .method("shout", |_, _| Ok(Value::from("HEY")))
            .call(|_, _| Ok(Value::from("base")))
            .build();
        let child = ClassBuilder::new("Child")
            .superclass(&base)
            .attributes(["x"])
            .unwrap()
            .call(|_, _| Ok(Value::from("child")))
            .build();

        assert_eq!(child.config().bind_scope, BindScope::Instance);
        assert!(child.find_method("shout").is_some());
        assert_eq!(child.method_selectors(), vec!["call", "shout"]);
        assert_eq!(
            child.call([("x", Value::Nil)]).unwrap(),
            Value::from("child")
        );
        assert_eq!(
            base.call(Vec::<(&str, Value)>::new()).unwrap(),
            Value::from("base")
        );
    }
}
