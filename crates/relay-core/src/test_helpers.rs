// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Shared receivers for unit tests.

use crate::error::SendError;
use crate::value::{Arguments, Receiver, Value};
use ecow::EcoString;
use std::sync::Mutex;

/// Answers a fixed set of selectors, returning the selector as a symbol.
#[derive(Debug)]
pub struct Answers {
    selectors: Vec<EcoString>,
}

impl Answers {
    pub fn new<const N: usize>(selectors: [&str; N]) -> Self {
        Self {
            selectors: selectors.into_iter().map(EcoString::from).collect(),
        }
    }
}

impl Receiver for Answers {
    fn class_name(&self) -> EcoString {
        "Answers".into()
    }

    fn selectors(&self) -> Vec<EcoString> {
        self.selectors.clone()
    }

    fn send(&self, selector: &str, _args: Arguments) -> Result<Value, SendError> {
        if self.responds_to(selector) {
            Ok(Value::symbol(selector))
        } else {
            Err(SendError::DoesNotUnderstand {
                receiver: self.class_name(),
                selector: selector.into(),
            })
        }
    }
}

/// A mutable cell with a `value` reader and a `value=` setter.
#[derive(Debug, Default)]
pub struct Cell {
    value: Mutex<Option<Value>>,
}

impl Receiver for Cell {
    fn class_name(&self) -> EcoString {
        "Cell".into()
    }

    fn selectors(&self) -> Vec<EcoString> {
        vec!["value".into(), "value=".into()]
    }

    fn send(&self, selector: &str, args: Arguments) -> Result<Value, SendError> {
        let mut value = self
            .value
            .lock()
            .map_err(|_| SendError::failed("cell lock poisoned"))?;
        match selector {
            "value" => {
                args.expect_arity(selector, 0)?;
                Ok(value.clone().unwrap_or(Value::Nil))
            }
            "value=" => {
                args.expect_arity(selector, 1)?;
                let new = args.positional.into_iter().next().unwrap_or(Value::Nil);
                *value = Some(new.clone());
                Ok(new)
            }
            _ => Err(SendError::DoesNotUnderstand {
                receiver: self.class_name(),
                selector: selector.into(),
            }),
        }
    }
}
