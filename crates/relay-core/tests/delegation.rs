// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Integration tests for delegated dispatch through the public API.

use std::sync::{Arc, Mutex};

use ecow::EcoString;
use miette::Diagnostic;
use relay_core::{
    Arguments, BindScope, Block, Class, ClassBuilder, ConstructionError, DispatchConfig, Error,
    Receiver, Resolution, SendError, Value,
};

/// A receiver with a `temperature` reader, a `temperature=` setter, and a
/// `log` method that records every message passed to it.
#[derive(Debug, Default)]
struct Thermostat {
    temperature: Mutex<i64>,
    log: Mutex<Vec<EcoString>>,
}

impl Receiver for Thermostat {
    fn class_name(&self) -> EcoString {
        "Thermostat".into()
    }

    fn selectors(&self) -> Vec<EcoString> {
        vec!["temperature".into(), "temperature=".into(), "log".into()]
    }

    fn send(&self, selector: &str, args: Arguments) -> Result<Value, SendError> {
        let mut temperature = self.temperature.lock().unwrap();
        match selector {
            "temperature" => Ok(Value::from(*temperature)),
            "temperature=" => {
                args.expect_arity(selector, 1)?;
                *temperature = args.positional[0]
                    .as_integer()
                    .ok_or_else(|| SendError::failed("temperature must be an integer"))?;
                Ok(Value::from(*temperature))
            }
            "log" => {
                let mut log = self.log.lock().unwrap();
                for arg in &args.positional {
                    log.push(arg.to_text());
                }
                if let Some(block) = &args.block {
                    log.push(block.call(&[])?.to_text());
                }
                Ok(Value::from(i64::try_from(log.len()).unwrap()))
            }
            _ => Err(SendError::DoesNotUnderstand {
                receiver: self.class_name(),
                selector: selector.into(),
            }),
        }
    }
}

fn room() -> Arc<Class> {
    ClassBuilder::new("Room")
        .attributes(["label", "thermostat"])
        .unwrap()
        .build()
}

#[test]
fn setter_and_reader_forward_to_custom_receiver() {
    let room = room();
    let kitchen = room
        .construct([
            ("label", Value::from("kitchen")),
            ("thermostat", Value::object(Thermostat::default())),
        ])
        .unwrap();

    kitchen
        .send("temperature=", Arguments::new(vec![Value::from(21)]))
        .unwrap();
    assert_eq!(
        kitchen.send("thermostat_temperature", Arguments::none()).unwrap(),
        Value::from(21)
    );
    assert_eq!(
        room.bound_selectors(),
        ["temperature=", "thermostat_temperature"]
    );

    let err = kitchen
        .send("temperature=", Arguments::new(vec![Value::from("warm")]))
        .unwrap_err();
    assert_eq!(err.to_string(), "temperature must be an integer");
}

#[test]
fn variadic_forwarding_passes_arguments_and_block() {
    let kitchen = room()
        .construct([
            ("label", Value::from("kitchen")),
            ("thermostat", Value::object(Thermostat::default())),
        ])
        .unwrap();

    let args = Arguments::new(vec![Value::from("on"), Value::from(3)])
        .with_block(Block::new(|_| Ok(Value::symbol("done"))));
    assert_eq!(kitchen.send("log", args).unwrap(), Value::from(3));
}

#[test]
fn unified_error_carries_diagnostic_codes() {
    let err: Error = room()
        .construct([("label", Value::from("hall"))])
        .unwrap_err()
        .into();
    assert_eq!(
        err.code().map(|code| code.to_string()),
        Some("relay::missing_attribute".to_string())
    );
    assert!(matches!(
        err,
        Error::Construction(ConstructionError::MissingAttribute { .. })
    ));

    let hall = room()
        .construct([
            ("label", Value::list([Value::from("hall")])),
            ("thermostat", Value::list([Value::from(18)])),
        ])
        .unwrap();
    let err = Error::from(hall.send("first", Arguments::none()).unwrap_err());
    assert_eq!(
        err.code().map(|code| code.to_string()),
        Some("relay::ambiguous_method".to_string())
    );
    assert!(err.help().is_some());
}

#[test]
fn explicit_prefix_disambiguates() {
    let hall = room()
        .construct([
            ("label", Value::list([Value::from("hall")])),
            ("thermostat", Value::list([Value::from(18)])),
        ])
        .unwrap();
    assert!(matches!(hall.resolve("first"), Resolution::Ambiguous(_)));
    assert_eq!(
        hall.send("thermostat_first", Arguments::none()).unwrap(),
        Value::from(18)
    );
    assert_eq!(
        hall.send("label_first", Arguments::none()).unwrap(),
        Value::from("hall")
    );
}

#[test]
fn subclass_binds_in_its_own_table() {
    let base = ClassBuilder::new("Base")
        .attributes(["items"])
        .unwrap()
        .config(DispatchConfig::with_bind_scope(BindScope::Class))
        .method("describe", |this, _| {
            let size = this.send("size", Arguments::none())?;
            Ok(Value::from(format!("{} item(s)", size.to_text())))
        })
        .build();
    let child = ClassBuilder::new("Child")
        .superclass(&base)
        .attributes(["items"])
        .unwrap()
        .build();

    let instance = child
        .construct([("items", Value::list([Value::Nil, Value::Nil]))])
        .unwrap();
    assert_eq!(
        instance.send("describe", Arguments::none()).unwrap(),
        Value::from("2 item(s)")
    );
    assert_eq!(child.bound_selectors(), ["size"]);
    assert!(base.bound_selectors().is_empty());
}

#[test]
fn class_call_needs_a_definition() {
    let err = room()
        .call([
            ("label", Value::from("attic")),
            ("thermostat", Value::Nil),
        ])
        .unwrap_err();
    assert_eq!(err.to_string(), "Room#call is not implemented");
}
