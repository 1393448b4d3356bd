// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Method tables for built-in values.
//!
//! Each built-in class lists the selectors it answers. The listing is the
//! capability query used by delegation, so a selector must appear in the
//! table for its class (or in [`OBJECT_SELECTORS`]) exactly when `send`
//! handles it.

use super::{Arguments, Value};
use crate::error::SendError;
use ecow::{EcoString, EcoVec, eco_format};

/// Selectors every value answers, built-in values and instances alike.
pub const OBJECT_SELECTORS: &[&str] = &["class", "inspect", "to_s", "nil?", "=="];

const NIL_SELECTORS: &[&str] = &[];

const BOOLEAN_SELECTORS: &[&str] = &["!", "&", "|"];

const INTEGER_SELECTORS: &[&str] = &[
    "+", "-", "*", "/", "abs", "succ", "pred", "zero?", "even?", "odd?",
];

const STRING_SELECTORS: &[&str] = &[
    "size",
    "length",
    "upcase",
    "downcase",
    "capitalize",
    "reverse",
    "empty?",
    "+",
    "include?",
    "start_with?",
    "chars",
    "to_sym",
];

const SYMBOL_SELECTORS: &[&str] = &["size", "length", "to_sym"];

const LIST_SELECTORS: &[&str] = &[
    "first", "last", "size", "length", "empty?", "[]", "include?", "reverse", "each", "map",
    "select", "join",
];

const MAP_SELECTORS: &[&str] = &[
    "[]", "fetch", "keys", "values", "size", "length", "empty?", "key?",
];

const BLOCK_SELECTORS: &[&str] = &["call"];

/// Class name of a built-in value.
pub(crate) fn class_name(value: &Value) -> &'static str {
    match value {
        Value::Nil => "NilClass",
        Value::Bool(_) => "Boolean",
        Value::Integer(_) => "Integer",
        Value::String(_) => "String",
        Value::Symbol(_) => "Symbol",
        Value::List(_) => "List",
        Value::Map(_) => "Map",
        Value::Block(_) => "Block",
        Value::Object(_) => "Object",
    }
}

fn class_selectors(value: &Value) -> &'static [&'static str] {
    match value {
        Value::Nil | Value::Object(_) => NIL_SELECTORS,
        Value::Bool(_) => BOOLEAN_SELECTORS,
        Value::Integer(_) => INTEGER_SELECTORS,
        Value::String(_) => STRING_SELECTORS,
        Value::Symbol(_) => SYMBOL_SELECTORS,
        Value::List(_) => LIST_SELECTORS,
        Value::Map(_) => MAP_SELECTORS,
        Value::Block(_) => BLOCK_SELECTORS,
    }
}

/// Every selector a built-in value answers, common selectors first.
pub(crate) fn selectors(value: &Value) -> impl Iterator<Item = &'static str> {
    OBJECT_SELECTORS
        .iter()
        .chain(class_selectors(value))
        .copied()
}

pub(crate) fn responds_to(value: &Value, selector: &str) -> bool {
    OBJECT_SELECTORS.contains(&selector) || class_selectors(value).contains(&selector)
}

pub(crate) fn send(value: &Value, selector: &str, args: Arguments) -> Result<Value, SendError> {
    match selector {
        "class" => {
            args.expect_arity(selector, 0)?;
            return Ok(Value::symbol(class_name(value)));
        }
        "inspect" => {
            args.expect_arity(selector, 0)?;
            return Ok(Value::String(eco_format!("{value}")));
        }
        "to_s" => {
            args.expect_arity(selector, 0)?;
            return Ok(Value::String(value.to_text()));
        }
        "nil?" => {
            args.expect_arity(selector, 0)?;
            return Ok(Value::Bool(matches!(value, Value::Nil)));
        }
        "==" => {
            args.expect_arity(selector, 1)?;
            return Ok(Value::Bool(*value == args.positional[0]));
        }
        _ => {}
    }
    if !class_selectors(value).contains(&selector) {
        return Err(does_not_understand(value, selector));
    }

    match value {
        Value::Bool(b) => send_boolean(*b, selector, &args),
        Value::Integer(n) => send_integer(*n, selector, &args),
        Value::String(s) => send_string(s, selector, &args),
        Value::Symbol(s) => send_symbol(s, selector, &args),
        Value::List(items) => send_list(value, items, selector, &args),
        Value::Map(entries) => send_map(entries, selector, &args),
        Value::Block(block) if selector == "call" => block.call(&args.positional),
        _ => Err(does_not_understand(value, selector)),
    }
}

fn does_not_understand(value: &Value, selector: &str) -> SendError {
    SendError::DoesNotUnderstand {
        receiver: class_name(value).into(),
        selector: selector.into(),
    }
}

fn wrong_argument(selector: &str, message: impl Into<EcoString>) -> SendError {
    SendError::WrongArgument {
        selector: selector.into(),
        message: message.into(),
    }
}

fn integer_arg(selector: &str, args: &Arguments) -> Result<i64, SendError> {
    args.expect_arity(selector, 1)?;
    args.positional[0].as_integer().ok_or_else(|| {
        wrong_argument(
            selector,
            eco_format!("expected Integer, got {}", args.positional[0].class_name()),
        )
    })
}

fn string_arg<'a>(selector: &str, args: &'a Arguments) -> Result<&'a str, SendError> {
    args.expect_arity(selector, 1)?;
    args.positional[0].as_str().ok_or_else(|| {
        wrong_argument(
            selector,
            eco_format!("expected String, got {}", args.positional[0].class_name()),
        )
    })
}

fn block_arg<'a>(selector: &str, args: &'a Arguments) -> Result<&'a super::Block, SendError> {
    args.expect_arity(selector, 0)?;
    args.block
        .as_ref()
        .ok_or_else(|| wrong_argument(selector, "no block given"))
}

fn send_boolean(b: bool, selector: &str, args: &Arguments) -> Result<Value, SendError> {
    match selector {
        "!" => {
            args.expect_arity(selector, 0)?;
            Ok(Value::Bool(!b))
        }
        "&" => {
            args.expect_arity(selector, 1)?;
            Ok(Value::Bool(b && args.positional[0].is_truthy()))
        }
        "|" => {
            args.expect_arity(selector, 1)?;
            Ok(Value::Bool(b || args.positional[0].is_truthy()))
        }
        _ => Err(does_not_understand(&Value::Bool(b), selector)),
    }
}

fn send_integer(n: i64, selector: &str, args: &Arguments) -> Result<Value, SendError> {
    let overflow = || wrong_argument(selector, "integer overflow");
    let result = match selector {
        "+" => n.checked_add(integer_arg(selector, args)?).ok_or_else(overflow)?,
        "-" => n.checked_sub(integer_arg(selector, args)?).ok_or_else(overflow)?,
        "*" => n.checked_mul(integer_arg(selector, args)?).ok_or_else(overflow)?,
        "/" => {
            let divisor = integer_arg(selector, args)?;
            if divisor == 0 {
                return Err(wrong_argument(selector, "divided by 0"));
            }
            // Floor division: round toward negative infinity.
            let quotient = n.checked_div(divisor).ok_or_else(overflow)?;
            if n % divisor != 0 && (n < 0) != (divisor < 0) {
                quotient - 1
            } else {
                quotient
            }
        }
        "abs" | "succ" | "pred" | "zero?" | "even?" | "odd?" => {
            args.expect_arity(selector, 0)?;
            match selector {
                "abs" => n.checked_abs().ok_or_else(overflow)?,
                "succ" => n.checked_add(1).ok_or_else(overflow)?,
                "pred" => n.checked_sub(1).ok_or_else(overflow)?,
                "zero?" => return Ok(Value::Bool(n == 0)),
                "even?" => return Ok(Value::Bool(n % 2 == 0)),
                _ => return Ok(Value::Bool(n % 2 != 0)),
            }
        }
        _ => return Err(does_not_understand(&Value::Integer(n), selector)),
    };
    Ok(Value::Integer(result))
}

fn send_string(s: &EcoString, selector: &str, args: &Arguments) -> Result<Value, SendError> {
    match selector {
        "+" => {
            let other = string_arg(selector, args)?;
            Ok(Value::String(eco_format!("{s}{other}")))
        }
        "include?" => Ok(Value::Bool(s.contains(string_arg(selector, args)?))),
        "start_with?" => Ok(Value::Bool(s.starts_with(string_arg(selector, args)?))),
        _ => {
            args.expect_arity(selector, 0)?;
            match selector {
                "size" | "length" => Ok(count(s.chars().count())),
                "upcase" => Ok(Value::from(s.as_str().to_uppercase())),
                "downcase" => Ok(Value::from(s.as_str().to_lowercase())),
                "capitalize" => {
                    let mut chars = s.chars();
                    Ok(Value::String(match chars.next() {
                        Some(first) => eco_format!(
                            "{}{}",
                            first.to_uppercase(),
                            chars.as_str().to_lowercase()
                        ),
                        None => EcoString::new(),
                    }))
                }
                "reverse" => Ok(Value::from(s.chars().rev().collect::<String>())),
                "empty?" => Ok(Value::Bool(s.is_empty())),
                "chars" => Ok(Value::list(
                    s.chars().map(|c| Value::String(eco_format!("{c}"))),
                )),
                "to_sym" => Ok(Value::Symbol(s.clone())),
                _ => Err(does_not_understand(&Value::String(s.clone()), selector)),
            }
        }
    }
}

fn send_symbol(s: &EcoString, selector: &str, args: &Arguments) -> Result<Value, SendError> {
    args.expect_arity(selector, 0)?;
    match selector {
        "size" | "length" => Ok(count(s.chars().count())),
        "to_sym" => Ok(Value::Symbol(s.clone())),
        _ => Err(does_not_understand(&Value::Symbol(s.clone()), selector)),
    }
}

fn send_list(
    list: &Value,
    items: &EcoVec<Value>,
    selector: &str,
    args: &Arguments,
) -> Result<Value, SendError> {
    match selector {
        "[]" => {
            let index = integer_arg(selector, args)?;
            let len = i64::try_from(items.len()).unwrap_or(i64::MAX);
            let index = if index < 0 { index + len } else { index };
            Ok(usize::try_from(index)
                .ok()
                .and_then(|i| items.get(i).cloned())
                .unwrap_or(Value::Nil))
        }
        "include?" => {
            args.expect_arity(selector, 1)?;
            Ok(Value::Bool(items.contains(&args.positional[0])))
        }
        "each" => {
            let block = block_arg(selector, args)?;
            for item in items.iter() {
                block.call(std::slice::from_ref(item))?;
            }
            Ok(list.clone())
        }
        "map" => {
            let block = block_arg(selector, args)?;
            items
                .iter()
                .map(|item| block.call(std::slice::from_ref(item)))
                .collect::<Result<EcoVec<_>, _>>()
                .map(Value::List)
        }
        "select" => {
            let block = block_arg(selector, args)?;
            let mut selected = EcoVec::new();
            for item in items.iter() {
                if block.call(std::slice::from_ref(item))?.is_truthy() {
                    selected.push(item.clone());
                }
            }
            Ok(Value::List(selected))
        }
        "join" => {
            args.expect_arity_between(selector, 0, 1)?;
            let separator = match args.positional.first() {
                Some(sep) => sep.as_str().ok_or_else(|| {
                    wrong_argument(
                        selector,
                        eco_format!("expected String, got {}", sep.class_name()),
                    )
                })?,
                None => "",
            };
            let mut joined = EcoString::new();
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    joined.push_str(separator);
                }
                joined.push_str(&item.to_text());
            }
            Ok(Value::String(joined))
        }
        _ => {
            args.expect_arity(selector, 0)?;
            match selector {
                "first" => Ok(items.first().cloned().unwrap_or(Value::Nil)),
                "last" => Ok(items.last().cloned().unwrap_or(Value::Nil)),
                "size" | "length" => Ok(count(items.len())),
                "empty?" => Ok(Value::Bool(items.is_empty())),
                "reverse" => Ok(Value::list(items.iter().rev().cloned())),
                _ => Err(does_not_understand(list, selector)),
            }
        }
    }
}

fn map_key<'a>(selector: &str, key: &'a Value) -> Result<&'a str, SendError> {
    match key {
        Value::String(s) | Value::Symbol(s) => Ok(s.as_str()),
        other => Err(wrong_argument(
            selector,
            eco_format!("expected String or Symbol key, got {}", other.class_name()),
        )),
    }
}

fn send_map(
    entries: &std::collections::BTreeMap<EcoString, Value>,
    selector: &str,
    args: &Arguments,
) -> Result<Value, SendError> {
    match selector {
        "[]" => {
            args.expect_arity(selector, 1)?;
            let key = map_key(selector, &args.positional[0])?;
            Ok(entries.get(key).cloned().unwrap_or(Value::Nil))
        }
        "key?" => {
            args.expect_arity(selector, 1)?;
            let key = map_key(selector, &args.positional[0])?;
            Ok(Value::Bool(entries.contains_key(key)))
        }
        "fetch" => {
            args.expect_arity_between(selector, 1, 2)?;
            let key = map_key(selector, &args.positional[0])?;
            match (entries.get(key), args.positional.get(1)) {
                (Some(found), _) => Ok(found.clone()),
                (None, Some(default)) => Ok(default.clone()),
                (None, None) => Err(wrong_argument(
                    selector,
                    eco_format!("key not found: {key:?}"),
                )),
            }
        }
        _ => {
            args.expect_arity(selector, 0)?;
            match selector {
                "keys" => Ok(Value::list(entries.keys().cloned().map(Value::String))),
                "values" => Ok(Value::list(entries.values().cloned())),
                "size" | "length" => Ok(count(entries.len())),
                "empty?" => Ok(Value::Bool(entries.is_empty())),
                _ => Err(SendError::DoesNotUnderstand {
                    receiver: "Map".into(),
                    selector: selector.into(),
                }),
            }
        }
    }
}

fn count(n: usize) -> Value {
    Value::Integer(i64::try_from(n).unwrap_or(i64::MAX))
}
