// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Attribute objects with keyword construction and delegated message sends.
//!
//! A class declares an ordered list of attributes. Instances are built from
//! exactly one named value per attribute, and any message an instance does
//! not itself understand is forwarded to whichever attribute can answer it:
//!
//! - `first` is forwarded to the one attribute that answers `first`;
//! - `greeting_first` is forwarded as `first` to the `greeting` attribute;
//! - if several attributes qualify the send fails with
//!   [`SendError::AmbiguousMethod`] listing all of them.
//!
//! The first successful resolution of a selector is recorded in the class's
//! forwarding table and reused by every later send.
//!
//! ```
//! use relay_core::{Arguments, ClassBuilder, SendError, Value};
//!
//! let greeter = ClassBuilder::new("Greeter")
//!     .attributes(["name", "greeting"])?
//!     .build();
//! let ann = greeter.construct([
//!     ("name", Value::from("Ann")),
//!     ("greeting", Value::list([Value::from("hi")])),
//! ])?;
//!
//! assert_eq!(ann.send("greeting_first", Arguments::none())?, Value::from("hi"));
//! assert_eq!(ann.send("first", Arguments::none())?, Value::from("hi"));
//! assert_eq!(greeter.bound_selectors(), ["first", "greeting_first"]);
//!
//! let err = ann.send("shout", Arguments::none()).unwrap_err();
//! assert!(matches!(err, SendError::DoesNotUnderstand { .. }));
//! # Ok::<(), relay_core::Error>(())
//! ```

pub mod class;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod instance;
pub mod schema;
pub mod value;

#[cfg(test)]
mod test_helpers;

pub use class::{Class, ClassBuilder, MethodFn, PRIMARY_SELECTOR};
pub use config::{BindScope, DispatchConfig};
pub use dispatch::{Binding, CallShape, Candidate, Resolution, Rule};
pub use error::{ConstructionError, DeclarationError, Error, Result, SendError};
pub use instance::Instance;
pub use schema::AttributeSchema;
pub use value::builtins::OBJECT_SELECTORS;
pub use value::{Arguments, Block, Receiver, Value};
