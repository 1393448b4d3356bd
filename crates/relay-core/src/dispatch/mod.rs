// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Delegation of unknown selectors to attribute values.
//!
//! When an instance receives a selector that is neither a reader nor a
//! method of its class, dispatch runs in three steps:
//!
//! 1. [`candidate`] proposes `(attribute, target)` pairs under the *direct*
//!    rule (`first` → `greeting.first`) and the *prefixed* rule
//!    (`greeting_first` → `greeting.first`), keeping those whose value
//!    actually answers the target selector;
//! 2. [`resolver`] turns the candidate list into a [`Resolution`]: exactly
//!    one candidate resolves, zero falls through to "does not understand",
//!    more than one is an ambiguity error;
//! 3. [`binding`] records the winner in a [`ForwardingTable`] so later sends
//!    of the same selector forward directly.
//!
//! There is no precedence between the two rules. A direct match on one
//! attribute and a prefixed match on another are ambiguous, and so are both
//! matches on the same attribute.

pub mod binding;
pub mod candidate;
pub mod resolver;

pub use binding::{Binding, CallShape, ForwardingTable};
pub use candidate::{Candidate, Rule, generate};
pub use resolver::Resolution;
