// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Candidate generation.

use crate::schema::AttributeSchema;
use crate::value::Value;
use ecow::EcoString;
use std::fmt;

/// How a candidate's target selector was derived from the requested one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    /// The target is the requested selector itself.
    Direct,
    /// The target is the requested selector minus the `<attribute>_` prefix.
    Prefixed,
}

/// A plausible delegation of one selector to one attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Attribute name.
    pub attribute: EcoString,
    /// Position of the attribute in the schema.
    pub index: usize,
    /// Selector sent to the attribute value.
    pub target: EcoString,
    pub rule: Rule,
}

impl Candidate {
    #[must_use]
    pub fn new(
        attribute: impl Into<EcoString>,
        index: usize,
        target: impl Into<EcoString>,
        rule: Rule,
    ) -> Self {
        Self {
            attribute: attribute.into(),
            index,
            target: target.into(),
            rule,
        }
    }

    /// The direct candidate: `selector` sent unchanged to `attribute`.
    #[must_use]
    pub fn direct(attribute: &EcoString, index: usize, selector: &str) -> Self {
        Self::new(attribute.clone(), index, selector, Rule::Direct)
    }

    /// The prefixed candidate, if `selector` is `<attribute>_<target>` with a
    /// non-empty target.
    #[must_use]
    pub fn prefixed(attribute: &EcoString, index: usize, selector: &str) -> Option<Self> {
        selector
            .strip_prefix(attribute.as_str())
            .and_then(|rest| rest.strip_prefix('_'))
            .filter(|target| !target.is_empty())
            .map(|target| Self::new(attribute.clone(), index, target, Rule::Prefixed))
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.attribute, self.target)
    }
}

/// Every valid candidate for `selector`.
///
/// Attributes are visited in declaration order, the direct candidate before
/// the prefixed one, so the result order is stable for diagnostics. A
/// candidate is valid when its attribute value answers the target selector.
#[must_use]
pub fn generate(selector: &str, schema: &AttributeSchema, values: &[Value]) -> Vec<Candidate> {
    let mut candidates = Vec::new();
    for ((index, attribute), value) in schema.iter().enumerate().zip(values) {
        let direct = Candidate::direct(attribute, index, selector);
        let prefixed = Candidate::prefixed(attribute, index, selector);
        for candidate in std::iter::once(direct).chain(prefixed) {
            if value.responds_to(&candidate.target) {
                candidates.push(candidate);
            }
        }
    }
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    fn greeter_schema() -> AttributeSchema {
        AttributeSchema::declare("Greeter", ["name", "greeting"]).unwrap()
    }

    #[test]
    fn prefixed_requires_separator_and_target() {
        let attribute = EcoString::from("greeting");
        assert_eq!(
            Candidate::prefixed(&attribute, 0, "greeting_first"),
            Some(Candidate::new("greeting", 0, "first", Rule::Prefixed))
        );
        assert_eq!(Candidate::prefixed(&attribute, 0, "greeting_"), None);
        assert_eq!(Candidate::prefixed(&attribute, 0, "greetingfirst"), None);
        assert_eq!(Candidate::prefixed(&attribute, 0, "first"), None);
    }

    #[test]
    fn prefixed_keeps_setter_suffix() {
        let attribute = EcoString::from("counter");
        let candidate = Candidate::prefixed(&attribute, 2, "counter_value=").unwrap();
        assert_eq!(candidate.target, "value=");
        assert_eq!(candidate.to_string(), "counter.value=");
    }

    #[test]
    fn direct_match_only_on_answering_attribute() {
        let values = [Value::from("Ann"), Value::list([Value::from("hi")])];
        let candidates = generate("first", &greeter_schema(), &values);
        assert_eq!(
            candidates,
            vec![Candidate::new("greeting", 1, "first", Rule::Direct)]
        );
    }

    #[test]
    fn prefixed_match() {
        let values = [Value::from("Ann"), Value::list([Value::from("hi")])];
        let candidates = generate("greeting_first", &greeter_schema(), &values);
        assert_eq!(
            candidates,
            vec![Candidate::new("greeting", 1, "first", Rule::Prefixed)]
        );
    }

    #[test]
    fn order_is_declaration_order_direct_first() {
        let values = [
            Value::list([Value::from("Ann")]),
            Value::list([Value::from("hi")]),
        ];
        let candidates = generate("size", &greeter_schema(), &values);
        let rendered: Vec<String> = candidates.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, ["name.size", "greeting.size"]);

        // `name_size` is a prefixed match on `name` only: neither value
        // answers `name_size` directly.
        let candidates = generate("name_size", &greeter_schema(), &values);
        assert_eq!(
            candidates,
            vec![Candidate::new("name", 0, "size", Rule::Prefixed)]
        );
    }

    #[test]
    fn no_candidates() {
        let values = [Value::from("Ann"), Value::from(3)];
        assert!(generate("first", &greeter_schema(), &values).is_empty());
    }
}
