// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Example demonstrating keyword construction and delegated sends.
//!
//! Run with `RUST_LOG=relay_core=trace` to see resolution and binding.

use relay_core::{Arguments, ClassBuilder, Value};

fn main() -> miette::Result<()> {
    println!("Relay Delegation Example\n");
    println!("========================\n");

    let greeter = ClassBuilder::new("Greeter")
        .attributes(["name", "greeting"])?
        .call(|this, _args| {
            let greeting = this.send("greeting_first", Arguments::none())?;
            let name = this.send("name", Arguments::none())?;
            Ok(Value::from(format!(
                "{}, {}!",
                greeting.to_text(),
                name.to_text()
            )))
        })
        .build();

    // Example 1: the primary operation
    println!("1. Greeter.call(name: \"Ann\", greeting: [\"hi\"])");
    let result = greeter.call([
        ("name", Value::from("Ann")),
        ("greeting", Value::list([Value::from("hi")])),
    ])?;
    println!("   => {result}\n");

    // Example 2: direct and prefixed delegation
    println!("2. Delegated sends");
    let ann = greeter.construct([
        ("name", Value::from("Ann")),
        ("greeting", Value::list([Value::from("hi"), Value::from("hello")])),
    ])?;
    for selector in ["first", "last", "name_upcase", "greeting_size"] {
        println!(
            "   {selector} => {}",
            ann.send(selector, Arguments::none())?
        );
    }
    println!("   bound: {:?}\n", greeter.bound_selectors());

    // Example 3: ambiguity
    println!("3. Ambiguous send");
    let both = greeter.construct([
        ("name", Value::list([Value::from("Bob")])),
        ("greeting", Value::list([Value::from("yo")])),
    ])?;
    match both.send("reverse", Arguments::none()) {
        Ok(value) => println!("   reverse => {value}"),
        Err(err) => println!("   error: {err}"),
    }

    Ok(())
}
