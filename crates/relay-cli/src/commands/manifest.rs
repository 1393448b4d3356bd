// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Class manifest parsing.
//!
//! A manifest declares one class and the attribute values of one instance:
//!
//! ```toml
//! [class]
//! name = "Greeter"
//! attributes = ["name", "greeting"]
//!
//! [config]
//! bind_scope = "class"
//!
//! [values]
//! name = "Ann"
//! greeting = ["hi"]
//! ```

use camino::Utf8Path;
use miette::{Context, IntoDiagnostic, Result};
use relay_core::{Class, ClassBuilder, DispatchConfig, Instance, Value};
use serde::Deserialize;
use std::fs;
use std::sync::Arc;

/// The top-level manifest structure.
#[derive(Debug, Deserialize)]
pub struct Manifest {
    /// The `[class]` section.
    pub class: ClassManifest,
    /// The optional `[config]` section.
    #[serde(default)]
    pub config: DispatchConfig,
    /// Keyword arguments for the instance, one per attribute.
    #[serde(default)]
    pub values: toml::Table,
}

/// The `[class]` section of a manifest.
#[derive(Debug, Deserialize)]
pub struct ClassManifest {
    pub name: String,
    #[serde(default)]
    pub attributes: Vec<String>,
}

impl Manifest {
    /// Builds the declared class.
    pub fn build_class(&self) -> Result<Arc<Class>> {
        let class = ClassBuilder::new(self.class.name.as_str())
            .attributes(self.class.attributes.iter().map(String::as_str))?
            .config(self.config)
            .build();
        Ok(class)
    }

    /// Builds the declared class and constructs the instance described by
    /// `[values]`.
    pub fn instantiate(&self) -> Result<Instance> {
        let class = self.build_class()?;
        let kwargs = self
            .values
            .iter()
            .map(|(name, value)| {
                let value =
                    to_value(value).wrap_err_with(|| format!("Invalid value for '{name}'"))?;
                Ok((name.as_str(), value))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(class.construct(kwargs)?)
    }
}

/// Parse a class manifest file.
pub fn parse_manifest(path: &Utf8Path) -> Result<Manifest> {
    let content = fs::read_to_string(path)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to read manifest '{path}'"))?;

    toml::from_str(&content)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to parse manifest '{path}'"))
}

/// Converts a TOML value into a relay value.
///
/// Floats and datetimes have no relay counterpart and are rejected.
pub fn to_value(value: &toml::Value) -> Result<Value> {
    Ok(match value {
        toml::Value::String(s) => Value::from(s.as_str()),
        toml::Value::Integer(n) => Value::from(*n),
        toml::Value::Boolean(b) => Value::from(*b),
        toml::Value::Array(items) => {
            Value::list(items.iter().map(to_value).collect::<Result<Vec<_>>>()?)
        }
        toml::Value::Table(table) => Value::map(
            table
                .iter()
                .map(|(key, value)| Ok((key.as_str(), to_value(value)?)))
                .collect::<Result<Vec<_>>>()?,
        ),
        toml::Value::Float(f) => miette::bail!("Floating-point values are not supported: {f}"),
        toml::Value::Datetime(d) => miette::bail!("Datetime values are not supported: {d}"),
    })
}

/// Parses a command-line message argument as a TOML inline value, falling
/// back to a plain string when it is not one.
pub fn parse_argument(text: &str) -> Result<Value> {
    match toml::from_str::<toml::Table>(&format!("v = {text}")) {
        Ok(table) if table.len() == 1 => match table.get("v") {
            Some(value) => to_value(value).wrap_err_with(|| format!("Invalid argument '{text}'")),
            None => Ok(Value::from(text)),
        },
        _ => Ok(Value::from(text)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use relay_core::{Arguments, BindScope};
    use tempfile::TempDir;

    fn write_manifest(dir: &TempDir, content: &str) -> Utf8PathBuf {
        let path = Utf8PathBuf::from_path_buf(dir.path().join("relay.toml")).unwrap();
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_parse_valid_manifest() {
        let temp = TempDir::new().unwrap();
        let path = write_manifest(
            &temp,
            r#"
[class]
name = "Greeter"
attributes = ["name", "greeting"]

[values]
name = "Ann"
greeting = ["hi"]
"#,
        );

        let manifest = parse_manifest(&path).unwrap();
        assert_eq!(manifest.class.name, "Greeter");
        assert_eq!(manifest.class.attributes, ["name", "greeting"]);
        assert_eq!(manifest.config.bind_scope, BindScope::Class);

        let instance = manifest.instantiate().unwrap();
        assert_eq!(
            instance.send("first", Arguments::none()).unwrap(),
            Value::from("hi")
        );
    }

    #[test]
    fn test_parse_manifest_with_config() {
        let temp = TempDir::new().unwrap();
        let path = write_manifest(
            &temp,
            r#"
[class]
name = "Box"
attributes = ["x"]

[config]
bind_scope = "instance"

[values]
x = { a = 1 }
"#,
        );

        let manifest = parse_manifest(&path).unwrap();
        assert_eq!(manifest.config.bind_scope, BindScope::Instance);
        let instance = manifest.instantiate().unwrap();
        assert_eq!(
            instance.get("x"),
            Some(&Value::map([("a", Value::from(1))]))
        );
    }

    #[test]
    fn test_parse_manifest_missing_class() {
        let temp = TempDir::new().unwrap();
        let path = write_manifest(&temp, "[values]\nx = 1\n");
        let err = parse_manifest(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse manifest"));
    }

    #[test]
    fn test_parse_manifest_missing_file() {
        let temp = TempDir::new().unwrap();
        let path = Utf8PathBuf::from_path_buf(temp.path().join("absent.toml")).unwrap();
        let err = parse_manifest(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to read manifest"));
    }

    #[test]
    fn test_instantiate_reports_missing_attributes() {
        let manifest: Manifest = toml::from_str(
            r#"
[class]
name = "Greeter"
attributes = ["name", "greeting"]
"#,
        )
        .unwrap();
        let err = manifest.instantiate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "missing attribute(s) for Greeter: name, greeting"
        );
    }

    #[test]
    fn test_instantiate_lists_unknown_attributes_as_written() {
        let manifest: Manifest = toml::from_str(
            r#"
[class]
name = "Greeter"
attributes = ["name"]

[values]
name = "Ann"
zeta = 1
alpha = 2
"#,
        )
        .unwrap();
        let err = manifest.instantiate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "unknown attribute(s) for Greeter: zeta, alpha"
        );
    }

    #[test]
    fn test_instantiate_rejects_duplicate_attributes() {
        let manifest: Manifest = toml::from_str(
            r#"
[class]
name = "Greeter"
attributes = ["name", "name"]
"#,
        )
        .unwrap();
        assert!(manifest.build_class().is_err());
    }

    #[test]
    fn test_floats_rejected() {
        let manifest: Manifest = toml::from_str(
            r#"
[class]
name = "Gauge"
attributes = ["level"]

[values]
level = 0.5
"#,
        )
        .unwrap();
        let err = manifest.instantiate().unwrap_err();
        assert_eq!(err.to_string(), "Invalid value for 'level'");
    }

    #[test]
    fn test_parse_argument() {
        assert_eq!(parse_argument("42").unwrap(), Value::from(42));
        assert_eq!(parse_argument("true").unwrap(), Value::from(true));
        assert_eq!(parse_argument("\"quoted\"").unwrap(), Value::from("quoted"));
        assert_eq!(
            parse_argument("[1, 2]").unwrap(),
            Value::list([Value::from(1), Value::from(2)])
        );
        assert_eq!(parse_argument("hello").unwrap(), Value::from("hello"));
        assert_eq!(
            parse_argument("1\nw = 2").unwrap(),
            Value::from("1\nw = 2")
        );
        assert!(parse_argument("1.5").is_err());
    }
}
