// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Per-class dispatch configuration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a successful resolution is recorded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BindScope {
    /// On the class: the shortcut is shared by every instance of the class,
    /// including instances constructed before the first resolution.
    #[default]
    Class,
    /// On the instance that resolved the selector only.
    Instance,
}

impl fmt::Display for BindScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Class => "class",
            Self::Instance => "instance",
        })
    }
}

/// Dispatch settings attached to a class when it is built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct DispatchConfig {
    pub bind_scope: BindScope,
}

impl DispatchConfig {
    #[must_use]
    pub fn with_bind_scope(bind_scope: BindScope) -> Self {
        Self { bind_scope }
    }
}
