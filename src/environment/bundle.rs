//! Ordered environment variable mapping.

use serde::Serialize;
use std::collections::HashMap;

/// Ordered mapping of variable name to value.
///
/// Setting an existing name replaces its value but keeps its position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EnvironmentBundle {
    vars: Vec<(String, String)>,
}

impl EnvironmentBundle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a variable, last write wins.
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.vars.iter_mut().find(|(k, _)| k == name) {
            Some((_, existing)) => *existing = value,
            None => self.vars.push((name.to_string(), value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Variables in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> Vec<&str> {
        self.vars.iter().map(|(k, _)| k.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Merge into a release variable map, overwriting existing names.
    pub fn merge_into(&self, vars: &mut HashMap<String, String>) {
        for (k, v) in &self.vars {
            vars.insert(k.clone(), v.clone());
        }
    }

    /// Render as POSIX shell `export` lines.
    pub fn render_exports(&self) -> String {
        self.vars
            .iter()
            .map(|(k, v)| format!("export {}=\"{}\"\n", k, shell_escape(v)))
            .collect()
    }
}

fn shell_escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '"' | '\\' | '$' | '`') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
