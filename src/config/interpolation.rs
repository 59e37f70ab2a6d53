//! Path template interpolation.
//!
//! Profile templates reference their install directories using `${name}`
//! syntax.
//!
//! # Syntax
//!
//! - `${release_dir}` - replaced with the release-time install directory
//! - `${build_dir}` - replaced with the build-time install directory
//! - `$${escaped}` - produces literal `${escaped}` in output
//!
//! # Example
//!
//! ```
//! use native_deps::config::{render, TemplateContext};
//!
//! let ctx = TemplateContext::new().with("release_dir", "/app/vendor/freetds");
//! assert_eq!(render("${release_dir}/lib", &ctx), "/app/vendor/freetds/lib");
//! ```

use crate::error::{ProvisionError, Result};
use std::collections::{HashMap, HashSet};

/// Variable names a profile template may reference.
pub const TEMPLATE_VARIABLES: &[&str] = &["build_dir", "release_dir"];

/// A segment of an interpolated string.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// Literal text
    Literal(String),
    /// Variable reference: ${name}
    Variable(String),
}

/// Parse a string containing `${var}` interpolations.
pub fn parse_interpolation(input: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut chars = input.chars().peekable();
    let mut current_literal = String::new();

    while let Some(c) = chars.next() {
        if c != '$' {
            current_literal.push(c);
            continue;
        }

        match chars.peek() {
            Some('$') => {
                chars.next();
                if chars.peek() == Some(&'{') {
                    // $${...} -> literal ${...}
                    chars.next();
                    current_literal.push_str("${");
                    for c in chars.by_ref() {
                        current_literal.push(c);
                        if c == '}' {
                            break;
                        }
                    }
                } else {
                    current_literal.push('$');
                }
            }
            Some('{') => {
                chars.next();

                if !current_literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut current_literal)));
                }

                let mut var_name = String::new();
                for c in chars.by_ref() {
                    if c == '}' {
                        break;
                    }
                    var_name.push(c);
                }

                segments.push(Segment::Variable(var_name));
            }
            _ => current_literal.push(c),
        }
    }

    if !current_literal.is_empty() {
        segments.push(Segment::Literal(current_literal));
    }

    segments
}

/// Extract all variable names from an interpolated string.
pub fn extract_variables(input: &str) -> HashSet<String> {
    parse_interpolation(input)
        .into_iter()
        .filter_map(|seg| match seg {
            Segment::Variable(name) => Some(name),
            _ => None,
        })
        .collect()
}

/// Check a template only references known variables.
///
/// # Errors
///
/// Returns `ConfigValidationError` naming the first unknown variable.
pub fn validate_template(input: &str) -> Result<()> {
    let mut unknown: Vec<String> = extract_variables(input)
        .into_iter()
        .filter(|name| !TEMPLATE_VARIABLES.contains(&name.as_str()))
        .collect();
    unknown.sort();

    match unknown.first() {
        Some(name) => Err(ProvisionError::ConfigValidationError {
            message: format!("Unknown template variable ${{{}}} in '{}'", name, input),
        }),
        None => Ok(()),
    }
}

/// Values available while rendering templates.
#[derive(Debug, Default, Clone)]
pub struct TemplateContext {
    vars: HashMap<String, String>,
}

impl TemplateContext {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a variable.
    pub fn with(mut self, name: &str, value: impl Into<String>) -> Self {
        self.vars.insert(name.to_string(), value.into());
        self
    }

    /// Look up a variable.
    pub fn resolve(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }
}

/// Render a template, leaving unknown variables verbatim.
///
/// Templates are validated when profiles are built, so this never fails.
pub fn render(input: &str, context: &TemplateContext) -> String {
    let mut result = String::new();

    for segment in parse_interpolation(input) {
        match segment {
            Segment::Literal(text) => result.push_str(&text),
            Segment::Variable(name) => match context.resolve(&name) {
                Some(value) => result.push_str(value),
                None => {
                    result.push_str("${");
                    result.push_str(&name);
                    result.push('}');
                }
            },
        }
    }

    result
}
