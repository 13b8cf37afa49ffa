//! Style tree parser - normalizes one level of a nested style tree
//!
//! Declarations are hyphenated, sorted and rendered to text so equivalent
//! trees always produce the same declaration block. Nested selectors are
//! handed back to the stylizer untouched.

use crate::utils::{hyphenate, is_unitless};
use crate::value::{Scalar, StyleValue, Styles};

/// Sigil that marks control keys such as `$unique`.
const CONTROL_KEY_SIGIL: char = '$';

/// One level of a style tree after parsing
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedStyles<'a> {
    /// Rendered declaration block, e.g. `color:red;margin:10px`
    pub style: String,
    /// Nested selectors and at-rules with their sub-trees
    pub nested: Vec<(&'a str, &'a Styles)>,
    pub is_unique: bool,
}

/// Parse a single level of a style tree
///
/// `has_nested_styles` is false only for the outermost tree of a walk.
/// Nested entries are sorted by name in that case, and keep their
/// authoring order everywhere else.
pub fn parse_styles(styles: &Styles, has_nested_styles: bool) -> ParsedStyles<'_> {
    let mut properties: Vec<(String, &StyleValue)> = Vec::new();
    let mut nested: Vec<(&str, &Styles)> = Vec::new();

    for (key, value) in styles.iter() {
        let name = key.trim();

        if name.starts_with(CONTROL_KEY_SIGIL) || value.is_null() {
            continue;
        }

        match value {
            StyleValue::Nested(child) => nested.push((name, child)),
            _ => properties.push((hyphenate(name), value)),
        }
    }

    properties.sort_by(|a, b| a.0.cmp(&b.0));
    if !has_nested_styles {
        nested.sort_by(|a, b| a.0.cmp(b.0));
    }

    ParsedStyles {
        style: stringify_properties(&properties),
        nested,
        is_unique: styles.is_unique(),
    }
}

fn stringify_properties(properties: &[(String, &StyleValue)]) -> String {
    properties
        .iter()
        .map(|(name, value)| match value {
            StyleValue::List(items) => items
                .iter()
                .map(|item| style_to_string(name, item))
                .collect::<Vec<_>>()
                .join(";"),
            StyleValue::Scalar(scalar) => style_to_string(name, scalar),
            // Filtered out while parsing.
            StyleValue::Null | StyleValue::Nested(_) => String::new(),
        })
        .collect::<Vec<_>>()
        .join(";")
}

/// Render a single `name:value` declaration
///
/// Non-zero numbers get a `px` suffix unless the property is unit-less.
/// Both zeros render as a bare `0`.
fn style_to_string(name: &str, value: &Scalar) -> String {
    match value {
        Scalar::Number(n) if *n == 0.0 => format!("{}:0", name),
        Scalar::Number(_) if !is_unitless(name) => {
            format!("{}:{}px", name, value)
        }
        _ => format!("{}:{}", name, value),
    }
}
