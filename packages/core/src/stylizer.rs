//! Stylizer - flattens a nested style tree into rules and styles
//!
//! The walk produces two accumulators: flat styles (selector plus
//! declaration block) and blocks (at-rules wrapping their own
//! accumulators). Alongside it builds the fingerprint that seeds every
//! identifier downstream.

use crate::parser::parse_styles;
use crate::utils::interpolate;
use crate::value::Styles;

/// A selector bound to a rendered declaration block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StylizeStyle {
    pub selector: String,
    pub style: String,
    pub is_unique: bool,
}

/// An at-rule block collected during the walk
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StylizeRule {
    pub selector: String,
    /// Declarations owned directly by the block (only for top-level blocks)
    pub style: String,
    pub rules: Vec<StylizeRule>,
    pub styles: Vec<StylizeStyle>,
}

/// Walk `styles` under `selector`, appending to the accumulators
///
/// Returns the fingerprint of this subtree: its declaration block followed
/// by `name + fingerprint` for every nested entry.
pub fn stylize(
    selector: &str,
    styles: &Styles,
    rules: &mut Vec<StylizeRule>,
    styles_list: &mut Vec<StylizeStyle>,
    parent: Option<&str>,
) -> String {
    // An empty parent behaves like no parent at all.
    let parent = parent.filter(|parent| !parent.is_empty());
    let parsed = parse_styles(styles, !selector.is_empty());
    let mut pid = parsed.style.clone();

    if selector.starts_with('@') {
        let mut block = StylizeRule {
            selector: selector.to_string(),
            style: if parent.is_some() {
                String::new()
            } else {
                parsed.style.clone()
            },
            rules: Vec::new(),
            styles: Vec::new(),
        };

        // Declarations inside a nested at-rule apply to the enclosing selector.
        if let Some(parent) = parent {
            if !parsed.style.is_empty() {
                block.styles.push(StylizeStyle {
                    selector: parent.to_string(),
                    style: parsed.style.clone(),
                    is_unique: parsed.is_unique,
                });
            }
        }

        for (name, child) in &parsed.nested {
            pid.push_str(name);
            pid.push_str(&stylize(
                name,
                child,
                &mut block.rules,
                &mut block.styles,
                parent,
            ));
        }

        rules.push(block);
    } else {
        let key = match parent {
            Some(parent) => interpolate(selector, parent),
            None => selector.to_string(),
        };

        if !parsed.style.is_empty() {
            styles_list.push(StylizeStyle {
                selector: key.clone(),
                style: parsed.style.clone(),
                is_unique: parsed.is_unique,
            });
        }

        for (name, child) in &parsed.nested {
            pid.push_str(name);
            pid.push_str(&stylize(name, child, rules, styles_list, Some(key.as_str())));
        }
    }

    pid
}
