//! Stylesheet node kinds stored in a [`Cache`]

use crate::cache::{Cache, Container};

/// A single selector. Never mutated once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    selector: String,
    id: String,
}

impl Selector {
    pub fn new(selector: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            id: id.into(),
        }
    }

    pub fn selector(&self) -> &str {
        &self.selector
    }
}

impl Container for Selector {
    const COMPOSITE: bool = false;

    fn id(&self) -> &str {
        &self.id
    }

    fn to_css(&self) -> String {
        self.selector.clone()
    }
}

/// A declaration block shared by every selector in it
///
/// Renders as `.a,.b{color:red}`.
#[derive(Debug, Clone)]
pub struct Style {
    style: String,
    id: String,
    selectors: Cache<Selector>,
}

impl Style {
    pub fn new(style: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            style: style.into(),
            id: id.into(),
            selectors: Cache::new(),
        }
    }

    pub fn style(&self) -> &str {
        &self.style
    }

    pub fn add_selector(&mut self, selector: Selector) {
        self.selectors.add(selector);
    }

    pub fn selectors(&self) -> &Cache<Selector> {
        &self.selectors
    }
}

impl Container for Style {
    const COMPOSITE: bool = true;

    fn id(&self) -> &str {
        &self.id
    }

    fn to_css(&self) -> String {
        format!("{}{{{}}}", self.selectors.sheet().join(","), self.style)
    }

    fn change_id(&self) -> u64 {
        self.selectors.change_id()
    }

    fn merge_children(&mut self, other: &Self) {
        self.selectors.merge(&other.selectors);
    }

    fn unmerge_children(&mut self, other: &Self) {
        self.selectors.unmerge(&other.selectors);
    }
}

/// A block such as `@media` or `@keyframes` wrapping nested nodes
///
/// Renders as `header{own-declarations children...}`.
#[derive(Debug, Clone)]
pub struct Rule {
    rule: String,
    style: String,
    id: String,
    children: Cache<Node>,
}

impl Rule {
    pub fn new(rule: impl Into<String>, style: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            rule: rule.into(),
            style: style.into(),
            id: id.into(),
            children: Cache::new(),
        }
    }

    pub fn rule(&self) -> &str {
        &self.rule
    }

    pub fn style(&self) -> &str {
        &self.style
    }

    pub fn children(&self) -> &Cache<Node> {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut Cache<Node> {
        &mut self.children
    }
}

impl Container for Rule {
    const COMPOSITE: bool = true;

    fn id(&self) -> &str {
        &self.id
    }

    fn to_css(&self) -> String {
        format!("{}{{{}{}}}", self.rule, self.style, self.children.sheet().concat())
    }

    fn change_id(&self) -> u64 {
        self.children.change_id()
    }

    fn merge_children(&mut self, other: &Self) {
        self.children.merge(&other.children);
    }

    fn unmerge_children(&mut self, other: &Self) {
        self.children.unmerge(&other.children);
    }
}

/// Anything that can sit directly in a sheet or inside a rule
#[derive(Debug, Clone)]
pub enum Node {
    Style(Style),
    Rule(Rule),
}

impl Node {
    pub fn as_style(&self) -> Option<&Style> {
        match self {
            Node::Style(style) => Some(style),
            Node::Rule(_) => None,
        }
    }

    pub fn as_rule(&self) -> Option<&Rule> {
        match self {
            Node::Rule(rule) => Some(rule),
            Node::Style(_) => None,
        }
    }
}

impl From<Style> for Node {
    fn from(style: Style) -> Self {
        Node::Style(style)
    }
}

impl From<Rule> for Node {
    fn from(rule: Rule) -> Self {
        Node::Rule(rule)
    }
}

impl Container for Node {
    const COMPOSITE: bool = true;

    fn id(&self) -> &str {
        match self {
            Node::Style(style) => style.id(),
            Node::Rule(rule) => rule.id(),
        }
    }

    fn to_css(&self) -> String {
        match self {
            Node::Style(style) => style.to_css(),
            Node::Rule(rule) => rule.to_css(),
        }
    }

    fn change_id(&self) -> u64 {
        match self {
            Node::Style(style) => style.change_id(),
            Node::Rule(rule) => rule.change_id(),
        }
    }

    fn merge_children(&mut self, other: &Self) {
        match (self, other) {
            (Node::Style(style), Node::Style(other)) => style.merge_children(other),
            (Node::Rule(rule), Node::Rule(other)) => rule.merge_children(other),
            // Ids are prefixed by kind, so a mismatch never shares an entry.
            _ => {}
        }
    }

    fn unmerge_children(&mut self, other: &Self) {
        match (self, other) {
            (Node::Style(style), Node::Style(other)) => style.unmerge_children(other),
            (Node::Rule(rule), Node::Rule(other)) => rule.unmerge_children(other),
            _ => {}
        }
    }
}
