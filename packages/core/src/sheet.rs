//! Sheet - the top-level stylesheet and its registration API

use crate::cache::{Cache, Changes, Container};
use crate::composer::compose;
use crate::id_generator::sheet_id;
use crate::nodes::{Node, Rule};
use crate::stylizer::{stylize, StylizeRule, StylizeStyle};
use crate::utils::{escape, string_hash};
use crate::value::Styles;
use serde::{Deserialize, Serialize};
use std::rc::Rc;
use tracing::{debug, instrument};

/// Environment variable consulted by [`SheetOptions::from_env`].
pub const ENV_VAR: &str = "FREESTYLE_ENV";

/// Sheet behaviour switches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetOptions {
    /// Drop `$displayName` labels and skip selector escaping
    #[serde(default)]
    pub production: bool,
}

impl SheetOptions {
    pub fn development() -> Self {
        Self { production: false }
    }

    pub fn production() -> Self {
        Self { production: true }
    }

    /// Production mode when `FREESTYLE_ENV=production`
    pub fn from_env() -> Self {
        let production = std::env::var(ENV_VAR)
            .map(|value| value.eq_ignore_ascii_case("production"))
            .unwrap_or(false);
        Self { production }
    }
}

/// Top-level stylesheet
///
/// Every registration composes nodes straight into the sheet's cache, so
/// identical content registered twice shares one entry with a reference
/// count of two.
#[derive(Debug)]
pub struct Sheet {
    id: String,
    options: SheetOptions,
    cache: Cache<Node>,
}

impl Sheet {
    pub fn new(id: impl Into<String>, options: SheetOptions) -> Self {
        Self {
            id: id.into(),
            options,
            cache: Cache::new(),
        }
    }

    pub fn with_changes(
        id: impl Into<String>,
        options: SheetOptions,
        changes: Rc<dyn Changes<Node>>,
    ) -> Self {
        Self {
            id: id.into(),
            options,
            cache: Cache::with_changes(changes),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn options(&self) -> SheetOptions {
        self.options
    }

    /// Register a style tree and return its class name
    #[instrument(skip(self, styles), fields(sheet = %self.id))]
    pub fn register_style(&mut self, styles: &Styles) -> String {
        let (pid, rules, styles_list) = flatten("&", styles);
        let id = self.key(&pid, styles);
        let class_name = format!(".{}", self.escape_id(&id));

        debug!(
            class = %id,
            styles = styles_list.len(),
            rules = rules.len(),
            "Registering style"
        );
        compose(&mut self.cache, &pid, &rules, &styles_list, &class_name, true);
        id
    }

    /// Register `@keyframes` and return the generated animation name
    pub fn register_keyframes(&mut self, keyframes: &Styles) -> String {
        self.register_hash_rule("@keyframes", keyframes)
    }

    /// Register an at-rule whose name is derived from its content
    ///
    /// `register_hash_rule("@keyframes", ...)` renders as
    /// `@keyframes <id>{...}` and returns `<id>`.
    #[instrument(skip(self, styles), fields(sheet = %self.id))]
    pub fn register_hash_rule(&mut self, prefix: &str, styles: &Styles) -> String {
        let (pid, rules, styles_list) = flatten("", styles);
        let id = self.key(&pid, styles);
        let selector = format!("{} {}", prefix, self.escape_id(&id));

        let rule_id = format!("h\0{}\0{}", pid, selector);
        let mut rule = Rule::new(selector, "", rule_id);
        compose(rule.children_mut(), &pid, &rules, &styles_list, "", false);

        debug!(name = %id, "Registering hash rule");
        self.cache.add(Node::Rule(rule));
        id
    }

    /// Register a style tree under a literal selector or at-rule
    #[instrument(skip(self, styles), fields(sheet = %self.id))]
    pub fn register_rule(&mut self, rule: &str, styles: &Styles) {
        let (pid, rules, styles_list) = flatten(rule, styles);

        debug!(
            styles = styles_list.len(),
            rules = rules.len(),
            "Registering rule"
        );
        compose(&mut self.cache, &pid, &rules, &styles_list, "", false);
    }

    /// Register raw CSS where every top-level key is a selector or at-rule
    pub fn register_css(&mut self, styles: &Styles) {
        self.register_rule("", styles);
    }

    /// Full stylesheet text, entries in insertion order
    pub fn to_css(&self) -> String {
        self.cache.sheet().concat()
    }

    pub fn add(&mut self, node: Node) {
        self.cache.add(node);
    }

    pub fn remove(&mut self, node: &Node) {
        self.cache.remove(node);
    }

    /// Take one reference to every entry of `other`
    pub fn merge(&mut self, other: &Sheet) -> &mut Self {
        self.cache.merge(&other.cache);
        self
    }

    /// Release one reference to every entry of `other`
    pub fn unmerge(&mut self, other: &Sheet) -> &mut Self {
        self.cache.unmerge(&other.cache);
        self
    }

    pub fn values(&self) -> impl Iterator<Item = &Node> + '_ {
        self.cache.values()
    }

    pub fn cache(&self) -> &Cache<Node> {
        &self.cache
    }

    pub fn change_id(&self) -> u64 {
        self.cache.change_id()
    }

    fn key(&self, pid: &str, styles: &Styles) -> String {
        let key = format!("f{}", string_hash(pid));

        match styles.display_name() {
            Some(name) if !self.options.production => format!("{}_{}", name, key),
            _ => key,
        }
    }

    fn escape_id(&self, id: &str) -> String {
        if self.options.production {
            id.to_string()
        } else {
            escape(id)
        }
    }
}

/// Copy sharing the observer of the original
///
/// The observer sees an `add` for every entry copied over.
impl Clone for Sheet {
    fn clone(&self) -> Self {
        let mut sheet = Sheet::with_changes(self.id.clone(), self.options, self.cache.changes());
        sheet.merge(self);
        sheet
    }
}

impl Container for Sheet {
    const COMPOSITE: bool = true;

    fn id(&self) -> &str {
        &self.id
    }

    fn to_css(&self) -> String {
        Sheet::to_css(self)
    }

    fn change_id(&self) -> u64 {
        self.cache.change_id()
    }

    fn merge_children(&mut self, other: &Self) {
        self.merge(other);
    }

    fn unmerge_children(&mut self, other: &Self) {
        self.unmerge(other);
    }
}

/// Create a sheet with a fresh id
pub fn create(options: SheetOptions) -> Sheet {
    Sheet::new(sheet_id(), options)
}

/// Create a sheet with a fresh id that reports changes to `changes`
pub fn create_with_changes(options: SheetOptions, changes: Rc<dyn Changes<Node>>) -> Sheet {
    Sheet::with_changes(sheet_id(), options, changes)
}

fn flatten(selector: &str, styles: &Styles) -> (String, Vec<StylizeRule>, Vec<StylizeStyle>) {
    let mut rules = Vec::new();
    let mut styles_list = Vec::new();
    let pid = stylize(selector, styles, &mut rules, &mut styles_list, None);
    (pid, rules, styles_list)
}
