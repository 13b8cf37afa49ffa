//! Composer - turns stylizer output into cache nodes
//!
//! Flat styles are inserted before blocks, each in accumulator order; the
//! sheet text follows cache insertion order so this order is observable.

use crate::cache::Cache;
use crate::id_generator::unique_style_id;
use crate::nodes::{Node, Rule, Selector, Style};
use crate::stylizer::{StylizeRule, StylizeStyle};
use crate::utils::interpolate;

/// Build nodes for the accumulators and add them to `cache`
///
/// When `is_style` is set every selector is resolved against `class_name`
/// (the generated class of a registered style); otherwise selectors are
/// used as authored.
pub fn compose(
    cache: &mut Cache<Node>,
    pid: &str,
    rules: &[StylizeRule],
    styles: &[StylizeStyle],
    class_name: &str,
    is_style: bool,
) {
    for entry in styles {
        let selector = if is_style {
            interpolate(&entry.selector, class_name)
        } else {
            entry.selector.clone()
        };

        let id = if entry.is_unique {
            unique_style_id()
        } else {
            format!("s\0{}\0{}", pid, entry.style)
        };

        let mut style = Style::new(entry.style.clone(), id);
        let selector_id = format!("k\0{}\0{}", pid, selector);
        style.add_selector(Selector::new(selector, selector_id));
        cache.add(Node::Style(style));
    }

    for entry in rules {
        let id = format!("r\0{}\0{}\0{}", pid, entry.selector, entry.style);
        let mut rule = Rule::new(entry.selector.clone(), entry.style.clone(), id);
        compose(
            rule.children_mut(),
            pid,
            &entry.rules,
            &entry.styles,
            class_name,
            is_style,
        );
        cache.add(Node::Rule(rule));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::Container;
    use crate::stylizer::stylize;
    use crate::value::Styles;

    fn compose_styles(styles: &Styles, class_name: &str) -> Cache<Node> {
        let mut rules = Vec::new();
        let mut styles_list = Vec::new();
        let pid = stylize("&", styles, &mut rules, &mut styles_list, None);

        let mut cache = Cache::new();
        compose(&mut cache, &pid, &rules, &styles_list, class_name, true);
        cache
    }

    #[test]
    fn test_flat_styles_before_blocks() {
        let styles = Styles::new()
            .set("@media print", Styles::new().set("display", "none"))
            .set("color", "red")
            .set("&:hover", Styles::new().set("color", "blue"));
        let cache = compose_styles(&styles, ".x");

        assert_eq!(
            cache.sheet(),
            &[
                ".x{color:red}",
                ".x:hover{color:blue}",
                "@media print{.x{display:none}}",
            ]
        );
    }

    #[test]
    fn test_same_declarations_share_one_style() {
        let styles = Styles::new()
            .set("color", "red")
            .set("&:focus", Styles::new().set("color", "red"));
        let cache = compose_styles(&styles, ".x");

        assert_eq!(cache.sheet(), &[".x,.x:focus{color:red}"]);
    }

    #[test]
    fn test_selectors_kept_verbatim_without_is_style() {
        let styles = Styles::new().set("color", "red");
        let mut rules = Vec::new();
        let mut styles_list = Vec::new();
        let pid = stylize("body", &styles, &mut rules, &mut styles_list, None);

        let mut cache = Cache::new();
        compose(&mut cache, &pid, &rules, &styles_list, "", false);

        assert_eq!(cache.sheet(), &["body{color:red}"]);
    }

    #[test]
    fn test_unique_styles_get_fresh_ids() {
        let styles = Styles::new().set("$unique", true).set("color", "red");
        let first = compose_styles(&styles, ".x");
        let second = compose_styles(&styles, ".x");

        let first_id = first.values().next().map(|n| n.id().to_string());
        let second_id = second.values().next().map(|n| n.id().to_string());
        assert_ne!(first_id, second_id);
    }
}
