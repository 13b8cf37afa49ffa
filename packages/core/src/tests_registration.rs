/// Registration tests
/// Tests style trees going through the sheet and coming out as CSS text
use crate::*;

#[cfg(test)]
mod registration_tests {
    use super::*;

    fn dev_sheet() -> Sheet {
        create(SheetOptions::development())
    }

    #[test]
    fn test_same_tree_twice_dedups() {
        let mut sheet = dev_sheet();
        let styles = Styles::new().set("color", "red").set("padding", 4);

        let first = sheet.register_style(&styles);
        let second = sheet.register_style(&styles);

        assert_eq!(first, second);
        assert_eq!(sheet.to_css().matches(&format!(".{}", first)).count(), 1);

        let node = sheet.values().next().expect("one entry");
        assert_eq!(sheet.cache().count(node.id()), 2);
    }

    #[test]
    fn test_declaration_order_independent() {
        let mut a = dev_sheet();
        let mut b = dev_sheet();

        let class_a = a.register_style(&Styles::new().set("color", "red").set("margin", 0));
        let class_b = b.register_style(&Styles::new().set("margin", 0).set("color", "red"));

        assert_eq!(class_a, class_b);
        assert_eq!(a.to_css(), b.to_css());
        assert_eq!(a.to_css(), format!(".{}{{color:red;margin:0}}", class_a));
    }

    #[test]
    fn test_unique_flag_prevents_dedup() {
        let mut sheet = dev_sheet();
        let styles = Styles::new().set("$unique", true).set("color", "red");

        sheet.register_style(&styles);
        sheet.register_style(&styles);

        assert_eq!(sheet.cache().len(), 2);
        assert_eq!(sheet.to_css().matches("{color:red}").count(), 2);
    }

    #[test]
    fn test_selector_interpolation() {
        let mut sheet = dev_sheet();
        let styles = Styles::new()
            .set("&", Styles::new().set("color", "red"))
            .set("&:hover", Styles::new().set("color", "blue"));

        let class = sheet.register_style(&styles);

        assert_eq!(
            sheet.to_css(),
            format!(".{c}{{color:red}}.{c}:hover{{color:blue}}", c = class)
        );
    }

    #[test]
    fn test_descendant_selector_without_ampersand() {
        let mut sheet = dev_sheet();
        let styles = Styles::new().set("span", Styles::new().set("fontWeight", 700));

        let class = sheet.register_style(&styles);

        assert_eq!(sheet.to_css(), format!(".{} span{{font-weight:700}}", class));
    }

    #[test]
    fn test_nested_media_query() {
        let mut sheet = dev_sheet();
        let styles = Styles::new().set(
            "@media (min-width: 100px)",
            Styles::new().set("color", "red"),
        );

        let class = sheet.register_style(&styles);

        assert_eq!(
            sheet.to_css(),
            format!("@media (min-width: 100px){{.{}{{color:red}}}}", class)
        );
    }

    #[test]
    fn test_media_query_with_nested_selector() {
        let mut sheet = dev_sheet();
        let styles = Styles::new().set(
            "@media print",
            Styles::new()
                .set("display", "block")
                .set("& a", Styles::new().set("color", "black")),
        );

        let class = sheet.register_style(&styles);

        assert_eq!(
            sheet.to_css(),
            format!(
                "@media print{{.{c}{{display:block}}.{c} a{{color:black}}}}",
                c = class
            )
        );
    }

    #[test]
    fn test_numeric_unit_policy() {
        let mut sheet = dev_sheet();

        let opacity = sheet.register_style(&Styles::new().set("opacity", 0.5));
        let margin = sheet.register_style(&Styles::new().set("margin", 10));

        assert_eq!(
            sheet.to_css(),
            format!(".{}{{opacity:0.5}}.{}{{margin:10px}}", opacity, margin)
        );
    }

    #[test]
    fn test_insertion_order_across_registrations() {
        let mut sheet = dev_sheet();

        let z = sheet.register_style(&Styles::new().set("zIndex", 10));
        sheet.register_rule("body", &Styles::new().set("margin", 0));
        let a = sheet.register_style(&Styles::new().set("color", "red"));

        assert_eq!(
            sheet.to_css(),
            format!(".{}{{z-index:10}}body{{margin:0}}.{}{{color:red}}", z, a)
        );
    }

    #[test]
    fn test_shared_declarations_across_registrations() {
        let mut sheet = dev_sheet();

        sheet.register_rule(".legacy", &Styles::new().set("color", "red"));
        sheet.register_rule(".other", &Styles::new().set("color", "red"));

        assert_eq!(sheet.to_css(), ".legacy,.other{color:red}");
    }

    #[test]
    fn test_fallback_values() {
        let mut sheet = dev_sheet();
        let class = sheet.register_style(
            &Styles::new().set("display", vec!["-webkit-flex", "flex"]),
        );

        assert_eq!(
            sheet.to_css(),
            format!(".{}{{display:-webkit-flex;display:flex}}", class)
        );
    }

    #[test]
    fn test_nested_order_preserved_below_root() {
        // Below the outermost tree authoring order wins over sorting.
        let mut sheet = dev_sheet();
        let styles = Styles::new().set(
            "@media print",
            Styles::new()
                .set("&:hover", Styles::new().set("color", "red"))
                .set("&:active", Styles::new().set("color", "blue")),
        );
        let class = sheet.register_style(&styles);

        assert_eq!(
            sheet.to_css(),
            format!(
                "@media print{{.{c}:hover{{color:red}}.{c}:active{{color:blue}}}}",
                c = class
            )
        );
    }

    #[test]
    fn test_style_top_level_blocks_keep_authoring_order() {
        // "span" sorts after "&:hover" but is written first.
        let mut sheet = dev_sheet();
        let styles = Styles::new()
            .set("span", Styles::new().set("color", "red"))
            .set("&:hover", Styles::new().set("color", "blue"));

        let class = sheet.register_style(&styles);

        assert_eq!(
            sheet.to_css(),
            format!(".{c} span{{color:red}}.{c}:hover{{color:blue}}", c = class)
        );
    }

    #[test]
    fn test_root_order_sorted_for_css() {
        let mut a = dev_sheet();
        a.register_css(
            &Styles::new()
                .set("p", Styles::new().set("margin", 0))
                .set("a", Styles::new().set("color", "red")),
        );

        assert_eq!(a.to_css(), "a{color:red}p{margin:0}");
    }

    #[test]
    fn test_keyframes_and_style_referencing_them() {
        let mut sheet = dev_sheet();
        let fade = sheet.register_keyframes(
            &Styles::new()
                .set("from", Styles::new().set("opacity", 0))
                .set("to", Styles::new().set("opacity", 1)),
        );
        let class = sheet.register_style(
            &Styles::new().set("animation", format!("{} 1s", fade)),
        );

        let css = sheet.to_css();
        assert!(css.starts_with(&format!("@keyframes {}{{", fade)));
        assert!(css.ends_with(&format!(".{}{{animation:{} 1s}}", class, fade)));
    }

    #[test]
    fn test_styles_from_json_register_like_builder() {
        let parsed = Styles::from_json_str(
            r#"{"color": "red", "&:hover": {"color": "blue"}, "margin": 10}"#,
        )
        .expect("valid json");
        let built = Styles::new()
            .set("margin", 10)
            .set("color", "red")
            .set("&:hover", Styles::new().set("color", "blue"));

        let mut a = dev_sheet();
        let mut b = dev_sheet();
        assert_eq!(a.register_style(&parsed), b.register_style(&built));
        assert_eq!(a.to_css(), b.to_css());
    }
}
