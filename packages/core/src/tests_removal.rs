/// Removal and change-notification tests
/// Tests revoking registrations and mirroring a sheet from its patches
use crate::*;
use std::rc::Rc;

#[cfg(test)]
mod removal_tests {
    use super::*;

    fn component_sheet(styles: &Styles) -> (Sheet, String) {
        let mut sheet = create(SheetOptions::development());
        let class = sheet.register_style(styles);
        (sheet, class)
    }

    fn logged_sheet() -> (Rc<ChangeLog>, Sheet) {
        let log = Rc::new(ChangeLog::new());
        let sheet = create_with_changes(SheetOptions::development(), log.clone());
        (log, sheet)
    }

    #[test]
    fn test_refcount_gated_removal() {
        let (log, mut main) = logged_sheet();
        let styles = Styles::new().set("color", "red");

        let components: Vec<(Sheet, String)> = (0..3).map(|_| component_sheet(&styles)).collect();
        for (component, _) in &components {
            main.merge(component);
        }

        let class = &components[0].1;
        assert_eq!(main.to_css(), format!(".{}{{color:red}}", class));

        main.unmerge(&components[0].0);
        main.unmerge(&components[1].0);
        assert_eq!(main.to_css(), format!(".{}{{color:red}}", class));

        let removes = |patches: &[SheetPatch]| {
            patches
                .iter()
                .filter(|p| matches!(p, SheetPatch::Remove { .. }))
                .count()
        };
        assert_eq!(removes(&log.patches()), 0);

        main.unmerge(&components[2].0);
        assert_eq!(main.to_css(), "");
        assert_eq!(removes(&log.patches()), 1);
    }

    #[test]
    fn test_removal_leaves_unrelated_entries() {
        let mut main = create(SheetOptions::development());
        let (button, button_class) = component_sheet(&Styles::new().set("color", "red"));
        let (card, card_class) = component_sheet(&Styles::new().set("padding", 8));

        main.merge(&button).merge(&card);
        main.unmerge(&button);

        assert_eq!(main.to_css(), format!(".{}{{padding:8px}}", card_class));
        assert!(!main.to_css().contains(&button_class));
    }

    #[test]
    fn test_shared_selector_removal_rerenders_entry() {
        let (log, mut main) = logged_sheet();

        let mut legacy = create(SheetOptions::development());
        legacy.register_rule(".legacy", &Styles::new().set("color", "red"));
        let mut modern = create(SheetOptions::development());
        modern.register_rule(".modern", &Styles::new().set("color", "red"));

        main.merge(&legacy).merge(&modern);
        assert_eq!(main.to_css(), ".legacy,.modern{color:red}");

        main.unmerge(&legacy);
        assert_eq!(main.to_css(), ".modern{color:red}");
        assert_eq!(
            log.patches().last(),
            Some(&SheetPatch::Change {
                index: 0,
                css: ".modern{color:red}".to_string(),
            })
        );
    }

    #[test]
    fn test_nested_rule_removal_cascades() {
        let mut main = create(SheetOptions::development());
        let styles = Styles::new().set(
            "@media print",
            Styles::new()
                .set("display", "none")
                .set("& a", Styles::new().set("color", "black")),
        );
        let (component, _) = component_sheet(&styles);

        main.merge(&component);
        assert_eq!(main.cache().len(), 1);

        main.unmerge(&component);
        assert!(main.cache().is_empty());
        assert_eq!(main.to_css(), "");
    }

    #[test]
    fn test_mirror_follows_patches() {
        let (log, mut main) = logged_sheet();
        let mut mirror: Vec<String> = Vec::new();

        let (button, _) = component_sheet(&Styles::new().set("color", "red"));
        let (card, _) = component_sheet(
            &Styles::new()
                .set("padding", 8)
                .set("@media print", Styles::new().set("display", "none")),
        );
        let mut alias = create(SheetOptions::development());
        alias.register_rule(".alias", &Styles::new().set("color", "red"));

        main.merge(&button);
        main.merge(&card);
        main.merge(&alias);
        main.register_rule("body", &Styles::new().set("margin", 0));
        main.unmerge(&button);
        main.unmerge(&card);

        apply_patches(&mut mirror, &log.take());

        assert_eq!(mirror.concat(), main.to_css());
        assert_eq!(mirror, main.cache().sheet());
        assert!(log.is_empty());
    }

    #[test]
    fn test_over_removal_is_silent() {
        let (log, mut main) = logged_sheet();
        let (component, _) = component_sheet(&Styles::new().set("color", "red"));

        main.unmerge(&component);
        assert!(log.is_empty());

        main.merge(&component);
        main.unmerge(&component);
        main.unmerge(&component);

        assert_eq!(main.to_css(), "");
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn test_sheets_nest_in_a_cache() {
        let mut registry: Cache<Sheet> = Cache::new();
        let mut first = Sheet::new("app", SheetOptions::development());
        first.register_rule("body", &Styles::new().set("margin", 0));
        let mut second = Sheet::new("app", SheetOptions::development());
        second.register_rule("html", &Styles::new().set("color", "black"));

        registry.add(first.clone());
        registry.add(second.clone());
        assert_eq!(registry.sheet(), &["body{margin:0}html{color:black}"]);

        registry.remove(&second);
        assert_eq!(registry.sheet(), &["body{margin:0}"]);
    }
}
