//! Style documents - the JSON files the CLI compiles
//!
//! ```json
//! {
//!   "styles": { "button": { "color": "red" } },
//!   "keyframes": { "fade": { "from": { "opacity": 0 } } },
//!   "rules": { "@font-face": { "fontFamily": "Inter" } },
//!   "css": { "body": { "margin": 0 } }
//! }
//! ```

use anyhow::{Context, Result};
use freestyle_core::{Sheet, Styles};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::path::Path;
use tracing::debug;

/// Names registered by a document mapped to their generated identifiers
pub type ClassMap = Map<String, Value>;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StyleDocument {
    /// Named style trees, each registered as a class
    #[serde(default)]
    pub styles: Map<String, Value>,

    /// Named keyframe sets
    #[serde(default)]
    pub keyframes: Map<String, Value>,

    /// Style trees keyed by literal selector or at-rule header
    #[serde(default)]
    pub rules: Map<String, Value>,

    /// Raw CSS tree
    #[serde(default)]
    pub css: Option<Value>,
}

impl StyleDocument {
    pub fn parse(source: &str) -> Result<Self> {
        Ok(serde_json::from_str(source)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&source)
    }

    /// Register every tree into `sheet`
    ///
    /// Keyframe names and class names share the returned map; a keyframe
    /// named like a style overwrites it.
    pub fn register(&self, sheet: &mut Sheet) -> Result<ClassMap> {
        let mut classes = ClassMap::new();

        for (name, tree) in &self.keyframes {
            let styles = to_styles(tree, "keyframes", name)?;
            let id = sheet.register_keyframes(&styles);
            debug!(name = %name, id = %id, "Registered keyframes");
            classes.insert(name.clone(), Value::String(id));
        }

        for (name, tree) in &self.styles {
            let styles = to_styles(tree, "styles", name)?;
            let id = sheet.register_style(&styles);
            debug!(name = %name, id = %id, "Registered style");
            classes.insert(name.clone(), Value::String(id));
        }

        for (header, tree) in &self.rules {
            let styles = to_styles(tree, "rules", header)?;
            sheet.register_rule(header, &styles);
        }

        if let Some(tree) = &self.css {
            let styles = Styles::try_from(tree.clone()).context("Invalid `css` tree")?;
            sheet.register_css(&styles);
        }

        Ok(classes)
    }
}

fn to_styles(tree: &Value, section: &str, name: &str) -> Result<Styles> {
    Styles::try_from(tree.clone()).with_context(|| format!("Invalid `{}.{}`", section, name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use freestyle_core::{create, SheetOptions};

    #[test]
    fn test_register_all_sections() {
        let doc = StyleDocument::parse(
            r#"{
                "css": { "body": { "margin": 0 } },
                "rules": { "@font-face": { "fontFamily": "Inter" } },
                "keyframes": { "fade": { "to": { "opacity": 1 } } },
                "styles": { "button": { "color": "red" } }
            }"#,
        )
        .unwrap();
        let mut sheet = create(SheetOptions::development());

        let classes = doc.register(&mut sheet).unwrap();

        let fade = classes["fade"].as_str().unwrap();
        let button = classes["button"].as_str().unwrap();
        assert_eq!(
            sheet.to_css(),
            format!(
                "@keyframes {}{{to{{opacity:1}}}}.{}{{color:red}}@font-face{{font-family:Inter}}body{{margin:0}}",
                fade, button
            )
        );
    }

    #[test]
    fn test_class_map_keeps_document_order() {
        let doc = StyleDocument::parse(
            r#"{ "styles": { "zeta": { "color": "red" }, "alpha": { "color": "blue" } } }"#,
        )
        .unwrap();
        let mut sheet = create(SheetOptions::development());

        let classes = doc.register(&mut sheet).unwrap();

        let names: Vec<&String> = classes.keys().collect();
        assert_eq!(names, vec!["zeta", "alpha"]);
    }

    #[test]
    fn test_invalid_tree_names_its_location() {
        let doc = StyleDocument::parse(r#"{ "styles": { "button": { "margin": [{}] } } }"#)
            .unwrap();
        let mut sheet = create(SheetOptions::development());

        let err = doc.register(&mut sheet).unwrap_err();
        assert_eq!(err.to_string(), "Invalid `styles.button`");
    }

    #[test]
    fn test_unknown_section_rejected() {
        assert!(StyleDocument::parse(r#"{ "style": {} }"#).is_err());
    }
}
