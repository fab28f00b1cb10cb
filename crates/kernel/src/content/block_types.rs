//! Block schema registry.
//!
//! Provides:
//! - `BlockDefinition`: label, default props and editable fields of one block type
//! - `FieldDescriptor`: one editable property and its input kind
//! - `BlockRegistry`: the ordered catalogue, looked up by type name
//!
//! The registry is the single schema shared by form generation, default
//! instance creation and the typed decode step before rendering.

use std::collections::HashMap;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::models::{Props, into_props};

/// Input kind of an editable property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Textarea,
    Number,
    Boolean,
    Url,
    Image,
}

/// One editable property of a block type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Property key in `BlockInstance.props`.
    pub key: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: FieldKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<i64>,
}

impl FieldDescriptor {
    fn new(key: &str, label: &str, kind: FieldKind) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            kind,
            min: None,
            max: None,
        }
    }

    fn number(key: &str, label: &str, min: i64, max: i64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
            ..Self::new(key, label, FieldKind::Number)
        }
    }
}

/// Catalogue entry for a single block type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockDefinition {
    /// Machine name (e.g. "hero", "car_grid").
    #[serde(rename = "type")]
    pub block_type: String,
    /// Human-readable label shown in the block menu.
    pub label: String,
    /// Props a freshly added instance starts with.
    pub default_props: Props,
    /// Editable fields in form order.
    pub fields: Vec<FieldDescriptor>,
}

impl BlockDefinition {
    /// Find a field descriptor by property key.
    pub fn field(&self, key: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.key == key)
    }
}

/// Ordered catalogue of block definitions.
#[derive(Debug, Clone, Default)]
pub struct BlockRegistry {
    definitions: Vec<BlockDefinition>,
    index: HashMap<String, usize>,
}

static STANDARD: LazyLock<BlockRegistry> = LazyLock::new(BlockRegistry::with_standard_types);

impl BlockRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide standard catalogue.
    pub fn standard() -> &'static BlockRegistry {
        &STANDARD
    }

    /// Create a registry pre-populated with the 13 standard block types.
    pub fn with_standard_types() -> Self {
        let mut registry = Self::new();
        registry.register_standard_types();
        registry
    }

    /// Register a block type. Re-registering a type replaces its
    /// definition in place and keeps its catalogue position.
    pub fn register(&mut self, definition: BlockDefinition) {
        match self.index.get(&definition.block_type) {
            Some(&pos) => self.definitions[pos] = definition,
            None => {
                self.index
                    .insert(definition.block_type.clone(), self.definitions.len());
                self.definitions.push(definition);
            }
        }
    }

    /// All definitions in catalogue order.
    pub fn list_definitions(&self) -> &[BlockDefinition] {
        &self.definitions
    }

    /// Look up a block type by name.
    pub fn get_definition(&self, block_type: &str) -> Option<&BlockDefinition> {
        self.index.get(block_type).map(|&pos| &self.definitions[pos])
    }

    pub fn contains(&self, block_type: &str) -> bool {
        self.index.contains_key(block_type)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    fn define(
        &mut self,
        block_type: &str,
        label: &str,
        defaults: serde_json::Value,
        fields: Vec<FieldDescriptor>,
    ) {
        self.register(BlockDefinition {
            block_type: block_type.to_string(),
            label: label.to_string(),
            default_props: into_props(defaults),
            fields,
        });
    }

    /// Register the standard catalogue in menu order.
    pub fn register_standard_types(&mut self) {
        use FieldKind::{Boolean, Image, Text, Textarea, Url};

        self.define(
            "hero",
            "Hero",
            json!({ "headline": "Headline", "subline": "Subheadline", "bgImage": "" }),
            vec![
                FieldDescriptor::new("headline", "Headline", Text),
                FieldDescriptor::new("subline", "Subheadline", Textarea),
                FieldDescriptor::new("bgImage", "Background image", Image),
            ],
        );
        self.define(
            "ai_prompt",
            "AI Prompt",
            json!({ "placeholder": "Ask the AI…", "cta": "Ask" }),
            vec![
                FieldDescriptor::new("placeholder", "Placeholder", Text),
                FieldDescriptor::new("cta", "Button text", Text),
            ],
        );
        self.define(
            "search_widget",
            "Search widget",
            json!({ "title": "Advanced search", "cta": "Search" }),
            vec![
                FieldDescriptor::new("title", "Title", Text),
                FieldDescriptor::new("cta", "Button text", Text),
            ],
        );
        self.define(
            "section_title",
            "Section title",
            json!({ "title": "Section" }),
            vec![FieldDescriptor::new("title", "Title", Text)],
        );
        self.define(
            "car_detail",
            "Listing detail (template)",
            json!({ "showAskAi": true, "showLeadButton": true }),
            vec![
                FieldDescriptor::new("showLeadButton", "Show lead button", Boolean),
                FieldDescriptor::new("showAskAi", "Show \"Ask AI\"", Boolean),
            ],
        );
        self.define(
            "car_grid",
            "Car grid",
            json!({ "title": "Cars", "limit": 6 }),
            vec![
                FieldDescriptor::new("title", "Title", Text),
                FieldDescriptor::number("limit", "Count", 1, 24),
            ],
        );
        self.define(
            "car_list",
            "Car list",
            json!({ "title": "Results", "limit": 10, "withSidebarHint": false }),
            vec![
                FieldDescriptor::new("title", "Title", Text),
                FieldDescriptor::number("limit", "Count", 1, 50),
                FieldDescriptor::new("withSidebarHint", "Show sidebar hint", Boolean),
            ],
        );
        self.define(
            "reels_strip",
            "Clips strip",
            json!({ "title": "Top clips" }),
            vec![FieldDescriptor::new("title", "Title", Text)],
        );
        self.define(
            "reels_viewer",
            "Clips viewer",
            json!({ "title": "Clips" }),
            vec![FieldDescriptor::new("title", "Title", Text)],
        );
        self.define(
            "faq",
            "FAQ",
            json!({ "title": "FAQ", "limit": 6 }),
            vec![
                FieldDescriptor::new("title", "Title", Text),
                FieldDescriptor::number("limit", "Count", 1, 30),
            ],
        );
        self.define(
            "cta_sell",
            "Call to action / Sell",
            json!({
                "title": "Post a listing",
                "text": "Description",
                "cta": "Continue",
                "href": "/sell"
            }),
            vec![
                FieldDescriptor::new("title", "Title", Text),
                FieldDescriptor::new("text", "Text", Textarea),
                FieldDescriptor::new("cta", "Button text", Text),
                FieldDescriptor::new("href", "Link", Url),
            ],
        );
        self.define(
            "news_cards",
            "News cards",
            json!({ "title": "News", "limit": 3 }),
            vec![
                FieldDescriptor::new("title", "Title", Text),
                FieldDescriptor::number("limit", "Count", 1, 12),
            ],
        );
        self.define(
            "spacer",
            "Spacer",
            json!({ "h": 24 }),
            vec![FieldDescriptor::number("h", "Height (px)", 0, 200)],
        );
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn standard_catalogue_order() {
        let names: Vec<&str> = BlockRegistry::standard()
            .list_definitions()
            .iter()
            .map(|d| d.block_type.as_str())
            .collect();
        assert_eq!(
            names,
            vec![
                "hero",
                "ai_prompt",
                "search_widget",
                "section_title",
                "car_detail",
                "car_grid",
                "car_list",
                "reels_strip",
                "reels_viewer",
                "faq",
                "cta_sell",
                "news_cards",
                "spacer",
            ]
        );
    }

    #[test]
    fn lookup_known_and_unknown() {
        let registry = BlockRegistry::standard();
        let hero = registry.get_definition("hero").unwrap();
        assert_eq!(hero.label, "Hero");
        assert_eq!(hero.default_props["headline"], "Headline");
        assert!(registry.get_definition("carousel").is_none());
        assert!(!registry.contains("carousel"));
    }

    #[test]
    fn every_default_prop_has_a_field() {
        for def in BlockRegistry::standard().list_definitions() {
            for key in def.default_props.keys() {
                assert!(def.field(key).is_some(), "{}.{key} has no field", def.block_type);
            }
            for field in &def.fields {
                assert!(
                    def.default_props.contains_key(&field.key),
                    "{}.{} has no default",
                    def.block_type,
                    field.key
                );
            }
        }
    }

    #[test]
    fn number_fields_carry_bounds() {
        let registry = BlockRegistry::standard();
        let limit = registry.get_definition("car_list").unwrap().field("limit").unwrap();
        assert_eq!(limit.kind, FieldKind::Number);
        assert_eq!((limit.min, limit.max), (Some(1), Some(50)));

        let h = registry.get_definition("spacer").unwrap().field("h").unwrap();
        assert_eq!((h.min, h.max), (Some(0), Some(200)));
    }

    #[test]
    fn register_replaces_in_place() {
        let mut registry = BlockRegistry::with_standard_types();
        let mut hero = registry.get_definition("hero").unwrap().clone();
        hero.label = "Banner".to_string();
        registry.register(hero);

        assert_eq!(registry.len(), 13);
        assert_eq!(registry.list_definitions()[0].label, "Banner");
    }

    #[test]
    fn serializes_with_type_key() {
        let def = BlockRegistry::standard().get_definition("faq").unwrap();
        let json = serde_json::to_value(def).unwrap();
        assert_eq!(json["type"], "faq");
        assert_eq!(json["defaultProps"]["limit"], 6);
        assert_eq!(json["fields"][1]["type"], "number");
        assert!(json["fields"][0].get("min").is_none());
    }

    #[test]
    fn empty_registry() {
        let registry = BlockRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.get_definition("hero").is_none());
    }
}
