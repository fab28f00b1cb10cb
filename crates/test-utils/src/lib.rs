//! Vetrina test utilities.
//!
//! Builders for site document fixtures and assertion helpers. Fixtures are
//! plain `serde_json::Value` documents in the stored wire format, so tests
//! exercise the same decode path as a real import.

use serde_json::{Value as JsonValue, json};

/// Create a site with no pages and no demo data.
pub fn test_site() -> TestSite {
    TestSite {
        brand_name: "TestBrand".to_string(),
        accent: "indigo".to_string(),
        nav: Vec::new(),
        footer_note: String::new(),
        pages: Vec::new(),
        cars: Vec::new(),
    }
}

/// A site document builder.
#[derive(Debug, Clone)]
pub struct TestSite {
    pub brand_name: String,
    pub accent: String,
    pub nav: Vec<(String, String)>,
    pub footer_note: String,
    pub pages: Vec<TestPage>,
    pub cars: Vec<JsonValue>,
}

impl TestSite {
    /// Set the brand name.
    pub fn with_brand(mut self, brand_name: &str) -> Self {
        self.brand_name = brand_name.to_string();
        self
    }

    /// Add a navigation link.
    pub fn with_nav_item(mut self, label: &str, href: &str) -> Self {
        self.nav.push((label.to_string(), href.to_string()));
        self
    }

    pub fn with_footer_note(mut self, note: &str) -> Self {
        self.footer_note = note.to_string();
        self
    }

    /// Append a page.
    pub fn with_page(mut self, page: TestPage) -> Self {
        self.pages.push(page);
        self
    }

    /// Replace the demo car collection.
    pub fn with_cars(mut self, cars: Vec<JsonValue>) -> Self {
        self.cars = cars;
        self
    }

    /// Build the stored document.
    pub fn build(&self) -> JsonValue {
        let nav: Vec<JsonValue> = self
            .nav
            .iter()
            .map(|(label, href)| json!({ "label": label, "href": href }))
            .collect();
        let pages: Vec<JsonValue> = self.pages.iter().map(TestPage::build).collect();

        json!({
            "version": "test",
            "theme": { "brandName": self.brand_name, "accent": self.accent },
            "nav": { "items": nav },
            "footer": { "links": [], "note": self.footer_note },
            "pages": pages,
            "demoData": { "cars": self.cars, "reels": [], "news": [], "faq": [] }
        })
    }

    /// Build the document as a JSON string.
    pub fn to_json(&self) -> String {
        self.build().to_string()
    }
}

/// Create a published page.
pub fn test_page(id: &str, slug: &str) -> TestPage {
    TestPage {
        id: id.to_string(),
        title: format!("Page {id}"),
        slug: slug.to_string(),
        is_published: true,
        blocks: Vec::new(),
    }
}

/// A page builder.
#[derive(Debug, Clone)]
pub struct TestPage {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub is_published: bool,
    pub blocks: Vec<TestBlock>,
}

impl TestPage {
    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    /// Set as unpublished.
    pub fn unpublished(mut self) -> Self {
        self.is_published = false;
        self
    }

    /// Append a block.
    pub fn with_block(mut self, block: TestBlock) -> Self {
        self.blocks.push(block);
        self
    }

    pub fn build(&self) -> JsonValue {
        let blocks: Vec<JsonValue> = self.blocks.iter().map(TestBlock::build).collect();
        json!({
            "id": self.id,
            "title": self.title,
            "slug": self.slug,
            "isPublished": self.is_published,
            "blocks": blocks
        })
    }
}

/// Create an enabled block with no props.
pub fn test_block(id: &str, block_type: &str) -> TestBlock {
    TestBlock {
        id: id.to_string(),
        block_type: block_type.to_string(),
        props: json!({}),
        is_enabled: None,
    }
}

/// A block instance builder.
#[derive(Debug, Clone)]
pub struct TestBlock {
    pub id: String,
    pub block_type: String,
    pub props: JsonValue,
    pub is_enabled: Option<bool>,
}

impl TestBlock {
    /// Add a single prop.
    pub fn with_prop(mut self, key: &str, value: JsonValue) -> Self {
        if let Some(obj) = self.props.as_object_mut() {
            obj.insert(key.to_string(), value);
        }
        self
    }

    /// Replace all props.
    pub fn with_props(mut self, props: JsonValue) -> Self {
        self.props = props;
        self
    }

    /// Mark the block disabled.
    pub fn disabled(mut self) -> Self {
        self.is_enabled = Some(false);
        self
    }

    pub fn build(&self) -> JsonValue {
        let mut block = json!({
            "id": self.id,
            "type": self.block_type,
            "props": self.props
        });
        if let (Some(enabled), Some(obj)) = (self.is_enabled, block.as_object_mut()) {
            obj.insert("isEnabled".to_string(), JsonValue::Bool(enabled));
        }
        block
    }
}

/// `n` demo cars with ids `c1..=cn`, ascending price and mileage.
pub fn test_cars(n: usize) -> Vec<JsonValue> {
    (1..=n)
        .map(|i| {
            json!({
                "id": format!("c{i}"),
                "title": format!("Test Car {i}"),
                "price": 10_000 + i * 500,
                "currency": "$",
                "year": 2010 + (i % 10),
                "mileageKm": i * 12_000,
                "city": "Testville",
                "imageUrl": format!("https://img.test/{i}.jpg")
            })
        })
        .collect()
}

/// Assertion helpers for rendered output.
pub mod assert {
    use serde_json::Value;

    /// Assert that a JSON value has a specific key.
    pub fn has_key(value: &Value, key: &str) {
        assert!(
            value.get(key).is_some(),
            "Expected JSON to have key '{key}', got: {value}"
        );
    }

    /// Assert that a string contains a substring.
    pub fn contains(haystack: &str, needle: &str) {
        assert!(
            haystack.contains(needle),
            "Expected string to contain '{needle}'\nActual: {haystack}"
        );
    }

    /// Assert that a string does not contain a substring.
    pub fn not_contains(haystack: &str, needle: &str) {
        assert!(
            !haystack.contains(needle),
            "Expected string to NOT contain '{needle}'\nActual: {haystack}"
        );
    }

    /// Assert that `first` occurs before `second` in `haystack`.
    pub fn appears_before(haystack: &str, first: &str, second: &str) {
        let a = haystack.find(first);
        let b = haystack.find(second);
        assert!(
            matches!((a, b), (Some(a), Some(b)) if a < b),
            "Expected '{first}' before '{second}'\nActual: {haystack}"
        );
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_site_builder() {
        let site = test_site()
            .with_brand("Acme")
            .with_nav_item("Cars", "/search")
            .with_page(test_page("p1", "").with_title("Home"))
            .with_cars(test_cars(2))
            .build();

        assert_eq!(site["theme"]["brandName"], "Acme");
        assert_eq!(site["nav"]["items"][0]["href"], "/search");
        assert_eq!(site["pages"][0]["title"], "Home");
        assert_eq!(site["demoData"]["cars"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_page_builder() {
        let page = test_page("p1", "about")
            .unpublished()
            .with_block(test_block("b1", "spacer").with_prop("h", json!(8)))
            .build();

        assert_eq!(page["isPublished"], false);
        assert_eq!(page["blocks"][0]["type"], "spacer");
        assert_eq!(page["blocks"][0]["props"]["h"], 8);
    }

    #[test]
    fn test_block_enabled_flag_only_when_set() {
        let block = test_block("b1", "hero").build();
        assert!(block.get("isEnabled").is_none());

        let block = test_block("b1", "hero").disabled().build();
        assert_eq!(block["isEnabled"], false);
    }

    #[test]
    fn test_cars_fixture() {
        let cars = test_cars(3);
        assert_eq!(cars.len(), 3);
        assert_eq!(cars[2]["id"], "c3");
        assert_eq!(cars[0]["price"], 10_500);
    }

    #[test]
    fn test_assertions() {
        let json = json!({"name": "test"});
        assert::has_key(&json, "name");
        assert::contains("hello world", "world");
        assert::not_contains("hello world", "foo");
        assert::appears_before("a then b", "a", "b");
    }
}
