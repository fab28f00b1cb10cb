//! Bulk JSON export/import and the admin working copy.

use serde_json::Value;

use super::{ConfigStore, StoreError};
use crate::content::Editor;
use crate::models::SiteConfig;

/// A rejected import payload.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("invalid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    #[error("not a site document: {0}")]
    Shape(String),
}

/// Serialize the whole document as pretty-printed JSON.
pub fn export_json(config: &SiteConfig) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(config)
}

/// Parse a site document.
///
/// Only the basic shape is checked: a JSON object whose `pages` is an
/// array. Block props and collection contents are taken as they are.
pub fn import_json(text: &str) -> Result<SiteConfig, ImportError> {
    let value: Value = serde_json::from_str(text).map_err(ImportError::InvalidJson)?;
    let Some(object) = value.as_object() else {
        return Err(ImportError::Shape("expected a JSON object".to_string()));
    };
    match object.get("pages") {
        Some(Value::Array(_)) => {}
        Some(_) => return Err(ImportError::Shape("`pages` must be an array".to_string())),
        None => return Err(ImportError::Shape("missing `pages`".to_string())),
    }
    serde_json::from_value(value).map_err(|e| ImportError::Shape(e.to_string()))
}

/// The admin's private copy of the document.
///
/// Edits accumulate here without touching the store until [`save`].
///
/// [`save`]: WorkingCopy::save
#[derive(Debug, Clone)]
pub struct WorkingCopy {
    config: SiteConfig,
}

impl WorkingCopy {
    pub fn new(config: SiteConfig) -> Self {
        Self { config }
    }

    /// Start from the store's current document.
    pub async fn load(store: &dyn ConfigStore) -> Self {
        Self::new((*store.load().await).clone())
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Apply one editing operation.
    pub fn apply(&mut self, op: impl FnOnce(&SiteConfig) -> SiteConfig) {
        self.config = op(&self.config);
    }

    /// Apply an [`Editor`] operation.
    pub fn edit(
        &mut self,
        editor: &Editor<'_>,
        op: impl FnOnce(&Editor<'_>, &SiteConfig) -> SiteConfig,
    ) {
        self.config = op(editor, &self.config);
    }

    pub fn export(&self) -> Result<String, serde_json::Error> {
        export_json(&self.config)
    }

    /// Replace the copy with an imported document. A rejected payload
    /// leaves the copy untouched.
    pub fn import(&mut self, text: &str) -> Result<(), ImportError> {
        self.config = import_json(text)?;
        Ok(())
    }

    /// Write the copy to the store wholesale.
    pub async fn save(&self, store: &dyn ConfigStore) -> Result<(), StoreError> {
        store.save(self.config.clone()).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::config_storage::MemoryConfigStore;
    use crate::content::{BlockRegistry, set_brand_name};
    use crate::ids::SequentialIds;
    use crate::models::default_site;

    #[test]
    fn export_then_import_is_identity() {
        let config = default_site::site_config();
        let json = export_json(&config).unwrap();
        assert_eq!(import_json(&json).unwrap(), config);
    }

    #[test]
    fn rejects_invalid_json() {
        assert!(matches!(import_json("{ not json"), Err(ImportError::InvalidJson(_))));
    }

    #[test]
    fn rejects_wrong_shapes() {
        for text in ["[]", "42", "{}", r#"{"pages": {}}"#, r#"{"pages": [{"title": "no id"}]}"#] {
            assert!(
                matches!(import_json(text), Err(ImportError::Shape(_))),
                "accepted {text}"
            );
        }
    }

    #[test]
    fn accepts_minimal_document() {
        let config = import_json(r#"{"pages": []}"#).unwrap();
        assert!(config.pages.is_empty());
    }

    #[test]
    fn rejected_import_leaves_working_copy_untouched() {
        let mut copy = WorkingCopy::new(default_site::site_config());
        copy.apply(|c| set_brand_name(c, "Edited"));
        let before = copy.config().clone();

        assert!(copy.import("{ broken").is_err());
        assert!(copy.import(r#"{"nav": {}}"#).is_err());
        assert_eq!(copy.config(), &before);
    }

    #[tokio::test]
    async fn edits_stay_local_until_save() {
        let store = MemoryConfigStore::default();
        let ids = SequentialIds::new();
        let editor = Editor::new(BlockRegistry::standard(), &ids);

        let mut copy = WorkingCopy::load(&store).await;
        copy.edit(&editor, |e, c| e.add_page(c));
        copy.edit(&editor, |e, c| e.add_block(c, "p_1", "spacer"));
        assert_eq!(store.load().await.pages.len(), 7);

        copy.save(&store).await.unwrap();
        let saved = store.load().await;
        assert_eq!(saved.pages.len(), 8);
        assert_eq!(saved.find_page("p_1").unwrap().blocks[0].block_type, "spacer");
    }
}
