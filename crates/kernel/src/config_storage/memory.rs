//! In-process store.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;

use super::{ConfigStore, StoreError};
use crate::models::{SiteConfig, default_site};

/// Holds the document in memory. Snapshots handed out by `load` stay valid
/// after later saves.
#[derive(Debug)]
pub struct MemoryConfigStore {
    current: RwLock<Arc<SiteConfig>>,
}

impl MemoryConfigStore {
    pub fn new(config: SiteConfig) -> Self {
        Self {
            current: RwLock::new(Arc::new(config)),
        }
    }
}

impl Default for MemoryConfigStore {
    fn default() -> Self {
        Self::new(default_site::site_config())
    }
}

#[async_trait]
impl ConfigStore for MemoryConfigStore {
    async fn load(&self) -> Arc<SiteConfig> {
        Arc::clone(&self.current.read())
    }

    async fn save(&self, config: SiteConfig) -> Result<(), StoreError> {
        *self.current.write() = Arc::new(config);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn starts_with_default_document() {
        let store = MemoryConfigStore::default();
        assert_eq!(*store.load().await, default_site::site_config());
    }

    #[tokio::test]
    async fn save_then_load_round_trips() {
        let store = MemoryConfigStore::default();
        let mut config = default_site::site_config();
        config.theme.brand_name = "AutoHub".to_string();

        store.save(config.clone()).await.unwrap();
        assert_eq!(*store.load().await, config);
    }

    #[tokio::test]
    async fn earlier_snapshot_is_unaffected_by_save() {
        let store = MemoryConfigStore::default();
        let before = store.load().await;

        let mut config = (*before).clone();
        config.pages.clear();
        store.save(config).await.unwrap();

        assert_eq!(before.pages.len(), 7);
        assert!(store.load().await.pages.is_empty());
    }
}
