//! Application state shared across all handlers.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use crate::config::{Config, StoreKind};
use crate::config_storage::{ConfigStore, FileConfigStore, MemoryConfigStore};
use crate::content::BlockRegistry;
use crate::ids::{IdGenerator, UuidIds};
use crate::theme::{SharedThemeEngine, ThemeEngine};

/// Open the store selected by `config`.
pub fn open_store(config: &Config) -> Arc<dyn ConfigStore> {
    match config.store {
        StoreKind::File => {
            info!(path = %config.config_path.display(), "using file store");
            Arc::new(FileConfigStore::new(&config.config_path))
        }
        StoreKind::Memory => {
            info!("using in-memory store");
            Arc::new(MemoryConfigStore::default())
        }
    }
}

/// Shared application state.
///
/// Wrapped in Arc internally so Clone is cheap.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Site document storage. All reads and writes go through this.
    store: Arc<dyn ConfigStore>,

    /// Tera theme engine for the site frame.
    theme: SharedThemeEngine,

    /// Block catalogue.
    registry: &'static BlockRegistry,

    /// Id source for blocks and pages created server-side.
    ids: Box<dyn IdGenerator>,
}

impl AppState {
    /// Build state from configuration.
    pub fn new(config: &Config) -> Result<Self> {
        let store = open_store(config);
        let theme = ThemeEngine::from_dir(config.templates_dir.as_deref())
            .context("failed to initialize theme engine")?;

        Ok(Self::with_parts(store, Arc::new(theme), BlockRegistry::standard()))
    }

    /// Assemble state from explicit parts.
    pub fn with_parts(
        store: Arc<dyn ConfigStore>,
        theme: SharedThemeEngine,
        registry: &'static BlockRegistry,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                store,
                theme,
                registry,
                ids: Box::new(UuidIds),
            }),
        }
    }

    pub fn store(&self) -> &dyn ConfigStore {
        self.inner.store.as_ref()
    }

    pub fn theme(&self) -> &ThemeEngine {
        &self.inner.theme
    }

    pub fn registry(&self) -> &'static BlockRegistry {
        self.inner.registry
    }

    pub fn ids(&self) -> &dyn IdGenerator {
        self.inner.ids.as_ref()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("theme", &self.inner.theme)
            .field("block_types", &self.inner.registry.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn state_from_test_config_uses_memory_store() {
        let state = AppState::new(&Config::for_tests()).unwrap();
        assert_eq!(state.registry().len(), 13);
        assert_eq!(state.store().load().await.pages.len(), 7);
        assert!(state.ids().new_id("b").starts_with("b_"));
    }
}
