//! JSON file store.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::transfer::import_json;
use super::{ConfigStore, StoreError};
use crate::models::{SiteConfig, default_site};

/// Stores the document as one JSON file.
///
/// Saves write a sibling temp file and rename it over the target, so a
/// reader sees either the old or the new document. Each save gets its own
/// temp file and saves through one store are serialized.
#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
    save_lock: Arc<Mutex<()>>,
}

impl FileConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            save_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "site-config.json".into());
        name.push(format!(".{}.tmp", Uuid::now_v7().simple()));
        self.path.with_file_name(name)
    }

    fn io_error(&self, path: &Path, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

#[async_trait]
impl ConfigStore for FileConfigStore {
    async fn load(&self) -> Arc<SiteConfig> {
        let text = match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(
                    path = %self.path.display(),
                    "no saved site document, using built-in default"
                );
                return Arc::new(default_site::site_config());
            }
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "site document unreadable, using built-in default"
                );
                return Arc::new(default_site::site_config());
            }
        };

        match import_json(&text) {
            Ok(config) => Arc::new(config),
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "site document corrupt, using built-in default"
                );
                Arc::new(default_site::site_config())
            }
        }
    }

    async fn save(&self, config: SiteConfig) -> Result<(), StoreError> {
        let json = serde_json::to_vec_pretty(&config)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| self.io_error(parent, e))?;
        }

        let _guard = self.save_lock.lock().await;
        let temp = self.temp_path();
        if let Err(e) = tokio::fs::write(&temp, &json).await {
            let _ = tokio::fs::remove_file(&temp).await;
            return Err(self.io_error(&temp, e));
        }
        if let Err(e) = tokio::fs::rename(&temp, &self.path).await {
            let _ = tokio::fs::remove_file(&temp).await;
            return Err(self.io_error(&self.path, e));
        }

        info!(path = %self.path.display(), pages = config.pages.len(), "site document saved");
        Ok(())
    }
}
