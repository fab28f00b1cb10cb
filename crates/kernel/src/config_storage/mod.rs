//! Site document storage.
//!
//! The whole site is one JSON document, read and written wholesale. All
//! reads and writes go through [`ConfigStore`]:
//!
//! - `load` never fails. A missing or unreadable document degrades to the
//!   built-in default.
//! - `save` replaces the stored document atomically or reports failure,
//!   leaving the previous document intact.
//!
//! Concurrent saves are last-write-wins at document granularity.
//!
//! # Usage
//!
//! ```ignore
//! let config = store.load().await;
//! let next = editor.add_page(&config);
//! store.save(next).await?;
//! ```

mod file;
mod memory;
pub mod transfer;

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;

pub use file::FileConfigStore;
pub use memory::MemoryConfigStore;
pub use transfer::{ImportError, WorkingCopy, export_json, import_json};

use crate::models::SiteConfig;

/// Failure to persist the site document.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize site document: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Load/save interface for the site document.
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Current document as an immutable snapshot.
    async fn load(&self) -> Arc<SiteConfig>;

    /// Replace the stored document.
    async fn save(&self, config: SiteConfig) -> Result<(), StoreError>;
}
