//! Vetrina Kernel Library
//!
//! Page composition engine for a block-based site: block registry, typed
//! props, rendering, slug routing, editing operations and document storage.
//! The main entry point for running the server is the `vetrina` binary.

pub mod config;
pub mod config_storage;
pub mod content;
pub mod error;
pub mod ids;
pub mod models;
pub mod routes;
pub mod routing;
pub mod state;
pub mod theme;

pub use config::{Config, StoreKind};
pub use config_storage::{ConfigStore, FileConfigStore, MemoryConfigStore, StoreError};
pub use error::{AppError, AppResult};
pub use state::AppState;
